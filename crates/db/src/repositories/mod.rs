pub mod audit;
pub mod block;
pub mod block_reason;
pub mod court;
pub mod member;
pub mod reservation;
