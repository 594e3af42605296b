/// Actor identification for admin/teamster operations
pub mod actor;
/// Error handling and HTTP status mapping
pub mod error_handling;
