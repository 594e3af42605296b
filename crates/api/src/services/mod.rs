/// Block service: creation, update and deletion of court blocks, including
/// conflict resolution against existing reservations and audit logging
pub mod blocks;
