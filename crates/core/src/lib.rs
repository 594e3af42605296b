//! # ClubCourt Core
//!
//! Domain types and the block/reservation conflict-resolution rules for the
//! ClubCourt court-booking service. This crate is pure: no database, no HTTP,
//! no clock access. Persistence lives in `clubcourt-db` and orchestration in
//! `clubcourt-api`.

/// Block/reservation conflict-resolution rules
pub mod conflict;
/// Error taxonomy shared across the workspace
pub mod errors;
/// User-facing message constants (German, as shown to club members)
pub mod messages;
/// Domain models and request/response types
pub mod models;
/// Outbound notification boundary
pub mod notify;
