/// Audit trail handlers
pub mod audit;
/// Court block handlers
pub mod blocks;
/// Block reason registry handlers
pub mod reasons;

use serde::Serialize;

/// Message-only response body shared by mutation endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
