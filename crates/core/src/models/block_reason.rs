use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named reason for blocking a court.
///
/// `is_temporary` is the policy switch for the conflict engine: temporary
/// reasons suspend conflicting reservations, permanent ones cancel them.
/// Changing the flag only affects how future block operations are
/// interpreted; transitions already applied stay as they are.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockReason {
    pub id: i64,
    pub name: String,
    pub is_temporary: bool,
    pub teamster_usable: bool,
    pub is_active: bool,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlockReasonRequest {
    pub name: String,
    #[serde(default)]
    pub is_temporary: bool,
    #[serde(default)]
    pub teamster_usable: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlockReasonRequest {
    pub name: Option<String>,
    pub is_temporary: Option<bool>,
    pub teamster_usable: Option<bool>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockReasonResponse {
    pub id: i64,
    pub name: String,
    pub is_temporary: bool,
    pub teamster_usable: bool,
    pub is_active: bool,
    pub usage_count: i64,
}
