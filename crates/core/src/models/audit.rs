//! Structured audit payloads.
//!
//! Block operations and the reservation transitions they cause are recorded
//! with typed payloads, serialized to a schema-less JSON column. chrono
//! values serialize as ISO-8601 strings, so stored entries stay readable
//! without the model types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOperation {
    Create,
    Update,
    Delete,
}

impl AuditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOperation::Create => "create",
            AuditOperation::Update => "update",
            AuditOperation::Delete => "delete",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "create" => Some(AuditOperation::Create),
            "update" => Some(AuditOperation::Update),
            "delete" => Some(AuditOperation::Delete),
            _ => None,
        }
    }
}

/// Payload of one block audit entry; one variant per operation kind.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BlockAuditPayload {
    Create(BlockCreateAudit),
    Update(BlockUpdateAudit),
    Delete(BlockDeleteAudit),
}

impl BlockAuditPayload {
    pub fn operation(&self) -> AuditOperation {
        match self {
            BlockAuditPayload::Create(_) => AuditOperation::Create,
            BlockAuditPayload::Update(_) => AuditOperation::Update,
            BlockAuditPayload::Delete(_) => AuditOperation::Delete,
        }
    }

    /// Block id the entry is pinned to; batch-wide entries have none.
    pub fn block_id(&self) -> Option<i64> {
        match self {
            BlockAuditPayload::Update(update) => update.block_id,
            _ => None,
        }
    }
}

/// Exactly one of `reservations_suspended`/`reservations_cancelled` is set,
/// matching whether the reason was temporary.
#[derive(Debug, Clone, Serialize)]
pub struct BlockCreateAudit {
    pub court_ids: Vec<i64>,
    pub court_numbers: Vec<i32>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason_id: i64,
    pub reason_name: Option<String>,
    pub is_temporary: bool,
    pub details: Option<String>,
    pub blocks_created: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations_suspended: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations_cancelled: Option<usize>,
}

/// Single-instance updates carry the block id; batch updates carry the
/// batch id and the full court list instead.
#[derive(Debug, Clone, Serialize)]
pub struct BlockUpdateAudit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<Uuid>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub court_numbers: Vec<i32>,
    pub reason_name: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockDeleteAudit {
    pub batch_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub court_numbers: Vec<i32>,
    pub reason_name: Option<String>,
    pub is_temporary: bool,
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations_restored: Option<usize>,
}

/// Reservation state transitions applied by the conflict engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Cancel,
    Suspend,
    Restore,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionKind::Cancel => "cancel",
            TransitionKind::Suspend => "suspend",
            TransitionKind::Restore => "restore",
        }
    }
}

/// Payload of one reservation transition entry.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationTransitionAudit {
    pub court_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub booked_for_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<i64>,
    /// True for every transition in this module; distinguishes engine
    /// transitions from member-initiated cancellations in the same table.
    pub triggered_by_block: bool,
}

/// One stored block audit entry, as returned to the admin UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockAuditEntry {
    pub id: i64,
    pub operation: AuditOperation,
    pub block_id: Option<i64>,
    pub operation_data: serde_json::Value,
    pub admin_id: i64,
    pub timestamp: DateTime<Utc>,
}

/// Optional filters for the audit query; all are combined with AND.
/// The timestamp range is inclusive on both ends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogFilter {
    pub admin_id: Option<i64>,
    pub operation: Option<AuditOperation>,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}
