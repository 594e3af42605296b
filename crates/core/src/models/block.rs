use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: i64,
    pub court_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason_id: i64,
    pub details: Option<String>,
    pub batch_id: Uuid,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
}

/// The court/date/time-window a block occupies.
///
/// Overlap against reservations is tested on the reservation's start time
/// with a half-open interval: a reservation starting exactly at `end_time`
/// is not covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub court_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Coverage {
    pub fn covers(&self, court_id: i64, date: NaiveDate, start_time: NaiveTime) -> bool {
        self.court_id == court_id
            && self.date == date
            && start_time >= self.start_time
            && start_time < self.end_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlocksRequest {
    pub court_ids: Vec<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason_id: i64,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlocksResponse {
    pub message: String,
    pub block_count: usize,
    pub batch_id: Uuid,
}

/// Field updates for a single block instance.
///
/// Exactly these fields may change; absent fields are left untouched. For
/// `details`, an empty or whitespace-only string clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlockRequest {
    pub court_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub reason_id: Option<i64>,
    pub details: Option<String>,
}

/// Batch update: the full target state of a batch across courts. Courts
/// missing from `court_ids` are unblocked, new ones are blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBatchRequest {
    pub court_ids: Vec<i64>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason_id: i64,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockResponse {
    pub id: i64,
    pub court_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason_id: i64,
    pub details: Option<String>,
    pub batch_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub batch_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reason_id: i64,
    pub reason_name: String,
    pub details: Option<String>,
    pub court_ids: Vec<i64>,
    pub blocks: Vec<BlockResponse>,
}
