use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use clubcourt_core::models::block::Coverage;
use clubcourt_core::notify::BookingNotice;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourt {
    pub id: i64,
    pub number: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbMember {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlockReason {
    pub id: i64,
    pub name: String,
    pub is_temporary: bool,
    pub teamster_usable: bool,
    pub is_active: bool,
    pub created_by_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlock {
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

impl DbBlock {
    pub fn coverage(&self) -> Coverage {
        Coverage {
            court_id: self.court_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: i64,
    pub court_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub reason: Option<String>,
    pub suspended_by_block_id: Option<i64>,
    pub booked_by_id: i64,
    pub booked_for_id: i64,
    pub created_at: DateTime<Utc>,
}

impl DbReservation {
    pub fn slot(&self) -> clubcourt_core::conflict::Slot {
        clubcourt_core::conflict::Slot {
            court_id: self.court_id,
            date: self.date,
            start_time: self.start_time,
        }
    }

    pub fn notice(&self) -> BookingNotice {
        BookingNotice {
            reservation_id: self.id,
            court_id: self.court_id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            booked_for_id: self.booked_for_id,
        }
    }
}

/// Projection used by the release planner: another block covering a slot,
/// joined with its reason's temporary flag.
#[derive(Debug, Clone, FromRow)]
pub struct DbCoveringBlock {
    pub id: i64,
    pub is_temporary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlockAuditLog {
    pub id: i64,
    pub operation: String,
    pub block_id: Option<i64>,
    pub operation_data: serde_json::Value,
    pub admin_id: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservationAuditLog {
    pub id: i64,
    pub operation: String,
    pub reservation_id: i64,
    pub operation_data: serde_json::Value,
    pub performed_by_id: i64,
    pub timestamp: DateTime<Utc>,
}
