use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

/// What the mail/push layer needs to address a booking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingNotice {
    pub reservation_id: i64,
    pub court_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub booked_for_id: i64,
}

/// Outbound notification boundary.
///
/// Every send is best-effort: callers log failures and carry on. A failed
/// dispatch never rolls back the block or reservation state that triggered
/// it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn booking_cancelled(&self, notice: &BookingNotice, reason: &str) -> eyre::Result<()>;

    async fn booking_suspended(&self, notice: &BookingNotice, reason: &str) -> eyre::Result<()>;

    async fn booking_restored(&self, notice: &BookingNotice) -> eyre::Result<()>;
}
