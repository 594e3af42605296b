//! Notification dispatch.
//!
//! Mail delivery runs outside this service; [`LogNotifier`] records every
//! would-be notification as a structured log event that the mail relay
//! tails. Swapping in a real transport only requires another [`Notifier`]
//! implementation on the `ApiState`.

use async_trait::async_trait;
use eyre::Result;
use tracing::info;

use clubcourt_core::notify::{BookingNotice, Notifier};

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn booking_cancelled(&self, notice: &BookingNotice, reason: &str) -> Result<()> {
        info!(
            reservation_id = notice.reservation_id,
            member_id = notice.booked_for_id,
            court_id = notice.court_id,
            date = %notice.date,
            start_time = %notice.start_time,
            reason,
            "booking cancelled notification"
        );
        Ok(())
    }

    async fn booking_suspended(&self, notice: &BookingNotice, reason: &str) -> Result<()> {
        info!(
            reservation_id = notice.reservation_id,
            member_id = notice.booked_for_id,
            court_id = notice.court_id,
            date = %notice.date,
            start_time = %notice.start_time,
            reason,
            "booking suspended notification"
        );
        Ok(())
    }

    async fn booking_restored(&self, notice: &BookingNotice) -> Result<()> {
        info!(
            reservation_id = notice.reservation_id,
            member_id = notice.booked_for_id,
            court_id = notice.court_id,
            date = %notice.date,
            start_time = %notice.start_time,
            "booking restored notification"
        );
        Ok(())
    }
}
