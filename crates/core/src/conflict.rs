//! Block/reservation conflict resolution.
//!
//! A court block either cancels or suspends the reservations it covers,
//! depending on whether its reason is permanent or temporary. When a
//! temporary block is moved or removed, each reservation it suspended must
//! be released: restored, handed over to another covering block, or
//! cancelled if a permanent block has taken over the slot.
//!
//! Everything here is a pure function of its inputs. The service layer
//! queries the stores, calls [`plan_release`], and applies the returned
//! action; the same planner backs the update and delete paths so the two
//! cannot drift apart.

use crate::models::block::Coverage;
use chrono::{NaiveDate, NaiveTime};

/// Reservation text for a booking cancelled because a permanent block was
/// already covering its slot when the suspending block went away.
pub const PERMANENT_TAKEOVER_REASON: &str = "Storniert wegen permanenter Platzsperre";

/// Audit-trail description for the same situation.
pub const PERMANENT_TAKEOVER_AUDIT_NOTE: &str = "Permanent block placed over suspended reservation";

/// The slot a reservation occupies, as seen by the overlap predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub court_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
}

/// A block (other than the one being released) that currently covers a
/// suspended reservation's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoveringBlock {
    pub block_id: i64,
    pub is_temporary: bool,
}

/// What happens to one reservation when the block suspending it shrinks
/// its coverage or disappears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseAction {
    /// The suspending block still covers the slot after its update.
    KeepSuspended,
    /// A permanent block covers the slot; the booking is gone for good.
    Cancel,
    /// Another temporary block covers the slot and takes over the
    /// suspension. No notification, no audit entry.
    Transfer { block_id: i64 },
    /// Nothing covers the slot any more; the booking becomes active again.
    Restore,
}

/// Decide the fate of a reservation suspended by a block that is being
/// updated (`current` = the block's post-update coverage) or deleted
/// (`current` = `None`).
///
/// `covering` lists the blocks other than the suspending one that cover
/// the reservation's slot. When several temporary blocks qualify, the one
/// with the lowest id takes over, so repeated runs pick the same block.
pub fn plan_release(
    slot: Slot,
    current: Option<&Coverage>,
    covering: &[CoveringBlock],
) -> ReleaseAction {
    if let Some(coverage) = current {
        if coverage.covers(slot.court_id, slot.date, slot.start_time) {
            return ReleaseAction::KeepSuspended;
        }
    }

    if covering.iter().any(|block| !block.is_temporary) {
        return ReleaseAction::Cancel;
    }

    match covering.iter().map(|block| block.block_id).min() {
        Some(block_id) => ReleaseAction::Transfer { block_id },
        None => ReleaseAction::Restore,
    }
}

/// German display names for the well-known block reasons. Unknown reasons
/// pass through unchanged.
pub fn localized_reason_name(name: &str) -> &str {
    match name {
        "Weather" => "Regen",
        "Maintenance" => "Wartung",
        "Tournament" => "Turnier",
        "Championship" => "Meisterschaft",
        "Tennis Course" => "Tenniskurs",
        other => other,
    }
}

/// Text stored on a reservation cancelled by a permanent block.
pub fn cancellation_reason(reason_name: &str, details: Option<&str>) -> String {
    let reason_text = localized_reason_name(reason_name);
    match details {
        Some(details) => format!("Platzsperre wegen {reason_text} - {details}"),
        None => format!("Platzsperre wegen {reason_text}"),
    }
}

/// Text stored on a reservation suspended by a temporary block. Uses the
/// raw reason name; the localized mapping applies to cancellations only.
pub fn suspension_reason(reason_name: &str, details: Option<&str>) -> String {
    match details {
        Some(details) => format!("Vorübergehend gesperrt wegen {reason_name} - {details}"),
        None => format!("Vorübergehend gesperrt wegen {reason_name}"),
    }
}
