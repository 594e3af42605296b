use chrono::{NaiveDate, NaiveTime};
use pretty_assertions::assert_eq;
use rstest::rstest;

use clubcourt_core::conflict::{
    self, CoveringBlock, ReleaseAction, Slot, cancellation_reason, localized_reason_name,
    plan_release, suspension_reason,
};
use clubcourt_core::models::block::Coverage;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn time(s: &str) -> NaiveTime {
    format!("{s}:00").parse().unwrap()
}

fn coverage(court_id: i64, day: &str, start: &str, end: &str) -> Coverage {
    Coverage {
        court_id,
        date: date(day),
        start_time: time(start),
        end_time: time(end),
    }
}

fn slot(court_id: i64, day: &str, start: &str) -> Slot {
    Slot {
        court_id,
        date: date(day),
        start_time: time(start),
    }
}

fn temporary(block_id: i64) -> CoveringBlock {
    CoveringBlock {
        block_id,
        is_temporary: true,
    }
}

fn permanent(block_id: i64) -> CoveringBlock {
    CoveringBlock {
        block_id,
        is_temporary: false,
    }
}

// ── Overlap predicate ───────────────────────────────────────────────────

#[rstest]
#[case::at_block_start("08:00", true)]
#[case::inside_window("09:00", true)]
#[case::last_covered_slot("09:59", true)]
#[case::at_block_end("10:00", false)]
#[case::after_block_end("11:00", false)]
#[case::before_block_start("07:00", false)]
fn coverage_is_half_open_on_start_time(#[case] start: &str, #[case] expected: bool) {
    let block = coverage(1, "2026-12-05", "08:00", "10:00");

    assert_eq!(block.covers(1, date("2026-12-05"), time(start)), expected);
}

#[test]
fn coverage_requires_same_court_and_date() {
    let block = coverage(1, "2026-12-05", "08:00", "10:00");

    assert!(!block.covers(2, date("2026-12-05"), time("08:00")));
    assert!(!block.covers(1, date("2026-12-06"), time("08:00")));
}

// ── Release planning ────────────────────────────────────────────────────

#[test]
fn release_restores_when_nothing_covers_the_slot() {
    // Round trip: a temporary block suspends a booking; deleting the block
    // with no other coverage brings the booking back.
    let action = plan_release(slot(1, "2026-12-05", "08:00"), None, &[]);

    assert_eq!(action, ReleaseAction::Restore);
}

#[test]
fn release_transfers_to_remaining_temporary_block() {
    // Two overlapping temporary blocks, the suspending one is deleted: the
    // other takes over and the booking stays suspended.
    let action = plan_release(slot(1, "2026-12-05", "08:00"), None, &[temporary(42)]);

    assert_eq!(action, ReleaseAction::Transfer { block_id: 42 });
}

#[test]
fn release_transfer_picks_lowest_block_id() {
    let covering = [temporary(9), temporary(3), temporary(7)];

    let action = plan_release(slot(1, "2026-12-05", "08:00"), None, &covering);

    assert_eq!(action, ReleaseAction::Transfer { block_id: 3 });
}

#[test]
fn release_cancels_when_a_permanent_block_took_over() {
    // Permanent wins: even with temporary blocks still around, one
    // permanent block is enough to cancel instead of transfer.
    let covering = [temporary(2), permanent(5), temporary(8)];

    let action = plan_release(slot(1, "2026-12-05", "08:00"), None, &covering);

    assert_eq!(action, ReleaseAction::Cancel);
}

#[test]
fn release_keeps_suspension_while_updated_block_still_covers() {
    // Update path: the block moved from 08:00-10:00 to 08:00-12:00 and the
    // 09:00 booking is still inside the window.
    let updated = coverage(1, "2026-12-05", "08:00", "12:00");

    let action = plan_release(slot(1, "2026-12-05", "09:00"), Some(&updated), &[]);

    assert_eq!(action, ReleaseAction::KeepSuspended);
}

#[test]
fn release_still_covered_wins_over_other_covering_blocks() {
    // The still-covered check runs first: other blocks, permanent or not,
    // only matter once the suspending block has let go of the slot.
    let updated = coverage(1, "2026-12-05", "08:00", "12:00");
    let covering = [permanent(5)];

    let action = plan_release(slot(1, "2026-12-05", "09:00"), Some(&updated), &covering);

    assert_eq!(action, ReleaseAction::KeepSuspended);
}

#[test]
fn release_after_update_frees_slot_outside_new_window() {
    // The block shrank to 10:00-12:00; the 08:00 booking it suspended is no
    // longer covered by anything and comes back.
    let updated = coverage(1, "2026-12-05", "10:00", "12:00");

    let action = plan_release(slot(1, "2026-12-05", "08:00"), Some(&updated), &[]);

    assert_eq!(action, ReleaseAction::Restore);
}

#[test]
fn release_after_court_change_reevaluates_old_court() {
    // The block moved to another court entirely; a permanent block on the
    // old court now owns the slot.
    let updated = coverage(2, "2026-12-05", "08:00", "10:00");
    let covering = [permanent(11)];

    let action = plan_release(slot(1, "2026-12-05", "08:00"), Some(&updated), &covering);

    assert_eq!(action, ReleaseAction::Cancel);
}

#[test]
fn release_ignores_temporariness_of_the_suspending_block() {
    // A block whose reason was edited from temporary to permanent keeps its
    // suspensions as long as it covers them; the planner only looks at the
    // coverage window. Once that block is deleted, the booking restores
    // like any other (here: nothing else covers the slot).
    let still_covering = coverage(1, "2026-12-05", "08:00", "10:00");

    let while_alive = plan_release(slot(1, "2026-12-05", "08:30"), Some(&still_covering), &[]);
    let after_delete = plan_release(slot(1, "2026-12-05", "08:30"), None, &[]);

    assert_eq!(while_alive, ReleaseAction::KeepSuspended);
    assert_eq!(after_delete, ReleaseAction::Restore);
}

// ── Reason texts ────────────────────────────────────────────────────────

#[rstest]
#[case("Weather", "Regen")]
#[case("Maintenance", "Wartung")]
#[case("Tournament", "Turnier")]
#[case("Championship", "Meisterschaft")]
#[case("Tennis Course", "Tenniskurs")]
#[case("Vereinsfeier", "Vereinsfeier")]
fn localized_reason_names(#[case] name: &str, #[case] expected: &str) {
    assert_eq!(localized_reason_name(name), expected);
}

#[test]
fn cancellation_reason_localizes_and_appends_details() {
    assert_eq!(
        cancellation_reason("Maintenance", None),
        "Platzsperre wegen Wartung"
    );
    assert_eq!(
        cancellation_reason("Maintenance", Some("Netz defekt")),
        "Platzsperre wegen Wartung - Netz defekt"
    );
    assert_eq!(
        cancellation_reason("Platzpflege", None),
        "Platzsperre wegen Platzpflege"
    );
}

#[test]
fn suspension_reason_keeps_the_raw_name() {
    // Suspension messages do not run through the localized mapping.
    assert_eq!(
        suspension_reason("Weather", None),
        "Vorübergehend gesperrt wegen Weather"
    );
    assert_eq!(
        suspension_reason("Weather", Some("Gewitterwarnung")),
        "Vorübergehend gesperrt wegen Weather - Gewitterwarnung"
    );
}

#[test]
fn permanent_takeover_texts_differ_between_member_and_audit() {
    // The member-visible text is German; the audit trail keeps the English
    // description. Both are fixed strings, not derived from the block.
    assert_eq!(
        conflict::PERMANENT_TAKEOVER_REASON,
        "Storniert wegen permanenter Platzsperre"
    );
    assert_eq!(
        conflict::PERMANENT_TAKEOVER_AUDIT_NOTE,
        "Permanent block placed over suspended reservation"
    );
}
