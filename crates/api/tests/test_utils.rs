use chrono::{NaiveDate, NaiveTime, Utc};
use fake::{faker::name::en::Name, Fake};
use uuid::Uuid;

use clubcourt_db::mock::repositories::{
    MockAuditRepo, MockBlockReasonRepo, MockBlockRepo, MockCourtRepo, MockMemberRepo,
    MockReservationRepo,
};
use clubcourt_db::models::{DbBlock, DbBlockReason, DbMember, DbReservation};

pub struct TestContext {
    // Mocks for each repository
    pub block_repo: MockBlockRepo,
    pub reservation_repo: MockReservationRepo,
    pub reason_repo: MockBlockReasonRepo,
    pub court_repo: MockCourtRepo,
    pub member_repo: MockMemberRepo,
    pub audit_repo: MockAuditRepo,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            block_repo: MockBlockRepo::new(),
            reservation_repo: MockReservationRepo::new(),
            reason_repo: MockBlockReasonRepo::new(),
            court_repo: MockCourtRepo::new(),
            member_repo: MockMemberRepo::new(),
            audit_repo: MockAuditRepo::new(),
        }
    }
}

// Factory helpers for test data

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn time(s: &str) -> NaiveTime {
    format!("{s}:00").parse().unwrap()
}

pub fn make_reason(id: i64, name: &str, is_temporary: bool) -> DbBlockReason {
    DbBlockReason {
        id,
        name: name.to_string(),
        is_temporary,
        teamster_usable: false,
        is_active: true,
        created_by_id: 1,
        created_at: Utc::now(),
    }
}

pub fn make_block(
    id: i64,
    court_id: i64,
    day: &str,
    start: &str,
    end: &str,
    reason_id: i64,
    batch_id: Uuid,
) -> DbBlock {
    DbBlock {
        id,
        court_id,
        date: date(day),
        start_time: time(start),
        end_time: time(end),
        reason_id,
        details: None,
        batch_id,
        created_by_id: 1,
        created_at: Utc::now(),
    }
}

pub fn make_active_reservation(
    id: i64,
    court_id: i64,
    day: &str,
    start: &str,
    end: &str,
) -> DbReservation {
    DbReservation {
        id,
        court_id,
        date: date(day),
        start_time: time(start),
        end_time: time(end),
        status: "active".to_string(),
        reason: None,
        suspended_by_block_id: None,
        booked_by_id: 17,
        booked_for_id: 17,
        created_at: Utc::now(),
    }
}

pub fn make_suspended_reservation(
    id: i64,
    court_id: i64,
    day: &str,
    start: &str,
    end: &str,
    suspended_by: i64,
) -> DbReservation {
    DbReservation {
        status: "suspended".to_string(),
        reason: Some("Vorübergehend gesperrt wegen Weather".to_string()),
        suspended_by_block_id: Some(suspended_by),
        ..make_active_reservation(id, court_id, day, start, end)
    }
}

pub fn make_member(id: i64, role: &str) -> DbMember {
    DbMember {
        id,
        name: Name().fake(),
        role: role.to_string(),
        created_at: Utc::now(),
    }
}
