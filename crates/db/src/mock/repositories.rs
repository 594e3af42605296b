use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{
    DbBlock, DbBlockAuditLog, DbBlockReason, DbCourt, DbCoveringBlock, DbMember, DbReservation,
    DbReservationAuditLog,
};

// Mock repositories for testing

mock! {
    pub BlockRepo {
        pub async fn insert_block(
            &self,
            court_id: i64,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
            reason_id: i64,
            details: Option<String>,
            batch_id: Uuid,
            created_by_id: i64,
        ) -> eyre::Result<DbBlock>;

        pub async fn get_block_by_id(&self, id: i64) -> eyre::Result<Option<DbBlock>>;

        pub async fn get_blocks_by_batch(&self, batch_id: Uuid) -> eyre::Result<Vec<DbBlock>>;

        pub async fn find_covering(
            &self,
            court_id: i64,
            date: NaiveDate,
            start_time: NaiveTime,
            exclude_block_id: i64,
        ) -> eyre::Result<Vec<DbCoveringBlock>>;

        pub async fn delete_blocks_by_batch(&self, batch_id: Uuid) -> eyre::Result<u64>;
    }
}

mock! {
    pub ReservationRepo {
        pub async fn find_active_overlapping(
            &self,
            court_id: i64,
            date: NaiveDate,
            start_time: NaiveTime,
            end_time: NaiveTime,
        ) -> eyre::Result<Vec<DbReservation>>;

        pub async fn find_suspended_by_block(
            &self,
            block_id: i64,
        ) -> eyre::Result<Vec<DbReservation>>;

        pub async fn mark_cancelled(&self, id: i64, reason: String) -> eyre::Result<()>;

        pub async fn mark_suspended(
            &self,
            id: i64,
            reason: String,
            block_id: i64,
        ) -> eyre::Result<()>;

        pub async fn mark_restored(&self, id: i64) -> eyre::Result<()>;

        pub async fn transfer_suspension(&self, id: i64, block_id: i64) -> eyre::Result<()>;
    }
}

mock! {
    pub BlockReasonRepo {
        pub async fn get_reason_by_id(&self, id: i64) -> eyre::Result<Option<DbBlockReason>>;

        pub async fn get_reason_by_name(
            &self,
            name: String,
        ) -> eyre::Result<Option<DbBlockReason>>;

        pub async fn list_reasons(
            &self,
            include_inactive: bool,
        ) -> eyre::Result<Vec<DbBlockReason>>;

        pub async fn create_reason(
            &self,
            name: String,
            is_temporary: bool,
            teamster_usable: bool,
            is_active: bool,
            created_by_id: i64,
        ) -> eyre::Result<DbBlockReason>;
    }
}

mock! {
    pub CourtRepo {
        pub async fn get_courts_by_ids(&self, court_ids: Vec<i64>) -> eyre::Result<Vec<DbCourt>>;
    }
}

mock! {
    pub MemberRepo {
        pub async fn get_member_by_id(&self, id: i64) -> eyre::Result<Option<DbMember>>;
    }
}

mock! {
    pub AuditRepo {
        pub async fn insert_block_audit(
            &self,
            operation: String,
            block_id: Option<i64>,
            operation_data: serde_json::Value,
            admin_id: i64,
        ) -> eyre::Result<DbBlockAuditLog>;

        pub async fn query_block_audit(
            &self,
            admin_id: Option<i64>,
            operation: Option<String>,
            from: Option<DateTime<Utc>>,
            until: Option<DateTime<Utc>>,
        ) -> eyre::Result<Vec<DbBlockAuditLog>>;

        pub async fn insert_reservation_audit(
            &self,
            operation: String,
            reservation_id: i64,
            operation_data: serde_json::Value,
            performed_by_id: i64,
        ) -> eyre::Result<DbReservationAuditLog>;
    }
}
