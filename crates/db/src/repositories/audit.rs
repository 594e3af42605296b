//! Append-only audit stores. Entries are never updated or deleted.

use crate::models::{DbBlockAuditLog, DbReservationAuditLog};
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::PgExecutor;

pub async fn insert_block_audit(
    executor: impl PgExecutor<'_>,
    operation: &str,
    block_id: Option<i64>,
    operation_data: &serde_json::Value,
    admin_id: i64,
) -> Result<DbBlockAuditLog> {
    let now = Utc::now();

    let entry = sqlx::query_as::<_, DbBlockAuditLog>(
        r#"
        INSERT INTO block_audit_log (operation, block_id, operation_data, admin_id, timestamp)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, operation, block_id, operation_data, admin_id, timestamp
        "#,
    )
    .bind(operation)
    .bind(block_id)
    .bind(operation_data)
    .bind(admin_id)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(entry)
}

/// Filtered audit query, newest first. The timestamp range is inclusive on
/// both ends.
pub async fn query_block_audit(
    executor: impl PgExecutor<'_>,
    admin_id: Option<i64>,
    operation: Option<&str>,
    from: Option<DateTime<Utc>>,
    until: Option<DateTime<Utc>>,
) -> Result<Vec<DbBlockAuditLog>> {
    let entries = sqlx::query_as::<_, DbBlockAuditLog>(
        r#"
        SELECT id, operation, block_id, operation_data, admin_id, timestamp
        FROM block_audit_log
        WHERE ($1::bigint IS NULL OR admin_id = $1)
          AND ($2::varchar IS NULL OR operation = $2)
          AND ($3::timestamptz IS NULL OR timestamp >= $3)
          AND ($4::timestamptz IS NULL OR timestamp <= $4)
        ORDER BY timestamp DESC
        "#,
    )
    .bind(admin_id)
    .bind(operation)
    .bind(from)
    .bind(until)
    .fetch_all(executor)
    .await?;

    Ok(entries)
}

pub async fn insert_reservation_audit(
    executor: impl PgExecutor<'_>,
    operation: &str,
    reservation_id: i64,
    operation_data: &serde_json::Value,
    performed_by_id: i64,
) -> Result<DbReservationAuditLog> {
    let now = Utc::now();

    let entry = sqlx::query_as::<_, DbReservationAuditLog>(
        r#"
        INSERT INTO reservation_audit_log (operation, reservation_id, operation_data,
                                           performed_by_id, timestamp)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, operation, reservation_id, operation_data, performed_by_id, timestamp
        "#,
    )
    .bind(operation)
    .bind(reservation_id)
    .bind(operation_data)
    .bind(performed_by_id)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(entry)
}
