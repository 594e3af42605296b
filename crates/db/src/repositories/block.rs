//! Block store.

use crate::models::{DbBlock, DbCoveringBlock};
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::PgExecutor;
use uuid::Uuid;

pub async fn insert_block(
    executor: impl PgExecutor<'_>,
    court_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    reason_id: i64,
    details: Option<&str>,
    batch_id: Uuid,
    created_by_id: i64,
) -> Result<DbBlock> {
    let now = Utc::now();

    tracing::debug!(
        "Inserting block: court={} date={} window={}..{} batch={}",
        court_id,
        date,
        start_time,
        end_time,
        batch_id
    );

    let block = sqlx::query_as::<_, DbBlock>(
        r#"
        INSERT INTO blocks (court_id, date, start_time, end_time, reason_id,
                            details, batch_id, created_by_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, court_id, date, start_time, end_time, reason_id, details,
                  batch_id, created_by_id, created_at
        "#,
    )
    .bind(court_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(reason_id)
    .bind(details)
    .bind(batch_id)
    .bind(created_by_id)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(block)
}

pub async fn get_block_by_id(executor: impl PgExecutor<'_>, id: i64) -> Result<Option<DbBlock>> {
    let block = sqlx::query_as::<_, DbBlock>(
        r#"
        SELECT id, court_id, date, start_time, end_time, reason_id, details,
               batch_id, created_by_id, created_at
        FROM blocks
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(block)
}

pub async fn get_blocks_by_batch(
    executor: impl PgExecutor<'_>,
    batch_id: Uuid,
) -> Result<Vec<DbBlock>> {
    let blocks = sqlx::query_as::<_, DbBlock>(
        r#"
        SELECT id, court_id, date, start_time, end_time, reason_id, details,
               batch_id, created_by_id, created_at
        FROM blocks
        WHERE batch_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(batch_id)
    .fetch_all(executor)
    .await?;

    Ok(blocks)
}

pub async fn get_blocks_by_date(
    executor: impl PgExecutor<'_>,
    date: NaiveDate,
) -> Result<Vec<DbBlock>> {
    let blocks = sqlx::query_as::<_, DbBlock>(
        r#"
        SELECT id, court_id, date, start_time, end_time, reason_id, details,
               batch_id, created_by_id, created_at
        FROM blocks
        WHERE date = $1
        ORDER BY start_time ASC, id ASC
        "#,
    )
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(blocks)
}

/// Filtered block listing for the admin grid. Every filter is optional;
/// absent filters match everything.
pub async fn filter_blocks(
    executor: impl PgExecutor<'_>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    court_ids: Option<&[i64]>,
    reason_ids: Option<&[i64]>,
) -> Result<Vec<DbBlock>> {
    let blocks = sqlx::query_as::<_, DbBlock>(
        r#"
        SELECT id, court_id, date, start_time, end_time, reason_id, details,
               batch_id, created_by_id, created_at
        FROM blocks
        WHERE ($1::date IS NULL OR date >= $1)
          AND ($2::date IS NULL OR date <= $2)
          AND ($3::bigint[] IS NULL OR court_id = ANY($3))
          AND ($4::bigint[] IS NULL OR reason_id = ANY($4))
        ORDER BY date ASC, start_time ASC
        "#,
    )
    .bind(date_from)
    .bind(date_to)
    .bind(court_ids)
    .bind(reason_ids)
    .fetch_all(executor)
    .await?;

    Ok(blocks)
}

/// Blocks other than `exclude_block_id` whose window covers the given slot,
/// joined with their reason's temporary flag. Ordered by id so the release
/// planner's lowest-id transfer target is stable.
pub async fn find_covering(
    executor: impl PgExecutor<'_>,
    court_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    exclude_block_id: i64,
) -> Result<Vec<DbCoveringBlock>> {
    let blocks = sqlx::query_as::<_, DbCoveringBlock>(
        r#"
        SELECT b.id, r.is_temporary
        FROM blocks b
        JOIN block_reasons r ON r.id = b.reason_id
        WHERE b.id <> $1
          AND b.court_id = $2
          AND b.date = $3
          AND b.start_time <= $4
          AND b.end_time > $4
        ORDER BY b.id ASC
        "#,
    )
    .bind(exclude_block_id)
    .bind(court_id)
    .bind(date)
    .bind(start_time)
    .fetch_all(executor)
    .await?;

    Ok(blocks)
}

pub async fn update_block(
    executor: impl PgExecutor<'_>,
    id: i64,
    court_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    reason_id: i64,
    details: Option<&str>,
) -> Result<DbBlock> {
    let block = sqlx::query_as::<_, DbBlock>(
        r#"
        UPDATE blocks
        SET court_id = $2, date = $3, start_time = $4, end_time = $5,
            reason_id = $6, details = $7
        WHERE id = $1
        RETURNING id, court_id, date, start_time, end_time, reason_id, details,
                  batch_id, created_by_id, created_at
        "#,
    )
    .bind(id)
    .bind(court_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(reason_id)
    .bind(details)
    .fetch_one(executor)
    .await?;

    Ok(block)
}

pub async fn delete_block(executor: impl PgExecutor<'_>, id: i64) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM blocks
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn delete_blocks_by_batch(executor: impl PgExecutor<'_>, batch_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM blocks
        WHERE batch_id = $1
        "#,
    )
    .bind(batch_id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn count_blocks_using_reason(executor: impl PgExecutor<'_>, reason_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM blocks
        WHERE reason_id = $1
        "#,
    )
    .bind(reason_id)
    .fetch_one(executor)
    .await?;

    Ok(count)
}
