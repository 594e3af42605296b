//! Reservation store.
//!
//! Functions take `impl PgExecutor` instead of a pool so the conflict
//! engine can run them inside one transaction; handlers pass the pool
//! directly for standalone reads.

use crate::models::DbReservation;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::Result;
use sqlx::PgExecutor;

pub async fn create_reservation(
    executor: impl PgExecutor<'_>,
    court_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    booked_by_id: i64,
    booked_for_id: i64,
) -> Result<DbReservation> {
    let now = Utc::now();

    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        INSERT INTO reservations (court_id, date, start_time, end_time, status,
                                  booked_by_id, booked_for_id, created_at)
        VALUES ($1, $2, $3, $4, 'active', $5, $6, $7)
        RETURNING id, court_id, date, start_time, end_time, status, reason,
                  suspended_by_block_id, booked_by_id, booked_for_id, created_at
        "#,
    )
    .bind(court_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(booked_by_id)
    .bind(booked_for_id)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(reservation)
}

/// Active reservations on one court whose start time falls inside the
/// half-open window `[start_time, end_time)` on `date`.
pub async fn find_active_overlapping(
    executor: impl PgExecutor<'_>,
    court_id: i64,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<Vec<DbReservation>> {
    tracing::debug!(
        "Finding active reservations overlapping court={} date={} window={}..{}",
        court_id,
        date,
        start_time,
        end_time
    );

    let reservations = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, court_id, date, start_time, end_time, status, reason,
               suspended_by_block_id, booked_by_id, booked_for_id, created_at
        FROM reservations
        WHERE court_id = $1
          AND date = $2
          AND status = 'active'
          AND start_time >= $3
          AND start_time < $4
        ORDER BY start_time ASC, id ASC
        "#,
    )
    .bind(court_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .fetch_all(executor)
    .await?;

    Ok(reservations)
}

/// Multi-court variant of [`find_active_overlapping`], used by the
/// conflict preview. Same predicate so previewed counts match applied
/// effects.
pub async fn find_active_overlapping_courts(
    executor: impl PgExecutor<'_>,
    court_ids: &[i64],
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
) -> Result<Vec<DbReservation>> {
    let reservations = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, court_id, date, start_time, end_time, status, reason,
               suspended_by_block_id, booked_by_id, booked_for_id, created_at
        FROM reservations
        WHERE court_id = ANY($1)
          AND date = $2
          AND status = 'active'
          AND start_time >= $3
          AND start_time < $4
        ORDER BY court_id ASC, start_time ASC, id ASC
        "#,
    )
    .bind(court_ids)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .fetch_all(executor)
    .await?;

    Ok(reservations)
}

pub async fn find_suspended_by_block(
    executor: impl PgExecutor<'_>,
    block_id: i64,
) -> Result<Vec<DbReservation>> {
    let reservations = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, court_id, date, start_time, end_time, status, reason,
               suspended_by_block_id, booked_by_id, booked_for_id, created_at
        FROM reservations
        WHERE suspended_by_block_id = $1
          AND status = 'suspended'
        ORDER BY id ASC
        "#,
    )
    .bind(block_id)
    .fetch_all(executor)
    .await?;

    Ok(reservations)
}

pub async fn mark_cancelled(executor: impl PgExecutor<'_>, id: i64, reason: &str) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE reservations
        SET status = 'cancelled', reason = $2, suspended_by_block_id = NULL
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(reason)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn mark_suspended(
    executor: impl PgExecutor<'_>,
    id: i64,
    reason: &str,
    block_id: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE reservations
        SET status = 'suspended', reason = $2, suspended_by_block_id = $3
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(reason)
    .bind(block_id)
    .execute(executor)
    .await?;

    Ok(())
}

pub async fn mark_restored(executor: impl PgExecutor<'_>, id: i64) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE reservations
        SET status = 'active', reason = NULL, suspended_by_block_id = NULL
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Hand a suspension over to another block. Status and reason stay as they
/// are; only the owning block changes.
pub async fn transfer_suspension(
    executor: impl PgExecutor<'_>,
    id: i64,
    block_id: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE reservations
        SET suspended_by_block_id = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(block_id)
    .execute(executor)
    .await?;

    Ok(())
}
