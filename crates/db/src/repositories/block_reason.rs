//! Block reason registry.

use crate::models::DbBlockReason;
use chrono::Utc;
use eyre::Result;
use sqlx::PgExecutor;

pub async fn get_reason_by_id(
    executor: impl PgExecutor<'_>,
    id: i64,
) -> Result<Option<DbBlockReason>> {
    let reason = sqlx::query_as::<_, DbBlockReason>(
        r#"
        SELECT id, name, is_temporary, teamster_usable, is_active, created_by_id, created_at
        FROM block_reasons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(reason)
}

pub async fn get_reason_by_name(
    executor: impl PgExecutor<'_>,
    name: &str,
) -> Result<Option<DbBlockReason>> {
    let reason = sqlx::query_as::<_, DbBlockReason>(
        r#"
        SELECT id, name, is_temporary, teamster_usable, is_active, created_by_id, created_at
        FROM block_reasons
        WHERE name = $1
        "#,
    )
    .bind(name)
    .fetch_optional(executor)
    .await?;

    Ok(reason)
}

pub async fn list_reasons(
    executor: impl PgExecutor<'_>,
    include_inactive: bool,
) -> Result<Vec<DbBlockReason>> {
    let reasons = sqlx::query_as::<_, DbBlockReason>(
        r#"
        SELECT id, name, is_temporary, teamster_usable, is_active, created_by_id, created_at
        FROM block_reasons
        WHERE ($1 OR is_active)
        ORDER BY name ASC
        "#,
    )
    .bind(include_inactive)
    .fetch_all(executor)
    .await?;

    Ok(reasons)
}

pub async fn create_reason(
    executor: impl PgExecutor<'_>,
    name: &str,
    is_temporary: bool,
    teamster_usable: bool,
    is_active: bool,
    created_by_id: i64,
) -> Result<DbBlockReason> {
    let now = Utc::now();

    let reason = sqlx::query_as::<_, DbBlockReason>(
        r#"
        INSERT INTO block_reasons (name, is_temporary, teamster_usable, is_active,
                                   created_by_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, is_temporary, teamster_usable, is_active, created_by_id, created_at
        "#,
    )
    .bind(name)
    .bind(is_temporary)
    .bind(teamster_usable)
    .bind(is_active)
    .bind(created_by_id)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(reason)
}

/// Partial update; absent fields keep their stored value. Changing
/// `is_temporary` only affects how future block operations are
/// interpreted, never transitions already applied.
pub async fn update_reason(
    executor: impl PgExecutor<'_>,
    id: i64,
    name: Option<&str>,
    is_temporary: Option<bool>,
    teamster_usable: Option<bool>,
    is_active: Option<bool>,
) -> Result<DbBlockReason> {
    let reason = sqlx::query_as::<_, DbBlockReason>(
        r#"
        UPDATE block_reasons
        SET name = COALESCE($2, name),
            is_temporary = COALESCE($3, is_temporary),
            teamster_usable = COALESCE($4, teamster_usable),
            is_active = COALESCE($5, is_active)
        WHERE id = $1
        RETURNING id, name, is_temporary, teamster_usable, is_active, created_by_id, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(is_temporary)
    .bind(teamster_usable)
    .bind(is_active)
    .fetch_one(executor)
    .await?;

    Ok(reason)
}
