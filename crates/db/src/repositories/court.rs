//! Court lookups. Court administration itself is out of scope; the audit
//! trail needs numbers for court ids.

use crate::models::DbCourt;
use eyre::Result;
use sqlx::PgExecutor;

pub async fn get_courts_by_ids(
    executor: impl PgExecutor<'_>,
    court_ids: &[i64],
) -> Result<Vec<DbCourt>> {
    let courts = sqlx::query_as::<_, DbCourt>(
        r#"
        SELECT id, number, name, created_at
        FROM courts
        WHERE id = ANY($1)
        ORDER BY number ASC
        "#,
    )
    .bind(court_ids)
    .fetch_all(executor)
    .await?;

    Ok(courts)
}
