//! Member lookups. Member CRUD, auth and sessions are handled elsewhere;
//! the block service only needs roles for permission checks and audit
//! payloads.

use crate::models::DbMember;
use eyre::Result;
use sqlx::PgExecutor;

pub async fn get_member_by_id(executor: impl PgExecutor<'_>, id: i64) -> Result<Option<DbMember>> {
    let member = sqlx::query_as::<_, DbMember>(
        r#"
        SELECT id, name, role, created_at
        FROM members
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    Ok(member)
}
