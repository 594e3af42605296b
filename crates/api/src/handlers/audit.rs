//! Audit trail handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use clubcourt_core::{
    errors::CourtError,
    models::audit::{AuditLogFilter, AuditOperation, BlockAuditEntry},
};

use crate::{middleware::error_handling::AppError, services, ApiState};

/// Query parameters for the audit listing. The timestamp range is
/// inclusive on both ends.
#[derive(Debug, Deserialize)]
pub struct AuditLogQuery {
    pub admin_id: Option<i64>,
    pub operation: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AuditLogResponse {
    pub entries: Vec<BlockAuditEntry>,
}

#[axum::debug_handler]
pub async fn get_audit_log(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AuditLogQuery>,
) -> Result<Json<AuditLogResponse>, AppError> {
    let operation = match query.operation.as_deref() {
        Some(raw) => Some(AuditOperation::parse(raw).ok_or_else(|| {
            CourtError::Validation(format!("Ungültige Operation: {raw}"))
        })?),
        None => None,
    };

    let filter = AuditLogFilter {
        admin_id: query.admin_id,
        operation,
        from: query.from,
        until: query.until,
    };

    let entries = services::blocks::get_audit_log(&state.db_pool, &filter).await?;

    let entries = entries
        .into_iter()
        .map(|entry| {
            let operation = AuditOperation::parse(&entry.operation).ok_or_else(|| {
                CourtError::Internal(
                    format!("unknown audit operation {}", entry.operation).into(),
                )
            })?;
            Ok(BlockAuditEntry {
                id: entry.id,
                operation,
                block_id: entry.block_id,
                operation_data: entry.operation_data,
                admin_id: entry.admin_id,
                timestamp: entry.timestamp,
            })
        })
        .collect::<Result<Vec<_>, CourtError>>()?;

    Ok(Json(AuditLogResponse { entries }))
}
