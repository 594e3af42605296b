//! Block reason registry handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use clubcourt_core::{
    errors::CourtError,
    messages,
    models::block_reason::{
        BlockReasonResponse, CreateBlockReasonRequest, UpdateBlockReasonRequest,
    },
};
use clubcourt_db::models::DbBlockReason;
use clubcourt_db::repositories::{block, block_reason};

use crate::{
    middleware::{actor::ActorId, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Serialize)]
pub struct ReasonListResponse {
    pub reasons: Vec<BlockReasonResponse>,
}

#[derive(Debug, Serialize)]
pub struct ReasonMutationResponse {
    pub message: String,
    pub reason: BlockReasonResponse,
}

#[axum::debug_handler]
pub async fn list_block_reasons(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<ReasonListResponse>, AppError> {
    let reasons = block_reason::list_reasons(&state.db_pool, true)
        .await
        .map_err(CourtError::Database)?;

    let mut responses = Vec::with_capacity(reasons.len());
    for reason in reasons {
        let usage_count = block::count_blocks_using_reason(&state.db_pool, reason.id)
            .await
            .map_err(CourtError::Database)?;
        responses.push(to_reason_response(reason, usage_count));
    }

    Ok(Json(ReasonListResponse { reasons: responses }))
}

#[axum::debug_handler]
pub async fn create_block_reason(
    State(state): State<Arc<ApiState>>,
    ActorId(actor_id): ActorId,
    Json(payload): Json<CreateBlockReasonRequest>,
) -> Result<Json<ReasonMutationResponse>, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError(CourtError::Validation(
            messages::error::REASON_NAME_REQUIRED.to_string(),
        )));
    }

    // Reason names are unique; reject duplicates up front.
    let existing = block_reason::get_reason_by_name(&state.db_pool, name)
        .await
        .map_err(CourtError::Database)?;
    if existing.is_some() {
        return Err(AppError(CourtError::Validation(
            messages::error::REASON_NAME_TAKEN.to_string(),
        )));
    }

    let reason = block_reason::create_reason(
        &state.db_pool,
        name,
        payload.is_temporary,
        payload.teamster_usable,
        payload.is_active,
        actor_id,
    )
    .await
    .map_err(CourtError::Database)?;

    Ok(Json(ReasonMutationResponse {
        message: messages::success::REASON_CREATED.to_string(),
        reason: to_reason_response(reason, 0),
    }))
}

#[axum::debug_handler]
pub async fn update_block_reason(
    State(state): State<Arc<ApiState>>,
    ActorId(_actor_id): ActorId,
    Path(reason_id): Path<i64>,
    Json(payload): Json<UpdateBlockReasonRequest>,
) -> Result<Json<ReasonMutationResponse>, AppError> {
    let existing = block_reason::get_reason_by_id(&state.db_pool, reason_id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound(messages::error::REASON_NOT_FOUND.to_string()))?;

    let name = match payload.name.as_deref() {
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(AppError(CourtError::Validation(
                    messages::error::REASON_NAME_REQUIRED.to_string(),
                )));
            }
            let other = block_reason::get_reason_by_name(&state.db_pool, name)
                .await
                .map_err(CourtError::Database)?;
            if other.is_some_and(|other| other.id != existing.id) {
                return Err(AppError(CourtError::Validation(
                    messages::error::REASON_NAME_TAKEN.to_string(),
                )));
            }
            Some(name.to_string())
        }
        None => None,
    };

    let updated = block_reason::update_reason(
        &state.db_pool,
        reason_id,
        name.as_deref(),
        payload.is_temporary,
        payload.teamster_usable,
        payload.is_active,
    )
    .await
    .map_err(CourtError::Database)?;

    let usage_count = block::count_blocks_using_reason(&state.db_pool, reason_id)
        .await
        .map_err(CourtError::Database)?;

    Ok(Json(ReasonMutationResponse {
        message: messages::success::REASON_UPDATED.to_string(),
        reason: to_reason_response(updated, usage_count),
    }))
}

fn to_reason_response(reason: DbBlockReason, usage_count: i64) -> BlockReasonResponse {
    BlockReasonResponse {
        id: reason.id,
        name: reason.name,
        is_temporary: reason.is_temporary,
        teamster_usable: reason.teamster_usable,
        is_active: reason.is_active,
        usage_count,
    }
}
