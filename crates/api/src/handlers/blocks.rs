//! Court block handlers.
//!
//! Thin glue over the block service: parse and validate the request, check
//! role-dependent permissions, delegate, and shape the response. All
//! conflict-resolution behavior lives in `services::blocks`.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use clubcourt_core::{
    errors::CourtError,
    messages,
    models::{
        block::{
            BatchResponse, BlockResponse, CreateBlocksRequest, CreateBlocksResponse,
            UpdateBatchRequest, UpdateBlockRequest,
        },
        member::MemberRole,
        reservation::{ReservationResponse, ReservationStatus},
    },
};
use clubcourt_db::models::{DbBlock, DbReservation};
use clubcourt_db::repositories::{block, block_reason, member};

use crate::{
    handlers::MessageResponse,
    middleware::{actor::ActorId, error_handling::AppError},
    services, ApiState,
};

#[derive(Debug, Serialize)]
pub struct BlockListResponse {
    pub blocks: Vec<BlockResponse>,
}

#[derive(Debug, Serialize)]
pub struct ConflictPreviewResponse {
    pub reservations: Vec<ReservationResponse>,
    pub count: usize,
}

/// Query parameters for the filtered block listing.
#[derive(Debug, Deserialize)]
pub struct BlockFilterQuery {
    pub date_range_start: Option<NaiveDate>,
    pub date_range_end: Option<NaiveDate>,
    /// Comma-separated court ids
    pub court_ids: Option<String>,
    /// Comma-separated reason ids
    pub reason_ids: Option<String>,
}

/// Query parameters for the conflict preview.
#[derive(Debug, Deserialize)]
pub struct ConflictPreviewQuery {
    /// Comma-separated court ids
    pub court_ids: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[axum::debug_handler]
pub async fn create_blocks(
    State(state): State<Arc<ApiState>>,
    ActorId(actor_id): ActorId,
    Json(payload): Json<CreateBlocksRequest>,
) -> Result<Json<CreateBlocksResponse>, AppError> {
    if payload.court_ids.is_empty() {
        return Err(AppError(CourtError::Validation(
            messages::error::BLOCK_NO_COURTS_SPECIFIED.to_string(),
        )));
    }

    let today = Local::now().date_naive();
    if payload.date < today {
        return Err(AppError(CourtError::Validation(
            messages::error::BLOCK_PAST_DATE.to_string(),
        )));
    }
    if payload.start_time >= payload.end_time {
        return Err(AppError(CourtError::Validation(
            messages::error::BLOCK_END_BEFORE_START.to_string(),
        )));
    }

    check_reason_permission(&state, actor_id, payload.reason_id).await?;

    let blocks = services::blocks::create_blocks(
        &state.db_pool,
        state.notifier.as_ref(),
        &payload,
        actor_id,
    )
    .await?;

    let message = format!(
        "{} Sperrung{} erfolgreich erstellt",
        blocks.len(),
        if blocks.len() > 1 { "en" } else { "" }
    );

    let response = CreateBlocksResponse {
        message,
        block_count: blocks.len(),
        batch_id: blocks.first().map(|block| block.batch_id).unwrap_or_default(),
    };

    Ok(Json(response))
}

/// Public listing for the booking grid: all blocks on one day.
#[axum::debug_handler]
pub async fn blocks_for_date(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<NaiveDate>,
) -> Result<Json<BlockListResponse>, AppError> {
    let blocks = block::get_blocks_by_date(&state.db_pool, date)
        .await
        .map_err(CourtError::Database)?;

    let response = BlockListResponse {
        blocks: blocks.into_iter().map(to_block_response).collect(),
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn list_blocks(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BlockFilterQuery>,
) -> Result<Json<BlockListResponse>, AppError> {
    let court_ids = query.court_ids.as_deref().map(parse_id_list).transpose()?;
    let reason_ids = query.reason_ids.as_deref().map(parse_id_list).transpose()?;

    let blocks = block::filter_blocks(
        &state.db_pool,
        query.date_range_start,
        query.date_range_end,
        court_ids.as_deref(),
        reason_ids.as_deref(),
    )
    .await
    .map_err(CourtError::Database)?;

    let response = BlockListResponse {
        blocks: blocks.into_iter().map(to_block_response).collect(),
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn get_batch(
    State(state): State<Arc<ApiState>>,
    Path(batch_id): Path<Uuid>,
) -> Result<Json<BatchResponse>, AppError> {
    let blocks = block::get_blocks_by_batch(&state.db_pool, batch_id)
        .await
        .map_err(CourtError::Database)?;

    let Some(first) = blocks.first() else {
        return Err(AppError(CourtError::NotFound(
            messages::error::BLOCK_BATCH_NOT_FOUND.to_string(),
        )));
    };

    let reason = block_reason::get_reason_by_id(&state.db_pool, first.reason_id)
        .await
        .map_err(CourtError::Database)?;

    let response = BatchResponse {
        batch_id,
        date: first.date,
        start_time: first.start_time,
        end_time: first.end_time,
        reason_id: first.reason_id,
        reason_name: reason
            .map(|reason| reason.name)
            .unwrap_or_else(|| "Unbekannt".to_string()),
        details: first.details.clone(),
        court_ids: blocks.iter().map(|block| block.court_id).collect(),
        blocks: blocks.iter().cloned().map(to_block_response).collect(),
    };

    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn update_batch(
    State(state): State<Arc<ApiState>>,
    ActorId(actor_id): ActorId,
    Path(batch_id): Path<Uuid>,
    Json(payload): Json<UpdateBatchRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let today = Local::now().date_naive();
    if payload.date < today {
        return Err(AppError(CourtError::Validation(
            messages::error::BLOCK_PAST_DATE_EDIT.to_string(),
        )));
    }
    if payload.start_time >= payload.end_time {
        return Err(AppError(CourtError::Validation(
            messages::error::BLOCK_END_BEFORE_START.to_string(),
        )));
    }

    let existing = block::get_blocks_by_batch(&state.db_pool, batch_id)
        .await
        .map_err(CourtError::Database)?;
    if existing.is_empty() {
        return Err(AppError(CourtError::NotFound(
            messages::error::BLOCK_BATCH_NOT_FOUND.to_string(),
        )));
    }
    check_batch_ownership(
        &state,
        actor_id,
        &existing,
        messages::error::BLOCK_EDIT_OWN_ONLY,
    )
    .await?;
    check_reason_permission(&state, actor_id, payload.reason_id).await?;

    let total = services::blocks::update_batch(
        &state.db_pool,
        state.notifier.as_ref(),
        batch_id,
        &payload,
        actor_id,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: format!("{total} Sperrungen erfolgreich aktualisiert"),
    }))
}

#[axum::debug_handler]
pub async fn update_block_instance(
    State(state): State<Arc<ApiState>>,
    ActorId(actor_id): ActorId,
    Path(block_id): Path<i64>,
    Json(payload): Json<UpdateBlockRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if let Some(reason_id) = payload.reason_id {
        check_reason_permission(&state, actor_id, reason_id).await?;
    }

    services::blocks::update_single_instance(
        &state.db_pool,
        state.notifier.as_ref(),
        block_id,
        &payload,
        actor_id,
        false,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: messages::success::BLOCK_UPDATED.to_string(),
    }))
}

#[axum::debug_handler]
pub async fn delete_batch(
    State(state): State<Arc<ApiState>>,
    ActorId(actor_id): ActorId,
    Path(batch_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let blocks = block::get_blocks_by_batch(&state.db_pool, batch_id)
        .await
        .map_err(CourtError::Database)?;
    if blocks.is_empty() {
        return Err(AppError(CourtError::NotFound(
            messages::error::BLOCK_BATCH_NOT_FOUND.to_string(),
        )));
    }
    check_batch_ownership(
        &state,
        actor_id,
        &blocks,
        messages::error::BLOCK_DELETE_OWN_ONLY,
    )
    .await?;

    services::blocks::delete_batch(&state.db_pool, state.notifier.as_ref(), batch_id, actor_id)
        .await?;

    Ok(Json(MessageResponse {
        message: messages::success::BLOCK_BATCH_DELETED.to_string(),
    }))
}

#[axum::debug_handler]
pub async fn conflict_preview(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ConflictPreviewQuery>,
) -> Result<Json<ConflictPreviewResponse>, AppError> {
    let court_ids = parse_id_list(&query.court_ids)?;

    let reservations = services::blocks::preview_conflicts(
        &state.db_pool,
        &court_ids,
        query.date,
        query.start_time,
        query.end_time,
    )
    .await?;

    let reservations: Vec<ReservationResponse> =
        reservations.into_iter().map(to_reservation_response).collect();
    let count = reservations.len();

    Ok(Json(ConflictPreviewResponse {
        reservations,
        count,
    }))
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn parse_id_list(raw: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| {
                AppError(CourtError::Validation(format!("Ungültige ID: {part}")))
            })
        })
        .collect()
}

fn to_block_response(block: DbBlock) -> BlockResponse {
    BlockResponse {
        id: block.id,
        court_id: block.court_id,
        date: block.date,
        start_time: block.start_time,
        end_time: block.end_time,
        reason_id: block.reason_id,
        details: block.details,
        batch_id: block.batch_id,
    }
}

fn to_reservation_response(reservation: DbReservation) -> ReservationResponse {
    ReservationResponse {
        id: reservation.id,
        court_id: reservation.court_id,
        date: reservation.date,
        start_time: reservation.start_time,
        end_time: reservation.end_time,
        status: ReservationStatus::parse(&reservation.status)
            .unwrap_or(ReservationStatus::Active),
        booked_for_id: reservation.booked_for_id,
    }
}

/// Teamsters may only use reasons flagged for them; administrators are
/// unrestricted.
async fn check_reason_permission(
    state: &ApiState,
    actor_id: i64,
    reason_id: i64,
) -> Result<(), AppError> {
    let actor = member::get_member_by_id(&state.db_pool, actor_id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::Validation(messages::error::ACTOR_UNKNOWN.to_string()))?;

    if MemberRole::parse(&actor.role).is_some_and(|role| role.is_teamster()) {
        let reason = block_reason::get_reason_by_id(&state.db_pool, reason_id)
            .await
            .map_err(CourtError::Database)?
            .ok_or_else(|| {
                CourtError::Validation(messages::error::BLOCK_REASON_INVALID.to_string())
            })?;
        if !reason.teamster_usable {
            return Err(AppError(CourtError::Authorization(
                messages::error::BLOCK_REASON_NOT_ALLOWED.to_string(),
            )));
        }
    }

    Ok(())
}

/// Teamsters may only touch batches they created themselves.
async fn check_batch_ownership(
    state: &ApiState,
    actor_id: i64,
    blocks: &[DbBlock],
    denial_message: &str,
) -> Result<(), AppError> {
    let actor = member::get_member_by_id(&state.db_pool, actor_id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::Validation(messages::error::ACTOR_UNKNOWN.to_string()))?;

    if MemberRole::parse(&actor.role).is_some_and(|role| role.is_teamster())
        && blocks.iter().any(|block| block.created_by_id != actor_id)
    {
        return Err(AppError(CourtError::Authorization(
            denial_message.to_string(),
        )));
    }

    Ok(())
}
