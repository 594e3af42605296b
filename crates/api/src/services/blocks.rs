//! The block service.
//!
//! Creating, updating and deleting court blocks drags existing reservations
//! along: a permanent reason cancels every covered booking, a temporary one
//! suspends it, and moving or removing a temporary block releases its
//! suspensions again (restore, hand over to another covering block, or
//! cancel when a permanent block has taken the slot in the meantime — see
//! `clubcourt_core::conflict` for the decision rules).
//!
//! Every operation runs in one transaction: either all of a block's effects
//! land or none do. Notifications and the block audit entry are dispatched
//! best-effort after the fact; their failures are logged and never abort
//! the operation.

use std::collections::HashSet;

use sqlx::{PgPool, Postgres, Transaction};
use tracing::{error, info, warn};
use uuid::Uuid;

use clubcourt_core::{
    conflict::{self, CoveringBlock, ReleaseAction},
    errors::{CourtError, CourtResult},
    messages,
    models::{
        audit::{
            AuditLogFilter, BlockAuditPayload, BlockCreateAudit, BlockDeleteAudit,
            BlockUpdateAudit, ReservationTransitionAudit, TransitionKind,
        },
        block::{Coverage, CreateBlocksRequest, UpdateBatchRequest, UpdateBlockRequest},
    },
    notify::Notifier,
};
use clubcourt_db::{
    models::{DbBlock, DbBlockAuditLog, DbReservation},
    repositories::{audit, block, block_reason, court, member, reservation},
};

fn db_err(err: sqlx::Error) -> CourtError {
    CourtError::Database(err.into())
}

fn json_err(err: serde_json::Error) -> CourtError {
    CourtError::Internal(Box::new(err))
}

/// Trim free-text details; an empty result counts as no details.
fn normalize_details(details: Option<&str>) -> Option<String> {
    details
        .map(str::trim)
        .filter(|details| !details.is_empty())
        .map(str::to_string)
}

/// Create one block per court, all sharing a fresh batch id, and apply the
/// conflict policy of the reason to every covered active reservation.
pub async fn create_blocks(
    pool: &PgPool,
    notifier: &dyn Notifier,
    request: &CreateBlocksRequest,
    admin_id: i64,
) -> CourtResult<Vec<DbBlock>> {
    if request.court_ids.is_empty() {
        return Err(CourtError::Validation(
            messages::error::BLOCK_NO_COURTS_SPECIFIED.to_string(),
        ));
    }
    if request.start_time >= request.end_time {
        return Err(CourtError::Validation(
            messages::error::BLOCK_END_BEFORE_START.to_string(),
        ));
    }

    let reason = block_reason::get_reason_by_id(pool, request.reason_id)
        .await
        .map_err(CourtError::Database)?
        .filter(|reason| reason.is_active)
        .ok_or_else(|| {
            CourtError::Validation(messages::error::BLOCK_REASON_INVALID.to_string())
        })?;

    let details = normalize_details(request.details.as_deref());
    let batch_id = Uuid::new_v4();

    let mut tx = pool.begin().await.map_err(db_err)?;

    let mut blocks = Vec::with_capacity(request.court_ids.len());
    for &court_id in &request.court_ids {
        let created = block::insert_block(
            &mut *tx,
            court_id,
            request.date,
            request.start_time,
            request.end_time,
            request.reason_id,
            details.as_deref(),
            batch_id,
            admin_id,
        )
        .await
        .map_err(CourtError::Database)?;
        blocks.push(created);
    }

    let mut affected = 0usize;
    for created in &blocks {
        let touched = if reason.is_temporary {
            suspend_conflicting(&mut tx, notifier, created, &reason.name, admin_id).await?
        } else {
            cancel_conflicting(&mut tx, notifier, created, &reason.name, admin_id).await?
        };
        affected += touched.len();
    }

    tx.commit().await.map_err(db_err)?;

    let court_numbers = court_numbers_for_audit(pool, &request.court_ids).await;
    log_block_operation(
        pool,
        &BlockAuditPayload::Create(BlockCreateAudit {
            court_ids: request.court_ids.clone(),
            court_numbers,
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            reason_id: request.reason_id,
            reason_name: Some(reason.name.clone()),
            is_temporary: reason.is_temporary,
            details: details.clone(),
            blocks_created: blocks.len(),
            reservations_suspended: reason.is_temporary.then_some(affected),
            reservations_cancelled: (!reason.is_temporary).then_some(affected),
        }),
        Some(admin_id),
    )
    .await;

    let reservation_action = if reason.is_temporary {
        "suspended"
    } else {
        "cancelled"
    };
    info!(
        "Multi-court blocks created: {} blocks for {} courts, {} {} reservations",
        blocks.len(),
        request.court_ids.len(),
        reservation_action,
        affected
    );

    Ok(blocks)
}

/// Update a single block instance.
///
/// `skip_audit_log` suppresses the per-block audit entry for callers that
/// log a batch-wide entry themselves.
pub async fn update_single_instance(
    pool: &PgPool,
    notifier: &dyn Notifier,
    block_id: i64,
    updates: &UpdateBlockRequest,
    admin_id: i64,
    skip_audit_log: bool,
) -> CourtResult<()> {
    let mut tx = pool.begin().await.map_err(db_err)?;
    let updated = apply_block_update(&mut tx, notifier, block_id, updates, admin_id).await?;
    tx.commit().await.map_err(db_err)?;

    if !skip_audit_log {
        let reason_name = match block_reason::get_reason_by_id(pool, updated.reason_id).await {
            Ok(reason) => reason.map(|reason| reason.name),
            Err(err) => {
                error!("Failed to resolve reason name for audit log: {err}");
                None
            }
        };
        let court_numbers = court_numbers_for_audit(pool, &[updated.court_id]).await;
        log_block_operation(
            pool,
            &BlockAuditPayload::Update(BlockUpdateAudit {
                block_id: Some(updated.id),
                batch_id: None,
                date: updated.date,
                start_time: updated.start_time,
                end_time: updated.end_time,
                court_numbers,
                reason_name,
                details: updated.details.clone(),
            }),
            Some(admin_id),
        )
        .await;
    }

    info!("Updated single block instance {block_id}");

    Ok(())
}

/// Reconcile a batch against a new target state: blocks for courts no
/// longer listed are removed (releasing their suspensions), kept blocks
/// are updated in place, and newly listed courts get blocks under the
/// same batch id. Returns the number of blocks in the updated batch.
pub async fn update_batch(
    pool: &PgPool,
    notifier: &dyn Notifier,
    batch_id: Uuid,
    request: &UpdateBatchRequest,
    admin_id: i64,
) -> CourtResult<usize> {
    if request.court_ids.is_empty() {
        return Err(CourtError::Validation(
            messages::error::BLOCK_NO_COURTS_SPECIFIED.to_string(),
        ));
    }
    if request.start_time >= request.end_time {
        return Err(CourtError::Validation(
            messages::error::BLOCK_END_BEFORE_START.to_string(),
        ));
    }

    let reason = block_reason::get_reason_by_id(pool, request.reason_id)
        .await
        .map_err(CourtError::Database)?
        .filter(|reason| reason.is_active)
        .ok_or_else(|| {
            CourtError::Validation(messages::error::BLOCK_REASON_INVALID.to_string())
        })?;

    let details = normalize_details(request.details.as_deref());

    let mut tx = pool.begin().await.map_err(db_err)?;

    let existing = block::get_blocks_by_batch(&mut *tx, batch_id)
        .await
        .map_err(CourtError::Database)?;
    if existing.is_empty() {
        return Err(CourtError::NotFound(
            messages::error::BLOCK_BATCH_NOT_FOUND.to_string(),
        ));
    }

    let existing_courts: HashSet<i64> = existing.iter().map(|b| b.court_id).collect();
    let target_courts: HashSet<i64> = request.court_ids.iter().copied().collect();

    // Unblock courts dropped from the batch. Their suspensions are released
    // through the same planner as a deletion.
    for dropped in existing
        .iter()
        .filter(|b| !target_courts.contains(&b.court_id))
    {
        release_suspended(&mut tx, notifier, dropped, None, admin_id).await?;
        block::delete_block(&mut *tx, dropped.id)
            .await
            .map_err(CourtError::Database)?;
    }

    // Update kept blocks in place. An absent `details` in the request means
    // "clear", so the update always carries a value (empty clears).
    let updates = UpdateBlockRequest {
        court_id: None,
        date: Some(request.date),
        start_time: Some(request.start_time),
        end_time: Some(request.end_time),
        reason_id: Some(request.reason_id),
        details: Some(request.details.clone().unwrap_or_default()),
    };
    for kept in existing
        .iter()
        .filter(|b| target_courts.contains(&b.court_id))
    {
        apply_block_update(&mut tx, notifier, kept.id, &updates, admin_id).await?;
    }

    // Block newly listed courts under the same batch id.
    let mut added_courts: Vec<i64> = target_courts
        .difference(&existing_courts)
        .copied()
        .collect();
    added_courts.sort_unstable();
    for court_id in added_courts {
        let created = block::insert_block(
            &mut *tx,
            court_id,
            request.date,
            request.start_time,
            request.end_time,
            request.reason_id,
            details.as_deref(),
            batch_id,
            admin_id,
        )
        .await
        .map_err(CourtError::Database)?;
        if reason.is_temporary {
            suspend_conflicting(&mut tx, notifier, &created, &reason.name, admin_id).await?;
        } else {
            cancel_conflicting(&mut tx, notifier, &created, &reason.name, admin_id).await?;
        }
    }

    tx.commit().await.map_err(db_err)?;

    let court_numbers = court_numbers_for_audit(pool, &request.court_ids).await;
    log_block_operation(
        pool,
        &BlockAuditPayload::Update(BlockUpdateAudit {
            block_id: None,
            batch_id: Some(batch_id),
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
            court_numbers,
            reason_name: Some(reason.name.clone()),
            details: details.clone(),
        }),
        Some(admin_id),
    )
    .await;

    let total = target_courts.len();
    info!("Batch updated: {batch_id}, {total} blocks by admin {admin_id}");

    Ok(total)
}

/// Delete all blocks in a batch, releasing every suspension they hold.
pub async fn delete_batch(
    pool: &PgPool,
    notifier: &dyn Notifier,
    batch_id: Uuid,
    admin_id: i64,
) -> CourtResult<()> {
    let mut tx = pool.begin().await.map_err(db_err)?;

    let blocks = block::get_blocks_by_batch(&mut *tx, batch_id)
        .await
        .map_err(CourtError::Database)?;
    let Some(first) = blocks.first() else {
        return Err(CourtError::NotFound(
            messages::error::BLOCK_BATCH_NOT_FOUND.to_string(),
        ));
    };

    // Capture the audit summary before the rows disappear.
    let summary_date = first.date;
    let summary_start = first.start_time;
    let summary_end = first.end_time;
    let summary_details = first.details.clone();
    let reason = block_reason::get_reason_by_id(&mut *tx, first.reason_id)
        .await
        .map_err(CourtError::Database)?;
    let (reason_name, is_temporary) = match &reason {
        Some(reason) => (Some(reason.name.clone()), reason.is_temporary),
        None => (None, false),
    };
    let court_ids: Vec<i64> = blocks.iter().map(|b| b.court_id).collect();

    // Release every suspension held by the batch. For blocks that were
    // permanent from the start this finds nothing; it also frees
    // reservations still attached after a reason was edited from temporary
    // to permanent.
    let mut restored_count = 0usize;
    for doomed in &blocks {
        let restored = release_suspended(&mut tx, notifier, doomed, None, admin_id).await?;
        restored_count += restored.len();
    }

    block::delete_blocks_by_batch(&mut *tx, batch_id)
        .await
        .map_err(CourtError::Database)?;

    tx.commit().await.map_err(db_err)?;

    let court_numbers = court_numbers_for_audit(pool, &court_ids).await;
    log_block_operation(
        pool,
        &BlockAuditPayload::Delete(BlockDeleteAudit {
            batch_id,
            date: summary_date,
            start_time: summary_start,
            end_time: summary_end,
            court_numbers,
            reason_name,
            is_temporary,
            details: summary_details,
            reservations_restored: (restored_count > 0).then_some(restored_count),
        }),
        Some(admin_id),
    )
    .await;

    info!(
        "Batch deleted: {batch_id}, {} blocks by admin {admin_id}{}",
        blocks.len(),
        if restored_count > 0 {
            format!(", restored {restored_count} reservations")
        } else {
            String::new()
        }
    );

    Ok(())
}

/// Preview the reservations a block over the given courts and window would
/// affect. Read-only; uses the same overlap predicate as the apply paths so
/// previewed counts match actual effects.
pub async fn preview_conflicts(
    pool: &PgPool,
    court_ids: &[i64],
    date: chrono::NaiveDate,
    start_time: chrono::NaiveTime,
    end_time: chrono::NaiveTime,
) -> CourtResult<Vec<DbReservation>> {
    if court_ids.is_empty() {
        return Ok(Vec::new());
    }

    reservation::find_active_overlapping_courts(pool, court_ids, date, start_time, end_time)
        .await
        .map_err(CourtError::Database)
}

/// Query the block audit trail, newest first.
pub async fn get_audit_log(
    pool: &PgPool,
    filter: &AuditLogFilter,
) -> CourtResult<Vec<DbBlockAuditLog>> {
    audit::query_block_audit(
        pool,
        filter.admin_id,
        filter.operation.map(|operation| operation.as_str()),
        filter.from,
        filter.until,
    )
    .await
    .map_err(CourtError::Database)
}

/// Append one block audit entry, with the actor's role injected into the
/// payload. Skips with a warning when no actor is known; a failed write is
/// reported but never fails the operation that triggered it.
pub async fn log_block_operation(
    pool: &PgPool,
    payload: &BlockAuditPayload,
    admin_id: Option<i64>,
) {
    let Some(admin_id) = admin_id else {
        warn!("admin id missing for block operation logging, skipping audit log");
        return;
    };

    if let Err(err) = write_audit_entry(pool, payload, admin_id).await {
        error!("Failed to log block operation: {err}");
    }
}

async fn write_audit_entry(
    pool: &PgPool,
    payload: &BlockAuditPayload,
    admin_id: i64,
) -> eyre::Result<()> {
    let admin = member::get_member_by_id(pool, admin_id).await?;

    let mut data = serde_json::to_value(payload)?;
    if let (Some(admin), Some(object)) = (&admin, data.as_object_mut()) {
        object.insert(
            "admin_role".to_string(),
            serde_json::Value::String(admin.role.clone()),
        );
    }

    audit::insert_block_audit(
        pool,
        payload.operation().as_str(),
        payload.block_id(),
        &data,
        admin_id,
    )
    .await?;

    info!(
        "Block operation logged: {} by {} {}",
        payload.operation().as_str(),
        admin
            .map(|admin| admin.role)
            .unwrap_or_else(|| "unknown".to_string()),
        admin_id
    );

    Ok(())
}

// ── Transaction-scoped pieces ───────────────────────────────────────────

/// Load the block, apply the field updates and run the conflict engine for
/// the transition from its old to its new state. Shared by the single and
/// batch update paths; the caller owns the transaction and the audit entry.
async fn apply_block_update(
    tx: &mut Transaction<'_, Postgres>,
    notifier: &dyn Notifier,
    block_id: i64,
    updates: &UpdateBlockRequest,
    admin_id: i64,
) -> CourtResult<DbBlock> {
    let old = block::get_block_by_id(&mut **tx, block_id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| CourtError::NotFound(messages::error::BLOCK_NOT_FOUND.to_string()))?;

    // Temporariness of the reason before the update decides whether
    // suspended reservations need releasing afterwards.
    let old_is_temporary = match block_reason::get_reason_by_id(&mut **tx, old.reason_id)
        .await
        .map_err(CourtError::Database)?
    {
        Some(reason) => reason.is_temporary,
        None => false,
    };

    let new_court_id = updates.court_id.unwrap_or(old.court_id);
    let new_date = updates.date.unwrap_or(old.date);
    let new_start_time = updates.start_time.unwrap_or(old.start_time);
    let new_end_time = updates.end_time.unwrap_or(old.end_time);
    let new_reason_id = updates.reason_id.unwrap_or(old.reason_id);
    let new_details = match updates.details.as_deref() {
        Some(details) => normalize_details(Some(details)),
        None => old.details.clone(),
    };

    if new_start_time >= new_end_time {
        return Err(CourtError::Validation(
            messages::error::BLOCK_END_BEFORE_START.to_string(),
        ));
    }

    let new_reason = block_reason::get_reason_by_id(&mut **tx, new_reason_id)
        .await
        .map_err(CourtError::Database)?
        .ok_or_else(|| {
            CourtError::Validation(messages::error::BLOCK_REASON_INVALID.to_string())
        })?;

    let updated = block::update_block(
        &mut **tx,
        block_id,
        new_court_id,
        new_date,
        new_start_time,
        new_end_time,
        new_reason_id,
        new_details.as_deref(),
    )
    .await
    .map_err(CourtError::Database)?;

    let coverage_changed = new_court_id != old.court_id
        || new_date != old.date
        || new_start_time != old.start_time
        || new_end_time != old.end_time;
    let reason_changed = updates.reason_id.is_some();

    if coverage_changed || reason_changed {
        // Release reservations the block no longer covers before applying
        // the effects of its new position.
        if old_is_temporary && coverage_changed {
            release_suspended(tx, notifier, &updated, Some(&updated.coverage()), admin_id)
                .await?;
        }

        if new_reason.is_temporary {
            suspend_conflicting(tx, notifier, &updated, &new_reason.name, admin_id).await?;
        } else {
            cancel_conflicting(tx, notifier, &updated, &new_reason.name, admin_id).await?;
        }
    }

    Ok(updated)
}

/// Cancel all active reservations the block covers. Returns the cancelled
/// reservations.
async fn cancel_conflicting(
    tx: &mut Transaction<'_, Postgres>,
    notifier: &dyn Notifier,
    covering: &DbBlock,
    reason_name: &str,
    performed_by: i64,
) -> CourtResult<Vec<DbReservation>> {
    let conflicting = reservation::find_active_overlapping(
        &mut **tx,
        covering.court_id,
        covering.date,
        covering.start_time,
        covering.end_time,
    )
    .await
    .map_err(CourtError::Database)?;

    let cancellation_reason =
        conflict::cancellation_reason(reason_name, covering.details.as_deref());

    for conflicted in &conflicting {
        reservation::mark_cancelled(&mut **tx, conflicted.id, &cancellation_reason)
            .await
            .map_err(CourtError::Database)?;

        log_reservation_transition(
            tx,
            TransitionKind::Cancel,
            conflicted,
            Some(&cancellation_reason),
            Some(covering.id),
            performed_by,
        )
        .await?;

        if let Err(err) = notifier
            .booking_cancelled(&conflicted.notice(), &cancellation_reason)
            .await
        {
            error!(
                "Failed to send cancellation notification for reservation {}: {err}",
                conflicted.id
            );
        }
    }

    Ok(conflicting)
}

/// Suspend all active reservations the block covers. Suspended reservations
/// can be restored when the block is removed. Returns the suspended
/// reservations.
async fn suspend_conflicting(
    tx: &mut Transaction<'_, Postgres>,
    notifier: &dyn Notifier,
    covering: &DbBlock,
    reason_name: &str,
    performed_by: i64,
) -> CourtResult<Vec<DbReservation>> {
    let conflicting = reservation::find_active_overlapping(
        &mut **tx,
        covering.court_id,
        covering.date,
        covering.start_time,
        covering.end_time,
    )
    .await
    .map_err(CourtError::Database)?;

    let suspension_reason =
        conflict::suspension_reason(reason_name, covering.details.as_deref());

    for conflicted in &conflicting {
        reservation::mark_suspended(&mut **tx, conflicted.id, &suspension_reason, covering.id)
            .await
            .map_err(CourtError::Database)?;

        log_reservation_transition(
            tx,
            TransitionKind::Suspend,
            conflicted,
            Some(&suspension_reason),
            Some(covering.id),
            performed_by,
        )
        .await?;

        if let Err(err) = notifier
            .booking_suspended(&conflicted.notice(), &suspension_reason)
            .await
        {
            error!(
                "Failed to send suspension notification for reservation {}: {err}",
                conflicted.id
            );
        }
    }

    Ok(conflicting)
}

/// Release the reservations a block suspended, after the block shrank its
/// coverage (`current` = the post-update window) or is being removed
/// (`current` = `None`). Returns the reservations restored to active;
/// transfers and takeover cancellations are not part of the count.
async fn release_suspended(
    tx: &mut Transaction<'_, Postgres>,
    notifier: &dyn Notifier,
    releasing: &DbBlock,
    current: Option<&Coverage>,
    performed_by: i64,
) -> CourtResult<Vec<DbReservation>> {
    let suspended = reservation::find_suspended_by_block(&mut **tx, releasing.id)
        .await
        .map_err(CourtError::Database)?;

    let mut restored = Vec::new();

    for held in &suspended {
        let covering: Vec<CoveringBlock> =
            block::find_covering(&mut **tx, held.court_id, held.date, held.start_time, releasing.id)
                .await
                .map_err(CourtError::Database)?
                .into_iter()
                .map(|other| CoveringBlock {
                    block_id: other.id,
                    is_temporary: other.is_temporary,
                })
                .collect();

        match conflict::plan_release(held.slot(), current, &covering) {
            ReleaseAction::KeepSuspended => {}
            ReleaseAction::Cancel => {
                reservation::mark_cancelled(
                    &mut **tx,
                    held.id,
                    conflict::PERMANENT_TAKEOVER_REASON,
                )
                .await
                .map_err(CourtError::Database)?;

                log_reservation_transition(
                    tx,
                    TransitionKind::Cancel,
                    held,
                    Some(conflict::PERMANENT_TAKEOVER_AUDIT_NOTE),
                    None,
                    performed_by,
                )
                .await?;

                if let Err(err) = notifier
                    .booking_cancelled(&held.notice(), conflict::PERMANENT_TAKEOVER_REASON)
                    .await
                {
                    error!(
                        "Failed to send cancellation notification for reservation {}: {err}",
                        held.id
                    );
                }
            }
            ReleaseAction::Transfer { block_id } => {
                // Silent handover: no notification, no audit entry.
                reservation::transfer_suspension(&mut **tx, held.id, block_id)
                    .await
                    .map_err(CourtError::Database)?;
            }
            ReleaseAction::Restore => {
                reservation::mark_restored(&mut **tx, held.id)
                    .await
                    .map_err(CourtError::Database)?;

                log_reservation_transition(
                    tx,
                    TransitionKind::Restore,
                    held,
                    None,
                    Some(releasing.id),
                    performed_by,
                )
                .await?;

                if let Err(err) = notifier.booking_restored(&held.notice()).await {
                    error!(
                        "Failed to send restoration notification for reservation {}: {err}",
                        held.id
                    );
                }

                restored.push(held.clone());
            }
        }
    }

    Ok(restored)
}

/// Append one reservation transition to the reservation audit trail, inside
/// the operation's transaction.
async fn log_reservation_transition(
    tx: &mut Transaction<'_, Postgres>,
    kind: TransitionKind,
    transitioned: &DbReservation,
    reason: Option<&str>,
    block_id: Option<i64>,
    performed_by: i64,
) -> CourtResult<()> {
    let payload = ReservationTransitionAudit {
        court_id: transitioned.court_id,
        date: transitioned.date,
        start_time: transitioned.start_time,
        reason: reason.map(str::to_string),
        booked_for_id: transitioned.booked_for_id,
        block_id,
        triggered_by_block: true,
    };
    let data = serde_json::to_value(&payload).map_err(json_err)?;

    audit::insert_reservation_audit(&mut **tx, kind.as_str(), transitioned.id, &data, performed_by)
        .await
        .map_err(CourtError::Database)?;

    Ok(())
}

/// Resolve court ids to sorted court numbers for an audit payload. Failures
/// degrade to an empty list rather than failing the committed operation.
async fn court_numbers_for_audit(pool: &PgPool, court_ids: &[i64]) -> Vec<i32> {
    match court::get_courts_by_ids(pool, court_ids).await {
        // Already ordered by number.
        Ok(courts) => courts.iter().map(|court| court.number).collect(),
        Err(err) => {
            error!("Failed to resolve court numbers for audit log: {err}");
            Vec::new()
        }
    }
}
