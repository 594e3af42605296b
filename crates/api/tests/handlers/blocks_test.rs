use chrono::Utc;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use clubcourt_core::{
    conflict::{self, CoveringBlock, ReleaseAction, Slot},
    errors::CourtError,
    messages,
    models::{block::CreateBlocksRequest, member::MemberRole},
};
use clubcourt_db::models::{DbBlock, DbCoveringBlock};

use crate::test_utils::{
    date, make_active_reservation, make_block, make_member, make_reason,
    make_suspended_reservation, time, TestContext,
};
use clubcourt_api::middleware::error_handling::AppError;

// Test wrappers that mirror the block service's orchestration with the
// repository calls replaced by mocks.

async fn create_blocks_wrapper(
    ctx: &mut TestContext,
    request: CreateBlocksRequest,
    admin_id: i64,
) -> Result<(Vec<DbBlock>, usize), AppError> {
    if request.court_ids.is_empty() {
        return Err(AppError(CourtError::Validation(
            messages::error::BLOCK_NO_COURTS_SPECIFIED.to_string(),
        )));
    }

    let reason = ctx
        .reason_repo
        .get_reason_by_id(request.reason_id)
        .await?
        .filter(|reason| reason.is_active)
        .ok_or_else(|| {
            AppError(CourtError::Validation(
                messages::error::BLOCK_REASON_INVALID.to_string(),
            ))
        })?;

    let batch_id = Uuid::new_v4();
    let mut blocks = Vec::new();
    for &court_id in &request.court_ids {
        let block = ctx
            .block_repo
            .insert_block(
                court_id,
                request.date,
                request.start_time,
                request.end_time,
                request.reason_id,
                request.details.clone(),
                batch_id,
                admin_id,
            )
            .await?;
        blocks.push(block);
    }

    let mut affected = 0;
    for block in &blocks {
        let conflicting = ctx
            .reservation_repo
            .find_active_overlapping(block.court_id, block.date, block.start_time, block.end_time)
            .await?;
        for reservation in &conflicting {
            if reason.is_temporary {
                let text = conflict::suspension_reason(&reason.name, block.details.as_deref());
                ctx.reservation_repo
                    .mark_suspended(reservation.id, text, block.id)
                    .await?;
            } else {
                let text = conflict::cancellation_reason(&reason.name, block.details.as_deref());
                ctx.reservation_repo
                    .mark_cancelled(reservation.id, text)
                    .await?;
            }
            affected += 1;
        }
    }

    Ok((blocks, affected))
}

// Delete-path release: the block is going away, so there is no
// still-covered check.
async fn release_block_wrapper(
    ctx: &mut TestContext,
    block: &DbBlock,
) -> Result<Vec<i64>, AppError> {
    let suspended = ctx
        .reservation_repo
        .find_suspended_by_block(block.id)
        .await?;

    let mut restored = Vec::new();
    for reservation in &suspended {
        let covering: Vec<CoveringBlock> = ctx
            .block_repo
            .find_covering(
                reservation.court_id,
                reservation.date,
                reservation.start_time,
                block.id,
            )
            .await?
            .into_iter()
            .map(|other| CoveringBlock {
                block_id: other.id,
                is_temporary: other.is_temporary,
            })
            .collect();

        let slot = Slot {
            court_id: reservation.court_id,
            date: reservation.date,
            start_time: reservation.start_time,
        };
        match conflict::plan_release(slot, None, &covering) {
            ReleaseAction::KeepSuspended => {}
            ReleaseAction::Cancel => {
                ctx.reservation_repo
                    .mark_cancelled(
                        reservation.id,
                        conflict::PERMANENT_TAKEOVER_REASON.to_string(),
                    )
                    .await?;
            }
            ReleaseAction::Transfer { block_id } => {
                ctx.reservation_repo
                    .transfer_suspension(reservation.id, block_id)
                    .await?;
            }
            ReleaseAction::Restore => {
                ctx.reservation_repo.mark_restored(reservation.id).await?;
                restored.push(reservation.id);
            }
        }
    }

    Ok(restored)
}

async fn check_reason_permission_wrapper(
    ctx: &mut TestContext,
    actor_id: i64,
    reason_id: i64,
) -> Result<(), AppError> {
    let actor = ctx
        .member_repo
        .get_member_by_id(actor_id)
        .await?
        .ok_or_else(|| {
            AppError(CourtError::Validation(
                messages::error::ACTOR_UNKNOWN.to_string(),
            ))
        })?;

    if MemberRole::parse(&actor.role).is_some_and(|role| role.is_teamster()) {
        let reason = ctx.reason_repo.get_reason_by_id(reason_id).await?.ok_or_else(|| {
            AppError(CourtError::Validation(
                messages::error::BLOCK_REASON_INVALID.to_string(),
            ))
        })?;
        if !reason.teamster_usable {
            return Err(AppError(CourtError::Authorization(
                messages::error::BLOCK_REASON_NOT_ALLOWED.to_string(),
            )));
        }
    }

    Ok(())
}

fn create_request(court_ids: Vec<i64>, reason_id: i64) -> CreateBlocksRequest {
    CreateBlocksRequest {
        court_ids,
        date: date("2026-12-05"),
        start_time: time("08:00"),
        end_time: time("10:00"),
        reason_id,
        details: None,
    }
}

#[tokio::test]
async fn test_create_blocks_rejects_empty_court_list() {
    let mut ctx = TestContext::new();

    let result = create_blocks_wrapper(&mut ctx, create_request(vec![], 3), 1).await;

    let err = result.unwrap_err();
    assert!(matches!(err.0, CourtError::Validation(_)));
    assert!(err.0.to_string().contains("Mindestens ein Platz"));
}

#[tokio::test]
async fn test_create_blocks_rejects_unknown_reason() {
    let mut ctx = TestContext::new();
    ctx.reason_repo
        .expect_get_reason_by_id()
        .with(predicate::eq(99))
        .returning(|_| Ok(None));

    let result = create_blocks_wrapper(&mut ctx, create_request(vec![1], 99), 1).await;

    let err = result.unwrap_err();
    assert!(err.0.to_string().contains("Ungültiger Sperrungsgrund"));
}

#[tokio::test]
async fn test_create_blocks_rejects_inactive_reason() {
    let mut ctx = TestContext::new();
    ctx.reason_repo.expect_get_reason_by_id().returning(|id| {
        let mut reason = make_reason(id, "Maintenance", false);
        reason.is_active = false;
        Ok(Some(reason))
    });

    let result = create_blocks_wrapper(&mut ctx, create_request(vec![1], 3), 1).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_temporary_reason_suspends_covered_reservation() {
    let mut ctx = TestContext::new();

    ctx.reason_repo
        .expect_get_reason_by_id()
        .with(predicate::eq(3))
        .returning(|id| Ok(Some(make_reason(id, "Weather", true))));

    ctx.block_repo.expect_insert_block().times(2).returning(
        |court_id, date, start, end, reason_id, details, batch_id, admin_id| {
            Ok(DbBlock {
                id: 100 + court_id,
                court_id,
                date,
                start_time: start,
                end_time: end,
                reason_id,
                details,
                batch_id,
                created_by_id: admin_id,
                created_at: Utc::now(),
            })
        },
    );

    // One active reservation on court 1 at 08:00; court 2 is free.
    ctx.reservation_repo
        .expect_find_active_overlapping()
        .withf(|&court_id, _, _, _| court_id == 1)
        .returning(|_, _, _, _| {
            Ok(vec![make_active_reservation(11, 1, "2026-12-05", "08:00", "09:00")])
        });
    ctx.reservation_repo
        .expect_find_active_overlapping()
        .withf(|&court_id, _, _, _| court_id == 2)
        .returning(|_, _, _, _| Ok(vec![]));

    ctx.reservation_repo
        .expect_mark_suspended()
        .withf(|&id, reason, &block_id| {
            id == 11 && reason == "Vorübergehend gesperrt wegen Weather" && block_id == 101
        })
        .times(1)
        .returning(|_, _, _| Ok(()));

    let (blocks, affected) =
        create_blocks_wrapper(&mut ctx, create_request(vec![1, 2], 3), 1)
            .await
            .unwrap();

    assert_eq!(blocks.len(), 2);
    assert_eq!(affected, 1);
}

#[tokio::test]
async fn test_permanent_reason_cancels_covered_reservation() {
    let mut ctx = TestContext::new();

    ctx.reason_repo
        .expect_get_reason_by_id()
        .with(predicate::eq(4))
        .returning(|id| Ok(Some(make_reason(id, "Maintenance", false))));

    ctx.block_repo.expect_insert_block().times(2).returning(
        |court_id, date, start, end, reason_id, details, batch_id, admin_id| {
            Ok(DbBlock {
                id: 200 + court_id,
                court_id,
                date,
                start_time: start,
                end_time: end,
                reason_id,
                details,
                batch_id,
                created_by_id: admin_id,
                created_at: Utc::now(),
            })
        },
    );

    ctx.reservation_repo
        .expect_find_active_overlapping()
        .withf(|&court_id, _, _, _| court_id == 1)
        .returning(|_, _, _, _| {
            Ok(vec![make_active_reservation(11, 1, "2026-12-05", "08:00", "09:00")])
        });
    ctx.reservation_repo
        .expect_find_active_overlapping()
        .withf(|&court_id, _, _, _| court_id == 2)
        .returning(|_, _, _, _| Ok(vec![]));

    // Cancellation text runs through the localized reason mapping.
    ctx.reservation_repo
        .expect_mark_cancelled()
        .withf(|&id, reason| id == 11 && reason == "Platzsperre wegen Wartung")
        .times(1)
        .returning(|_, _| Ok(()));

    let (blocks, affected) =
        create_blocks_wrapper(&mut ctx, create_request(vec![1, 2], 4), 1)
            .await
            .unwrap();

    // The audit entry for this scenario records blocks_created=2 and
    // reservations_cancelled=1.
    assert_eq!(blocks.len(), 2);
    assert_eq!(affected, 1);
}

#[tokio::test]
async fn test_deleting_block_restores_its_suspension() {
    let mut ctx = TestContext::new();
    let block = make_block(5, 1, "2026-12-05", "08:00", "10:00", 3, Uuid::new_v4());

    ctx.reservation_repo
        .expect_find_suspended_by_block()
        .with(predicate::eq(5))
        .returning(|block_id| {
            Ok(vec![make_suspended_reservation(
                11, 1, "2026-12-05", "08:00", "09:00", block_id,
            )])
        });
    ctx.block_repo
        .expect_find_covering()
        .returning(|_, _, _, _| Ok(vec![]));
    ctx.reservation_repo
        .expect_mark_restored()
        .with(predicate::eq(11))
        .times(1)
        .returning(|_| Ok(()));

    let restored = release_block_wrapper(&mut ctx, &block).await.unwrap();

    assert_eq!(restored, vec![11]);
}

#[tokio::test]
async fn test_deleting_block_transfers_suspension_to_lowest_id() {
    let mut ctx = TestContext::new();
    let block = make_block(5, 1, "2026-12-05", "08:00", "10:00", 3, Uuid::new_v4());

    ctx.reservation_repo
        .expect_find_suspended_by_block()
        .returning(|block_id| {
            Ok(vec![make_suspended_reservation(
                11, 1, "2026-12-05", "08:00", "09:00", block_id,
            )])
        });
    ctx.block_repo.expect_find_covering().returning(|_, _, _, _| {
        Ok(vec![
            DbCoveringBlock {
                id: 9,
                is_temporary: true,
            },
            DbCoveringBlock {
                id: 7,
                is_temporary: true,
            },
        ])
    });
    ctx.reservation_repo
        .expect_transfer_suspension()
        .with(predicate::eq(11), predicate::eq(7))
        .times(1)
        .returning(|_, _| Ok(()));

    let restored = release_block_wrapper(&mut ctx, &block).await.unwrap();

    // The booking stays suspended, just under a different block.
    assert!(restored.is_empty());
}

#[tokio::test]
async fn test_deleting_block_cancels_when_permanent_block_covers() {
    let mut ctx = TestContext::new();
    let block = make_block(5, 1, "2026-12-05", "08:00", "10:00", 3, Uuid::new_v4());

    ctx.reservation_repo
        .expect_find_suspended_by_block()
        .returning(|block_id| {
            Ok(vec![make_suspended_reservation(
                11, 1, "2026-12-05", "08:00", "09:00", block_id,
            )])
        });
    ctx.block_repo.expect_find_covering().returning(|_, _, _, _| {
        Ok(vec![
            DbCoveringBlock {
                id: 9,
                is_temporary: true,
            },
            DbCoveringBlock {
                id: 2,
                is_temporary: false,
            },
        ])
    });
    ctx.reservation_repo
        .expect_mark_cancelled()
        .withf(|&id, reason| id == 11 && reason == conflict::PERMANENT_TAKEOVER_REASON)
        .times(1)
        .returning(|_, _| Ok(()));

    let restored = release_block_wrapper(&mut ctx, &block).await.unwrap();

    assert!(restored.is_empty());
}

#[tokio::test]
async fn test_teamster_cannot_use_restricted_reason() {
    let mut ctx = TestContext::new();

    ctx.member_repo
        .expect_get_member_by_id()
        .with(predicate::eq(7))
        .returning(|id| Ok(Some(make_member(id, "teamster"))));
    // make_reason defaults to teamster_usable = false
    ctx.reason_repo
        .expect_get_reason_by_id()
        .returning(|id| Ok(Some(make_reason(id, "Championship", false))));

    let result = check_reason_permission_wrapper(&mut ctx, 7, 3).await;

    let err = result.unwrap_err();
    assert!(matches!(err.0, CourtError::Authorization(_)));
}

#[tokio::test]
async fn test_administrator_may_use_any_reason() {
    let mut ctx = TestContext::new();

    ctx.member_repo
        .expect_get_member_by_id()
        .returning(|id| Ok(Some(make_member(id, "administrator"))));
    // No reason lookup expected for administrators.

    let result = check_reason_permission_wrapper(&mut ctx, 1, 3).await;

    assert!(result.is_ok());
}
