//! Task and column lifecycle through the board service.

use std::sync::Arc;

use super::helpers::{column, open_service, store};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemorySnapshotStore,
    domain::{
        BoardDomainError, BoardErrorKind, ColumnPatch, MoveTask, NewColumn, NewTask, Priority,
        TaskPatch, WipLimit,
    },
    services::BoardServiceError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_moves_survive_reopening(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    let todo = column(&service, "To Do").await?;
    let doing = column(&service, "Doing").await?;
    let first = service.create_task(NewTask::new("First")).await?;
    let second = service.create_task(NewTask::new("Second")).await?;

    let outcome = service
        .move_task(MoveTask::new(second.id(), todo, doing, 0))
        .await?;
    eyre::ensure!(outcome.index == 0, "expected head placement");

    let reopened = open_service(&store).await?;
    let board = reopened.board().await;
    eyre::ensure!(board.column_of(first.id()) == Some(todo), "first stays in To Do");
    eyre::ensure!(board.column_of(second.id()) == Some(doing), "second moved to Doing");
    eyre::ensure!(board.check_invariants().is_ok(), "reloaded board is consistent");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_and_priority_are_persisted(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    let task = service.create_task(NewTask::new("Draft")).await?;

    let updated = service
        .update_task(
            task.id(),
            TaskPatch::new()
                .with_title("Final")
                .with_priority(Priority::Urgent),
        )
        .await?;

    let reopened = open_service(&store).await?;
    eyre::ensure!(
        reopened.board().await.task(task.id()) == Some(&updated),
        "reloaded task matches the edit"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn column_management_round_trip(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    let review = service
        .add_column(NewColumn::new("Review", "#a855f7"))
        .await?;
    let limited = service
        .update_column(
            review.id(),
            ColumnPatch::new().with_wip_limit(WipLimit::new(2)?),
        )
        .await?;
    eyre::ensure!(limited.wip_limit().map(WipLimit::get) == Some(2), "limit applied");

    let mut order = service.board().await.column_order().to_vec();
    order.reverse();
    service.reorder_columns(order.clone()).await?;
    service.set_default_column(Some(review.id())).await?;
    let task = service.create_task(NewTask::new("Lands in review")).await?;

    let board = open_service(&store).await?.board().await;
    eyre::ensure!(board.column_order() == order.as_slice(), "order persisted");
    eyre::ensure!(
        board.column_of(task.id()) == Some(review.id()),
        "default column persisted"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn domain_errors_surface_with_their_kind(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;

    let result = service.create_task(NewTask::new("   ")).await;

    let Err(BoardServiceError::Domain(err)) = result else {
        return Err(eyre::eyre!("expected a domain error, got {result:?}"));
    };
    eyre::ensure!(err == BoardDomainError::EmptyTaskTitle, "unexpected error {err}");
    eyre::ensure!(err.kind() == BoardErrorKind::Validation, "unexpected kind");
    eyre::ensure!(
        store.save_count().map_err(|e| eyre::eyre!("{e}"))? == 1,
        "rejected mutation was saved"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_restore_and_cleanup(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    let kept = service.create_task(NewTask::new("Kept")).await?;
    let dropped = service.create_task(NewTask::new("Dropped")).await?;
    service.archive_task(kept.id()).await?;
    service.archive_task(dropped.id()).await?;

    let restored = service.restore_task(kept.id()).await?;
    eyre::ensure!(restored == kept, "round trip keeps fields");
    service.delete_archived_task(dropped.id()).await?;
    eyre::ensure!(service.clear_archive().await? == 0, "archive already empty");
    eyre::ensure!(service.archive().await.is_empty(), "archive is empty");

    service.delete_task(kept.id()).await?;
    eyre::ensure!(
        open_service(&store).await?.board().await.active_task_count() == 0,
        "deletion persisted"
    );
    Ok(())
}
