//! Tracker synchronization rounds through the board service.

use std::sync::Arc;

use super::helpers::{column, open_service, store};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::{InMemorySnapshotStore, InMemoryTrackerSource},
    domain::{ExternalKey, TaskOrigin, TrackerCandidate, TrackerItemKind},
    ports::TrackerError,
};

fn issue(key: &str, title: &str) -> TrackerCandidate {
    TrackerCandidate::new(
        key,
        title,
        TrackerItemKind::Issue,
        format!("https://tracker.test/{key}"),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_rounds_do_not_duplicate_tasks(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    let source = InMemoryTrackerSource::new(vec![issue("gh#42", "Fix bug upstream")]);

    let first = service.sync_from(&source).await?;
    let after_first = service.board().await;
    let second = service.sync_from(&source).await?;

    eyre::ensure!(first.created == 1, "first round creates the task");
    eyre::ensure!(second.created == 0 && second.unchanged == 1, "second round is a no-op");
    eyre::ensure!(service.board().await == after_first, "board unchanged");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tracker_outage_keeps_the_board(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    let source = InMemoryTrackerSource::new(vec![issue("gh#1", "One")]);
    service.sync_from(&source).await?;
    source.fail_with(TrackerError::Unavailable("timeout".to_owned()));

    let summary = service.sync_from(&source).await?;

    eyre::ensure!(summary.is_noop(), "outage is an empty round");
    eyre::ensure!(service.board().await.active_task_count() == 1, "task kept");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inbox_column_receives_new_items(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    let done = column(&service, "Done").await?;
    service.set_inbox_column(Some(done)).await?;
    let source = InMemoryTrackerSource::default();
    source.set_candidates(vec![
        issue("gh#7", "Triage me"),
        TrackerCandidate::new("gh#8", "Review me", TrackerItemKind::PullRequest, ""),
    ]);

    service.sync_from(&source).await?;

    let board = service.board().await;
    let pull = board
        .find_by_external_ref(&ExternalKey::new("gh#8")?)
        .ok_or_else(|| eyre::eyre!("pull request synced"))?;
    eyre::ensure!(pull.origin() == TaskOrigin::TrackerPr, "origin recorded");
    eyre::ensure!(board.column_of(pull.id()) == Some(done), "placed in inbox");
    eyre::ensure!(
        board.column(done).map(|found| found.len()) == Some(2),
        "both items in inbox"
    );
    Ok(())
}
