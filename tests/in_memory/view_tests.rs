//! Filtered views, archive listing and suggestions through the service.

use std::sync::Arc;

use super::helpers::{column, open_service, store};
use rstest::rstest;
use taskboard::board::{
    adapters::memory::InMemorySnapshotStore,
    domain::{BulkOperation, ColumnPatch, NewTask, Priority, TaskFilter, WipLimit},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_and_bulk_priority(store: Arc<InMemorySnapshotStore>) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    let alpha = service.create_task(NewTask::new("Alpha report")).await?;
    let beta = service.create_task(NewTask::new("Beta report")).await?;
    service.create_task(NewTask::new("Gamma")).await?;

    let outcome = service
        .bulk_apply(
            &[alpha.id(), beta.id()],
            BulkOperation::SetPriority(Priority::High),
        )
        .await?;
    eyre::ensure!(outcome.is_complete(), "bulk priority succeeded");

    let high = service
        .query(&TaskFilter::new().with_priority(Priority::High))
        .await;
    let reports = service.query(&TaskFilter::new().with_text("REPORT")).await;
    eyre::ensure!(high.len() == 2, "two high-priority tasks");
    eyre::ensure!(reports == high, "same tasks in board order");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn suggestions_follow_the_workload(
    store: Arc<InMemorySnapshotStore>,
) -> Result<(), eyre::Report> {
    let service = open_service(&store).await?;
    eyre::ensure!(service.suggestions().await.is_empty(), "empty board is quiet");

    let doing = column(&service, "Doing").await?;
    service
        .update_column(doing, ColumnPatch::new().with_wip_limit(WipLimit::new(2)?))
        .await?;
    for title in ["Fix login bug", "Crash on save bug"] {
        service
            .create_task(NewTask::new(title).in_column(doing))
            .await?;
    }

    let suggestions = service.suggestions().await;
    let top = suggestions
        .first()
        .ok_or_else(|| eyre::eyre!("expected a suggestion"))?;
    eyre::ensure!(top.title == "Bugs", "unexpected suggestion {}", top.title);
    eyre::ensure!(top.reason.contains("Doing"), "reason names the congested column");
    Ok(())
}
