//! Unit tests for the board domain, adapters and service.


use crate::board::domain::{Board, BoardConfig, ColumnId, NewTask, Task};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use rstest::fixture;
use std::sync::atomic::{AtomicI64, Ordering};

#[fixture]
pub(super) fn clock() -> DefaultClock {
    DefaultClock
}

/// Clock that moves forward one second on every reading.
///
/// Starts well after wall-clock time so readings always follow timestamps
/// taken with [`DefaultClock`].
#[derive(Debug)]
pub(super) struct SteppingClock {
    next_second: AtomicI64,
}

impl SteppingClock {
    pub(super) fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next_second: AtomicI64::new(start.timestamp()),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let second = self.next_second.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(second, 0)
            .single()
            .expect("stepped timestamp is in range")
    }
}

#[fixture]
pub(super) fn stepping_clock() -> SteppingClock {
    SteppingClock::starting_at(
        Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0)
            .single()
            .expect("valid start instant"),
    )
}

/// Board seeded with the default To Do / Doing / Done columns.
#[fixture]
pub(super) fn board() -> Board {
    Board::seeded(BoardConfig::default()).expect("default columns are valid")
}

pub(super) fn column_id(board: &Board, title: &str) -> ColumnId {
    board
        .find_column_by_title(title)
        .map(crate::board::domain::Column::id)
        .unwrap_or_else(|| panic!("column {title} should exist"))
}

pub(super) fn add_task(board: &mut Board, title: &str, column: &str) -> Task {
    let request = NewTask::new(title).in_column(column_id(board, column));
    board
        .create_task(&request, &DefaultClock)
        .expect("task creation should succeed")
}

pub(super) fn titles_in(board: &Board, column: &str) -> Vec<String> {
    let id = column_id(board, column);
    board
        .column(id)
        .expect("column exists")
        .task_ids()
        .iter()
        .map(|task_id| board.task(*task_id).expect("placed task is active").title().to_owned())
        .collect()
}
