//! Column entity and its request types.

use super::{BoardDomainError, ColumnId, TaskId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Advisory maximum number of active tasks in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WipLimit(NonZeroU32);

impl WipLimit {
    /// Creates a validated WIP limit.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidWipLimit`] when the value is zero.
    pub const fn new(value: u32) -> Result<Self, BoardDomainError> {
        match NonZeroU32::new(value) {
            Some(limit) => Ok(Self(limit)),
            None => Err(BoardDomainError::InvalidWipLimit(value)),
        }
    }

    /// Returns the limit value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns `true` when `count` tasks would exceed the limit.
    #[must_use]
    pub fn is_exceeded_by(self, count: usize) -> bool {
        usize::try_from(self.get()).is_ok_and(|limit| count > limit)
    }
}

impl fmt::Display for WipLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered bucket of active task ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    color: String,
    wip_limit: Option<WipLimit>,
    task_ids: Vec<TaskId>,
}

impl Column {
    pub(crate) fn new(request: &NewColumn) -> Result<Self, BoardDomainError> {
        Ok(Self {
            id: ColumnId::new(),
            title: normalize_column_title(&request.title)?,
            color: request.color.trim().to_owned(),
            wip_limit: request.wip_limit,
            task_ids: Vec::new(),
        })
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the display color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the WIP limit, if one is set.
    #[must_use]
    pub const fn wip_limit(&self) -> Option<WipLimit> {
        self.wip_limit
    }

    /// Returns the ordered task ids placed in this column.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns the number of tasks in the column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Returns `true` when the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Returns `true` when the column holds more tasks than its WIP limit.
    #[must_use]
    pub fn is_over_limit(&self) -> bool {
        self.wip_limit
            .is_some_and(|limit| limit.is_exceeded_by(self.task_ids.len()))
    }

    /// Returns the position of a task within the column.
    #[must_use]
    pub fn position_of(&self, task_id: TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| *id == task_id)
    }

    pub(crate) fn apply_patch(&mut self, patch: &ColumnPatch) -> Result<(), BoardDomainError> {
        let title = patch
            .title
            .as_deref()
            .map(normalize_column_title)
            .transpose()?;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(color) = &patch.color {
            color.trim().clone_into(&mut self.color);
        }
        if let Some(limit) = patch.wip_limit {
            self.wip_limit = limit;
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, task_id: TaskId) {
        self.task_ids.push(task_id);
    }

    /// Inserts at `index` clamped to the current length; returns the index used.
    pub(crate) fn insert_clamped(&mut self, index: usize, task_id: TaskId) -> usize {
        let position = index.min(self.task_ids.len());
        self.task_ids.insert(position, task_id);
        position
    }

    /// Removes a task; returns its former position.
    pub(crate) fn remove(&mut self, task_id: TaskId) -> Option<usize> {
        let position = self.position_of(task_id)?;
        self.task_ids.remove(position);
        Some(position)
    }
}

/// Request payload for adding a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColumn {
    title: String,
    color: String,
    wip_limit: Option<WipLimit>,
}

impl NewColumn {
    /// Creates a request with a title and display color.
    #[must_use]
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: color.into(),
            wip_limit: None,
        }
    }

    /// Sets the WIP limit.
    #[must_use]
    pub const fn with_wip_limit(mut self, limit: WipLimit) -> Self {
        self.wip_limit = Some(limit);
        self
    }
}

/// Partial update of a column's display attributes and WIP limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPatch {
    title: Option<String>,
    color: Option<String>,
    wip_limit: Option<Option<WipLimit>>,
}

impl ColumnPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets a new WIP limit.
    #[must_use]
    pub const fn with_wip_limit(mut self, limit: WipLimit) -> Self {
        self.wip_limit = Some(Some(limit));
        self
    }

    /// Removes the WIP limit.
    #[must_use]
    pub const fn clear_wip_limit(mut self) -> Self {
        self.wip_limit = Some(None);
        self
    }
}

fn normalize_column_title(raw: &str) -> Result<String, BoardDomainError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(BoardDomainError::EmptyColumnTitle);
    }
    Ok(normalized.to_owned())
}
