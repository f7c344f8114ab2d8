//! Task entity and the request types that create or edit it.

use super::{BoardDomainError, ColumnId, ExternalKey, ParseBoardValueError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Where a task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskOrigin {
    /// Authored directly on the board.
    Personal,
    /// Synchronized from a tracker issue.
    TrackerIssue,
    /// Synchronized from a tracker pull request.
    TrackerPr,
}

impl TaskOrigin {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::TrackerIssue => "tracker-issue",
            Self::TrackerPr => "tracker-pr",
        }
    }

    /// Returns `true` when tasks of this origin carry an external reference.
    #[must_use]
    pub const fn is_tracked(self) -> bool {
        match self {
            Self::Personal => false,
            Self::TrackerIssue | Self::TrackerPr => true,
        }
    }
}

impl TryFrom<&str> for TaskOrigin {
    type Error = ParseBoardValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "personal" => Ok(Self::Personal),
            "tracker-issue" => Ok(Self::TrackerIssue),
            "tracker-pr" => Ok(Self::TrackerPr),
            _ => Err(ParseBoardValueError {
                field: "task origin",
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for TaskOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task priority. Defaults to [`Priority::Medium`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal work.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParseBoardValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseBoardValueError {
                field: "priority",
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Link from a tracker-origin task back to its external item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalRef {
    key: ExternalKey,
    url: String,
}

impl ExternalRef {
    /// Creates an external reference.
    #[must_use]
    pub fn new(key: ExternalKey, url: impl Into<String>) -> Self {
        Self {
            key,
            url: url.into().trim().to_owned(),
        }
    }

    /// Returns the de-duplication key.
    #[must_use]
    pub const fn key(&self) -> &ExternalKey {
        &self.key
    }

    /// Returns the direct link to the tracker item.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// A unit of work on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    notes: Option<String>,
    origin: TaskOrigin,
    priority: Priority,
    labels: BTreeSet<String>,
    external_ref: Option<ExternalRef>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a personal task from a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskTitle`] if the title is empty
    /// after trimming.
    pub fn new_personal(request: &NewTask, clock: &impl Clock) -> Result<Self, BoardDomainError> {
        let title = normalize_title(&request.title)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title,
            description: request.description.as_deref().and_then(normalize_text),
            notes: request.notes.as_deref().and_then(normalize_text),
            origin: TaskOrigin::Personal,
            priority: request.priority,
            labels: normalize_labels(&request.labels),
            external_ref: None,
            created_at: timestamp,
            updated_at: timestamp,
            archived_at: None,
        })
    }

    /// Creates a tracker-origin task from a validated sync candidate.
    #[must_use]
    pub fn new_tracked(candidate: &ValidCandidate, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: candidate.title.clone(),
            description: None,
            notes: None,
            origin: candidate.origin,
            priority: Priority::default(),
            labels: candidate.labels.clone(),
            external_ref: Some(candidate.external_ref.clone()),
            created_at: timestamp,
            updated_at: timestamp,
            archived_at: None,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the user notes, if any.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the task origin.
    #[must_use]
    pub const fn origin(&self) -> TaskOrigin {
        self.origin
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the task labels in sorted order.
    #[must_use]
    pub const fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    /// Returns the external tracker reference for tracker-origin tasks.
    #[must_use]
    pub const fn external_ref(&self) -> Option<&ExternalRef> {
        self.external_ref.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest content edit.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the task was archived, if it currently is.
    #[must_use]
    pub const fn archived_at(&self) -> Option<DateTime<Utc>> {
        self.archived_at
    }

    /// Returns `true` while the task resides in the archive.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Applies a partial edit of the user-editable fields.
    pub(crate) fn apply_patch(
        &mut self,
        patch: &TaskPatch,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        let title = patch.title.as_deref().map(normalize_title).transpose()?;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(description) = &patch.description {
            self.description = description.as_deref().and_then(normalize_text);
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.as_deref().and_then(normalize_text);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(labels) = &patch.labels {
            self.labels = normalize_labels(labels);
        }
        self.touch(clock);
        Ok(())
    }

    /// Sets the priority and bumps `updated_at`.
    pub(crate) fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Refreshes tracker-owned fields. Returns `true` when anything changed.
    ///
    /// Priority, notes, description and placement are user-owned once the
    /// task exists locally and are never touched here.
    pub(crate) fn refresh_from_tracker(
        &mut self,
        candidate: &ValidCandidate,
        clock: &impl Clock,
    ) -> bool {
        let changed = self.title != candidate.title
            || self.labels != candidate.labels
            || self.external_ref.as_ref() != Some(&candidate.external_ref);
        if changed {
            self.title.clone_from(&candidate.title);
            self.labels.clone_from(&candidate.labels);
            self.external_ref = Some(candidate.external_ref.clone());
            self.touch(clock);
        }
        changed
    }

    pub(crate) fn mark_archived(&mut self, clock: &impl Clock) {
        self.archived_at = Some(clock.utc());
    }

    pub(crate) const fn clear_archived(&mut self) {
        self.archived_at = None;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Request payload for creating a personal task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    notes: Option<String>,
    priority: Priority,
    labels: Vec<String>,
    column: Option<ColumnId>,
}

impl NewTask {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Places the task in a specific column instead of the default one.
    #[must_use]
    pub const fn in_column(mut self, column: ColumnId) -> Self {
        self.column = Some(column);
        self
    }

    /// Returns the requested column, if any.
    #[must_use]
    pub const fn column(&self) -> Option<ColumnId> {
        self.column
    }
}

/// Partial update of a task's user-editable fields.
///
/// The origin, external reference and id cannot be edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    notes: Option<Option<String>>,
    priority: Option<Priority>,
    labels: Option<Vec<String>>,
}

impl TaskPatch {
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

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(Some(notes.into()));
        self
    }

    /// Removes the notes.
    #[must_use]
    pub fn clear_notes(mut self) -> Self {
        self.notes = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the label set.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = Some(labels.into_iter().collect());
        self
    }
}

/// Kind of tracker item a sync candidate represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerItemKind {
    /// An issue.
    Issue,
    /// A pull request.
    PullRequest,
}

impl TrackerItemKind {
    /// Returns the task origin for tasks created from this kind of item.
    #[must_use]
    pub const fn origin(self) -> TaskOrigin {
        match self {
            Self::Issue => TaskOrigin::TrackerIssue,
            Self::PullRequest => TaskOrigin::TrackerPr,
        }
    }
}

/// Candidate item produced by the external tracker collaborator.
///
/// Candidates arrive unvalidated; sync skips malformed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerCandidate {
    /// Stable external identifier, e.g. `gh#42`.
    pub external_ref: String,
    /// Item title.
    pub title: String,
    /// Issue or pull request.
    pub kind: TrackerItemKind,
    /// Tracker labels.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Direct link to the item.
    #[serde(default)]
    pub url: String,
}

impl TrackerCandidate {
    /// Creates a candidate without labels.
    #[must_use]
    pub fn new(
        external_ref: impl Into<String>,
        title: impl Into<String>,
        kind: TrackerItemKind,
        url: impl Into<String>,
    ) -> Self {
        Self {
            external_ref: external_ref.into(),
            title: title.into(),
            kind,
            labels: Vec::new(),
            url: url.into(),
        }
    }

    /// Sets the labels.
    #[must_use]
    pub fn with_labels(mut self, labels: impl IntoIterator<Item = String>) -> Self {
        self.labels = labels.into_iter().collect();
        self
    }

    /// Validates and normalizes the candidate.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyExternalRef`] or
    /// [`BoardDomainError::EmptyTaskTitle`] for malformed candidates.
    pub fn validate(&self) -> Result<ValidCandidate, BoardDomainError> {
        let key = ExternalKey::new(self.external_ref.as_str())?;
        let title = normalize_title(&self.title)?;
        Ok(ValidCandidate {
            external_ref: ExternalRef::new(key, self.url.as_str()),
            title,
            origin: self.kind.origin(),
            labels: normalize_labels(&self.labels),
        })
    }
}

/// A candidate that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCandidate {
    external_ref: ExternalRef,
    title: String,
    origin: TaskOrigin,
    labels: BTreeSet<String>,
}

impl ValidCandidate {
    /// Returns the external reference.
    #[must_use]
    pub const fn external_ref(&self) -> &ExternalRef {
        &self.external_ref
    }
}

fn normalize_title(raw: &str) -> Result<String, BoardDomainError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(BoardDomainError::EmptyTaskTitle);
    }
    Ok(normalized.to_owned())
}

fn normalize_text(raw: &str) -> Option<String> {
    let normalized = raw.trim();
    (!normalized.is_empty()).then(|| normalized.to_owned())
}

fn normalize_labels(labels: &[String]) -> BTreeSet<String> {
    labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .map(str::to_owned)
        .collect()
}
