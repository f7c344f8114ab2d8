//! Board configuration.
//!
//! Configuration is supplied by the host application at startup and is not
//! part of the persisted snapshot. Every field has a default, so partial JSON
//! documents are accepted.

use super::{NewColumn, WipLimit};
use serde::{Deserialize, Serialize};

/// Default ceiling on the number of columns a board may hold.
pub const DEFAULT_MAX_COLUMNS: usize = 15;

/// Board-wide configuration.
///
/// # Examples
///
/// ```
/// use taskboard::board::domain::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.max_columns, 15);
/// assert_eq!(config.initial_columns.len(), 3);
///
/// let parsed = BoardConfig::from_json(r#"{ "max_columns": 6 }"#).expect("valid config");
/// assert_eq!(parsed.max_columns, 6);
/// assert_eq!(parsed.suggestions.max_suggestions, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Maximum number of columns.
    pub max_columns: usize,
    /// Columns seeded into a board that has no stored snapshot.
    pub initial_columns: Vec<InitialColumn>,
    /// Tuning for the column suggestion heuristic.
    pub suggestions: SuggestionConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_columns: DEFAULT_MAX_COLUMNS,
            initial_columns: vec![
                InitialColumn::new("To Do", "#64748b"),
                InitialColumn::new("Doing", "#3b82f6"),
                InitialColumn::new("Done", "#22c55e"),
            ],
            suggestions: SuggestionConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Parses a configuration document, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the document is not valid JSON or
    /// a field has the wrong type.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }

    /// Creates a configuration that seeds no columns.
    #[must_use]
    pub fn empty_board() -> Self {
        Self {
            initial_columns: Vec::new(),
            ..Self::default()
        }
    }
}

/// Column seeded into a fresh board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialColumn {
    /// Display title.
    pub title: String,
    /// Display color.
    pub color: String,
    /// Optional WIP limit.
    #[serde(default)]
    pub wip_limit: Option<WipLimit>,
}

impl InitialColumn {
    /// Creates an initial column without a WIP limit.
    #[must_use]
    pub fn new(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: color.into(),
            wip_limit: None,
        }
    }

    /// Converts the seed into an add-column request.
    #[must_use]
    pub fn to_request(&self) -> NewColumn {
        let request = NewColumn::new(self.title.as_str(), self.color.as_str());
        match self.wip_limit {
            Some(limit) => request.with_wip_limit(limit),
            None => request,
        }
    }
}

/// Tuning for the column suggestion heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Capacity assumed for columns without a WIP limit.
    pub soft_column_ceiling: u32,
    /// Occupancy ratio above which a column counts as congested.
    pub congestion_threshold: f64,
    /// Maximum number of suggestions returned.
    pub max_suggestions: usize,
    /// Suggestions scoring below this confidence are dropped.
    pub min_confidence: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            soft_column_ceiling: 8,
            congestion_threshold: 0.8,
            max_suggestions: 3,
            min_confidence: 0.05,
        }
    }
}
