//! Workload-aware column suggestions.
//!
//! Columns filled beyond the congestion threshold are treated as signals.
//! The titles and labels of their tasks are matched against a fixed
//! lexicon of workflow stages, and each matching stage becomes a candidate
//! column whose confidence grows with how many congested tasks mention it
//! and shrinks when a similarly named column already exists.

use super::{Board, Column, SuggestionConfig, Task};
use serde::Serialize;
use std::collections::HashSet;

/// A proposed new column. Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSuggestion {
    /// Proposed column title.
    pub title: String,
    /// Proposed display color.
    pub color: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Human-readable justification.
    pub reason: String,
}

struct Stage {
    keyword: &'static str,
    synonyms: &'static [&'static str],
    title: &'static str,
    color: &'static str,
}

const STAGES: [Stage; 7] = [
    Stage {
        keyword: "review",
        synonyms: &["reviewing", "pr", "feedback"],
        title: "In Review",
        color: "#a855f7",
    },
    Stage {
        keyword: "test",
        synonyms: &["tests", "testing", "qa", "verify"],
        title: "Testing",
        color: "#f59e0b",
    },
    Stage {
        keyword: "deploy",
        synonyms: &["deployment", "release", "rollout", "ship"],
        title: "Deploy",
        color: "#10b981",
    },
    Stage {
        keyword: "bug",
        synonyms: &["bugs", "crash", "regression"],
        title: "Bugs",
        color: "#ef4444",
    },
    Stage {
        keyword: "blocked",
        synonyms: &["blocker", "waiting", "stuck"],
        title: "Blocked",
        color: "#f97316",
    },
    Stage {
        keyword: "design",
        synonyms: &["mockup", "ux", "ui"],
        title: "Design",
        color: "#ec4899",
    },
    Stage {
        keyword: "docs",
        synonyms: &["doc", "documentation", "readme"],
        title: "Documentation",
        color: "#0ea5e9",
    },
];

/// Number of matching tasks at which the volume term saturates.
const VOLUME_SATURATION: u32 = 5;

impl Stage {
    fn matches(&self, tokens: &HashSet<String>) -> bool {
        tokens.contains(self.keyword)
            || self.synonyms.iter().any(|synonym| tokens.contains(*synonym))
    }
}

impl Board {
    /// Suggests new columns using the board's configured heuristic tuning.
    #[must_use]
    pub fn suggestions(&self) -> Vec<ColumnSuggestion> {
        suggest_columns(self, &self.config.suggestions)
    }
}

/// Suggests new columns from the current workload shape. Never mutates.
#[must_use]
pub fn suggest_columns(board: &Board, config: &SuggestionConfig) -> Vec<ColumnSuggestion> {
    let congested: Vec<&Column> = board
        .columns()
        .filter(|column| !column.is_empty() && occupancy(column, config) > config.congestion_threshold)
        .collect();
    let token_sets: Vec<HashSet<String>> = congested
        .iter()
        .flat_map(|column| column.task_ids())
        .filter_map(|id| board.task(*id))
        .map(task_tokens)
        .collect();
    if token_sets.is_empty() {
        return Vec::new();
    }

    let existing_titles: Vec<&str> = board.columns().map(Column::title).collect();
    let congested_titles = congested
        .iter()
        .map(|column| column.title())
        .collect::<Vec<_>>()
        .join(", ");
    let total = count_u32(token_sets.len());

    let mut suggestions: Vec<ColumnSuggestion> = STAGES
        .iter()
        .filter_map(|stage| {
            let matching = count_u32(token_sets.iter().filter(|tokens| stage.matches(tokens)).count());
            if matching == 0 {
                return None;
            }
            let similarity = existing_titles
                .iter()
                .map(|existing| title_similarity(stage.title, existing))
                .fold(0.0, f64::max);
            if similarity >= 1.0 {
                return None;
            }
            let confidence = confidence(matching, total, similarity);
            (confidence >= config.min_confidence).then(|| ColumnSuggestion {
                title: stage.title.to_owned(),
                color: stage.color.to_owned(),
                confidence,
                reason: format!(
                    "{matching} of {total} tasks in congested columns ({congested_titles}) mention \"{}\"",
                    stage.keyword
                ),
            })
        })
        .collect();

    suggestions.sort_by(|left, right| {
        right
            .confidence
            .total_cmp(&left.confidence)
            .then_with(|| left.title.cmp(&right.title))
    });
    suggestions.truncate(config.max_suggestions);
    suggestions
}

#[expect(
    clippy::float_arithmetic,
    reason = "occupancy is a ratio of task count to capacity"
)]
fn occupancy(column: &Column, config: &SuggestionConfig) -> f64 {
    let capacity = column
        .wip_limit()
        .map_or(config.soft_column_ceiling, |limit| limit.get())
        .max(1);
    f64::from(count_u32(column.len())) / f64::from(capacity)
}

#[expect(
    clippy::float_arithmetic,
    reason = "confidence blends share and volume and applies a similarity penalty"
)]
fn confidence(matching: u32, total: u32, similarity: f64) -> f64 {
    let share = f64::from(matching) / f64::from(total.max(1));
    let volume = f64::from(matching.min(VOLUME_SATURATION)) / f64::from(VOLUME_SATURATION);
    let base = 0.6 * share + 0.4 * volume;
    (base * (1.0 - similarity)).clamp(0.0, 1.0)
}

/// Similarity of two column titles in `[0, 1]`.
#[expect(
    clippy::float_arithmetic,
    reason = "Jaccard index of the title word sets"
)]
fn title_similarity(left: &str, right: &str) -> f64 {
    let left_words = words(left);
    let right_words = words(right);
    if left_words.is_empty() || right_words.is_empty() {
        return 0.0;
    }
    let left_joined = left_words.join(" ");
    let right_joined = right_words.join(" ");
    if left_joined == right_joined {
        return 1.0;
    }
    if left_joined.contains(&right_joined) || right_joined.contains(&left_joined) {
        return 0.75;
    }
    let left_set: HashSet<&String> = left_words.iter().collect();
    let right_set: HashSet<&String> = right_words.iter().collect();
    let shared = count_u32(left_set.intersection(&right_set).count());
    let union = count_u32(left_set.union(&right_set).count());
    f64::from(shared) / f64::from(union.max(1))
}

fn task_tokens(task: &Task) -> HashSet<String> {
    task.labels()
        .iter()
        .flat_map(|label| words(label))
        .chain(words(task.title()))
        .collect()
}

fn words(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
