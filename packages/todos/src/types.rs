// ABOUTME: Todo type definitions
// ABOUTME: The stored record, create/update inputs, list filter and aggregate stats

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timestamp;

/// Page size used when the caller does not pass `limit`
pub const DEFAULT_LIMIT: i64 = 100;

/// Largest page a single list call may return
pub const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoCreateInput {
    pub title: String,
    pub description: Option<String>,
}

/// Partial update. `None` leaves a field alone; for `description`,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoUpdateInput {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TodoUpdateInput {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Merge the supplied fields over `todo`. Timestamps are left untouched.
    pub fn apply(&self, todo: &Todo) -> Todo {
        let mut merged = todo.clone();
        if let Some(title) = &self.title {
            merged.title = title.clone();
        }
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(completed) = self.completed {
            merged.completed = completed;
        }
        merged
    }
}

/// Filters and window for listing todos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFilter {
    pub skip: i64,
    pub limit: i64,
    pub completed: Option<bool>,
    /// Case-sensitive substring of `title`; empty means no filter
    pub search: Option<String>,
}

impl Default for TodoFilter {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            completed: None,
            search: None,
        }
    }
}

impl TodoFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub completion_rate: f64,
}

impl TodoStats {
    /// Build stats from raw counts; the rate is a percentage rounded to two
    /// decimals and is 0 for an empty store.
    pub fn from_counts(total: i64, completed: i64) -> Self {
        let completion_rate = if total > 0 {
            let rate = completed as f64 / total as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}
