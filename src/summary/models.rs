//! Summary data models

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Assignee used when a generated line names nobody.
pub const UNASSIGNED: &str = "Unassigned";

/// A task extracted from a generated summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub text: String,
    pub assignee: String,
}

impl ActionItem {
    pub fn new(text: impl Into<String>, assignee: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            assignee: assignee.into(),
        }
    }

    pub fn unassigned(text: impl Into<String>) -> Self {
        Self::new(text, UNASSIGNED)
    }
}

/// Action item as persisted. Older records stored plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredActionItem {
    Item(ActionItem),
    Legacy(String),
}

impl From<ActionItem> for StoredActionItem {
    fn from(item: ActionItem) -> Self {
        Self::Item(item)
    }
}

impl From<StoredActionItem> for ActionItem {
    fn from(stored: StoredActionItem) -> Self {
        match stored {
            StoredActionItem::Item(item) => item,
            StoredActionItem::Legacy(text) => ActionItem::unassigned(text),
        }
    }
}

/// A generated summary cached per (meeting, summary type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSummary {
    /// Markdown as returned by the model
    pub content: String,

    #[serde(default)]
    pub action_items: Vec<StoredActionItem>,

    /// Unix millis of the generation
    pub timestamp: i64,
}

impl StoredSummary {
    /// Record a fresh generation stamped with the current time.
    pub fn new(content: String, action_items: Vec<ActionItem>) -> Self {
        Self {
            content,
            action_items: action_items.into_iter().map(Into::into).collect(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn action_items(&self) -> Vec<ActionItem> {
        self.action_items.iter().cloned().map(Into::into).collect()
    }
}
