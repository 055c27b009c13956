//! Summary profile models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profiles::BuiltInType;

/// A summary framework selectable by id.
///
/// Built-in and custom profiles share this shape and are looked up only by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub system_prompt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SummaryProfile {
    /// Immutable profile for a built-in type. Timestamps are pinned to the epoch.
    pub fn built_in(kind: BuiltInType) -> Self {
        Self {
            id: kind.id().to_string(),
            name: kind.id().to_string(),
            description: kind.description().to_string(),
            system_prompt: kind.instruction().to_string(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn is_built_in(&self) -> bool {
        BuiltInType::from_id(&self.id).is_some()
    }
}

/// Fields accepted when creating a custom profile.
#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub name: String,
    pub description: String,
    pub system_prompt: String,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub system_prompt: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.system_prompt.is_none()
    }
}
