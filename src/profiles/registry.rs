//! Profile registry: summary type id to framework instruction

use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::profiles::{BuiltInType, NewProfile, ProfileUpdate, SummaryProfile};
use crate::storage::KeyValueStore;
use crate::{Result, StokemeetError};

const PROFILES_KEY: &str = "stokemeet_custom_profiles";
const DEFAULT_PROFILE_KEY: &str = "stokemeet_default_profile";

/// Used when an id matches neither a custom nor a built-in profile.
pub const GENERIC_INSTRUCTION: &str = "Provide a clear, structured summary of the meeting.";

/// Built-in profiles plus device-local custom profiles.
#[derive(Clone)]
pub struct ProfileRegistry {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileRegistry {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Built-in profiles in selector order.
    pub fn list_built_in(&self) -> Vec<SummaryProfile> {
        BuiltInType::ALL
            .iter()
            .copied()
            .map(SummaryProfile::built_in)
            .collect()
    }

    /// Custom profiles in insertion order.
    ///
    /// Unreadable or corrupt storage yields an empty list.
    pub fn list_custom(&self) -> Vec<SummaryProfile> {
        match self.read_custom() {
            Ok(profiles) => profiles,
            Err(e) => {
                warn!("Error reading custom profiles: {}", e);
                Vec::new()
            }
        }
    }

    /// Built-ins followed by custom profiles.
    pub fn list_all(&self) -> Vec<SummaryProfile> {
        let mut all = self.list_built_in();
        all.extend(self.list_custom());
        all
    }

    /// Look up a profile by id, custom first.
    pub fn get(&self, id: &str) -> Option<SummaryProfile> {
        self.list_custom()
            .into_iter()
            .find(|p| p.id == id)
            .or_else(|| BuiltInType::from_id(id).map(SummaryProfile::built_in))
    }

    /// Framework instruction for a summary type id. Never fails.
    pub fn framework_instruction(&self, id: &str) -> String {
        if let Some(profile) = self.list_custom().into_iter().find(|p| p.id == id) {
            return profile.system_prompt;
        }

        match BuiltInType::from_id(id) {
            Some(kind) => kind.instruction().to_string(),
            None => {
                debug!("No profile for summary type '{}', using generic instruction", id);
                GENERIC_INSTRUCTION.to_string()
            }
        }
    }

    /// Create a custom profile with a fresh id.
    pub fn create(&self, profile: NewProfile) -> Result<SummaryProfile> {
        let name = profile.name.trim().to_string();
        let system_prompt = profile.system_prompt.trim().to_string();
        if name.is_empty() || system_prompt.is_empty() {
            return Err(StokemeetError::InvalidInput(
                "Profile name and system prompt are required".to_string(),
            ));
        }

        let mut profiles = self.read_custom()?;
        let id = loop {
            let candidate = generate_profile_id();
            if !profiles.iter().any(|p| p.id == candidate) {
                break candidate;
            }
        };

        let now = Utc::now();
        let created = SummaryProfile {
            id,
            name,
            description: profile.description.trim().to_string(),
            system_prompt,
            created_at: now,
            updated_at: now,
        };

        profiles.push(created.clone());
        self.write_custom(&profiles)?;
        debug!("Created custom profile {}", created.id);

        Ok(created)
    }

    /// Merge `update` into the custom profile `id`.
    ///
    /// Returns `None` when no custom profile has that id.
    pub fn update(&self, id: &str, update: ProfileUpdate) -> Result<Option<SummaryProfile>> {
        let mut profiles = self.read_custom()?;

        let Some(existing) = profiles.iter_mut().find(|p| p.id == id) else {
            warn!("Profile with id {} not found", id);
            return Ok(None);
        };

        if let Some(name) = update.name {
            existing.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            existing.description = description.trim().to_string();
        }
        if let Some(system_prompt) = update.system_prompt {
            existing.system_prompt = system_prompt.trim().to_string();
        }
        existing.updated_at = Utc::now();

        let updated = existing.clone();
        self.write_custom(&profiles)?;

        Ok(Some(updated))
    }

    /// Delete the custom profile `id`. Returns whether one was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let profiles = self.read_custom()?;
        let before = profiles.len();
        let remaining: Vec<_> = profiles.into_iter().filter(|p| p.id != id).collect();

        if remaining.len() == before {
            warn!("Profile with id {} not found", id);
            return Ok(false);
        }

        self.write_custom(&remaining)?;
        Ok(true)
    }

    /// Summary type selected when a meeting is opened.
    ///
    /// Falls back to the built-in default when the stored id no longer resolves.
    pub fn default_profile_id(&self) -> String {
        let stored = match self.store.get(DEFAULT_PROFILE_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("Error reading default profile: {}", e);
                None
            }
        };

        stored
            .filter(|id| self.get(id).is_some())
            .unwrap_or_else(|| BuiltInType::DEFAULT.id().to_string())
    }

    pub fn set_default_profile_id(&self, id: &str) -> Result<()> {
        if self.get(id).is_none() {
            return Err(StokemeetError::NotFound(format!("Summary type '{}'", id)));
        }
        self.store.set(DEFAULT_PROFILE_KEY, id)
    }

    /// Custom profiles as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.read_custom()?)?)
    }

    /// Replace all custom profiles with the JSON array in `json`.
    pub fn import_json(&self, json: &str) -> Result<Vec<SummaryProfile>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let entries = value.as_array().ok_or_else(|| {
            StokemeetError::InvalidInput("expected array of profiles".to_string())
        })?;

        let now = Utc::now();
        let mut profiles: Vec<SummaryProfile> = Vec::with_capacity(entries.len());

        for (i, entry) in entries.iter().enumerate() {
            let imported: ImportedProfile = serde_json::from_value(entry.clone()).map_err(|_| {
                StokemeetError::InvalidInput(format!(
                    "Profile at index {} is missing required fields",
                    i
                ))
            })?;

            if imported.id.is_empty() || imported.name.is_empty() || imported.system_prompt.is_empty()
            {
                return Err(StokemeetError::InvalidInput(format!(
                    "Profile at index {} is missing required fields",
                    i
                )));
            }
            if BuiltInType::from_id(&imported.id).is_some()
                || profiles.iter().any(|p| p.id == imported.id)
            {
                return Err(StokemeetError::InvalidInput(format!(
                    "Profile at index {} reuses id '{}'",
                    i, imported.id
                )));
            }

            let created_at = imported.created_at.unwrap_or(now);
            profiles.push(SummaryProfile {
                id: imported.id,
                name: imported.name,
                description: imported.description,
                system_prompt: imported.system_prompt,
                created_at,
                updated_at: imported.updated_at.unwrap_or(created_at),
            });
        }

        self.write_custom(&profiles)?;
        Ok(profiles)
    }

    fn read_custom(&self) -> Result<Vec<SummaryProfile>> {
        match self.store.get(PROFILES_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_custom(&self, profiles: &[SummaryProfile]) -> Result<()> {
        let json = serde_json::to_string(profiles)?;
        self.store.set(PROFILES_KEY, &json)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedProfile {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    system_prompt: String,
    #[serde(default)]
    created_at: Option<chrono::DateTime<Utc>>,
    #[serde(default)]
    updated_at: Option<chrono::DateTime<Utc>>,
}

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `custom_<unix millis>_<9 lowercase alphanumerics>`
fn generate_profile_id() -> String {
    let mut bits = uuid::Uuid::new_v4().as_u128();
    let suffix: String = (0..9)
        .map(|_| {
            let c = ID_ALPHABET[(bits % 36) as usize] as char;
            bits /= 36;
            c
        })
        .collect();
    format!("custom_{}_{}", Utc::now().timestamp_millis(), suffix)
}
