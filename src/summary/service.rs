//! Shared summary pipeline components

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::llm::GenerationClient;
use crate::profiles::ProfileRegistry;
use crate::storage::KeyValueStore;
use crate::summary::{RemoteSummaryStore, SummaryCache, SupabaseSummaryStore};

/// Everything a [`crate::summary::MeetingSession`] needs, built once per process.
pub struct SummaryService {
    pub registry: ProfileRegistry,
    pub cache: SummaryCache,
    pub generator: GenerationClient,
}

impl SummaryService {
    pub fn new(registry: ProfileRegistry, cache: SummaryCache, generator: GenerationClient) -> Self {
        Self {
            registry,
            cache,
            generator,
        }
    }

    /// Wire the pipeline from settings. The remote store is used only when configured.
    pub fn from_settings(settings: &Settings, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let generator =
            GenerationClient::from_settings(settings).context("Failed to set up summary generation")?;

        let remote: Option<Arc<dyn RemoteSummaryStore>> = if settings.remote.is_configured() {
            let remote = SupabaseSummaryStore::from_settings(&settings.remote)
                .context("Failed to set up remote summary store")?;
            Some(Arc::new(remote))
        } else {
            info!("Remote store not configured, summaries are cached on this device only");
            None
        };

        Ok(Self::new(
            ProfileRegistry::new(store.clone()),
            SummaryCache::new(store, remote),
            generator,
        ))
    }
}
