//! Summary cache: remote-preferred when signed in, device-local otherwise

use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::Session;
use crate::storage::KeyValueStore;
use crate::summary::{RemoteSummaryStore, StoredSummary};
use crate::Result;

const STORAGE_PREFIX: &str = "stokemeet_summary_";

/// Deterministic local key for a (meeting, summary type) pair.
///
/// Local entries are shared by every user of this device.
pub fn local_key(meeting_id: &str, type_id: &str) -> String {
    format!("{}{}_{}", STORAGE_PREFIX, meeting_id, type_id)
}

#[derive(Clone)]
pub struct SummaryCache {
    local: Arc<dyn KeyValueStore>,
    remote: Option<Arc<dyn RemoteSummaryStore>>,
}

impl SummaryCache {
    pub fn new(local: Arc<dyn KeyValueStore>, remote: Option<Arc<dyn RemoteSummaryStore>>) -> Self {
        Self { local, remote }
    }

    /// Local-only cache.
    pub fn local_only(local: Arc<dyn KeyValueStore>) -> Self {
        Self::new(local, None)
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Look up a cached summary.
    ///
    /// With a session the remote row is tried first; a remote miss or error
    /// falls through to the local entry.
    pub async fn load(
        &self,
        owner: Option<&Session>,
        meeting_id: &str,
        type_id: &str,
    ) -> Option<StoredSummary> {
        if let (Some(session), Some(remote)) = (owner, self.remote.as_ref()) {
            match remote.fetch(session, meeting_id, type_id).await {
                Ok(Some(summary)) => {
                    debug!("Remote cache hit for {} / {}", meeting_id, type_id);
                    return Some(summary);
                }
                Ok(None) => debug!("Remote cache miss for {} / {}", meeting_id, type_id),
                Err(e) => warn!("Failed to load summary from remote store: {}", e),
            }
        }

        self.load_local(meeting_id, type_id)
    }

    /// Write through. Remote failures fall back to the local store.
    pub async fn save(
        &self,
        owner: Option<&Session>,
        meeting_id: &str,
        type_id: &str,
        summary: &StoredSummary,
    ) {
        if let (Some(session), Some(remote)) = (owner, self.remote.as_ref()) {
            match remote.upsert(session, meeting_id, type_id, summary).await {
                Ok(()) => {
                    debug!("Saved summary for {} / {} to remote store", meeting_id, type_id);
                    return;
                }
                Err(e) => warn!("Failed to save summary to remote store, keeping it locally: {}", e),
            }
        }

        if let Err(e) = self.save_local(meeting_id, type_id, summary) {
            warn!("Failed to save summary to local store: {}", e);
        }
    }

    /// Remove the local entry for a pair. Returns whether one existed.
    pub fn clear_local(&self, meeting_id: &str, type_id: &str) -> Result<bool> {
        self.local.remove(&local_key(meeting_id, type_id))
    }

    /// Locally cached (meeting, type) pairs, sorted, optionally for one meeting.
    pub fn list_local(&self, meeting_id: Option<&str>) -> Result<Vec<(String, String)>> {
        let prefix = match meeting_id {
            Some(meeting_id) => local_key(meeting_id, ""),
            None => STORAGE_PREFIX.to_string(),
        };

        // Recording ids are numeric, so the first '_' ends the meeting id
        let entries = self
            .local
            .keys_with_prefix(&prefix)?
            .iter()
            .filter_map(|key| key.strip_prefix(STORAGE_PREFIX)?.split_once('_'))
            .map(|(meeting, type_id)| (meeting.to_string(), type_id.to_string()))
            .collect();

        Ok(entries)
    }

    fn load_local(&self, meeting_id: &str, type_id: &str) -> Option<StoredSummary> {
        let raw = match self.local.get(&local_key(meeting_id, type_id)) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to load summary from local store: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(summary) => {
                debug!("Local cache hit for {} / {}", meeting_id, type_id);
                Some(summary)
            }
            Err(e) => {
                warn!("Ignoring unreadable cached summary: {}", e);
                None
            }
        }
    }

    fn save_local(&self, meeting_id: &str, type_id: &str, summary: &StoredSummary) -> Result<()> {
        let json = serde_json::to_string(summary)?;
        self.local.set(&local_key(meeting_id, type_id), &json)
    }
}
