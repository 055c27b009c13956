//! Persisted authentication session

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::storage::KeyValueStore;
use crate::Result;

const SESSION_KEY: &str = "stokemeet_session";

/// An authenticated user. Its presence selects the remote summary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    pub access_token: String,
}

/// Device-local persistence for the current session.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current session, if any. A corrupt record reads as signed out.
    pub fn load(&self) -> Option<Session> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read session: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Ignoring unreadable session: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.store.set(SESSION_KEY, &json)
    }

    /// Forget the session. Returns whether one was stored.
    pub fn clear(&self) -> Result<bool> {
        self.store.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn save_load_clear() {
        let sessions = SessionStore::new(Arc::new(MemoryStore::new()));
        assert!(sessions.load().is_none());

        let session = Session {
            user_id: "user-1".to_string(),
            email: Some("jordan@example.com".to_string()),
            access_token: "token".to_string(),
        };
        sessions.save(&session).unwrap();
        assert_eq!(sessions.load(), Some(session));

        assert!(sessions.clear().unwrap());
        assert!(sessions.load().is_none());
        assert!(!sessions.clear().unwrap());
    }

    #[test]
    fn corrupt_session_reads_as_signed_out() {
        let store = Arc::new(MemoryStore::new());
        store.set(SESSION_KEY, "garbage").unwrap();
        assert!(SessionStore::new(store).load().is_none());
    }
}
