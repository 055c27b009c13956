//! Device-local key-value store abstraction

use crate::Result;

/// Flat string key-value store shared by the summary cache, the profile
/// registry and the session store.
///
/// Values are opaque strings; callers store JSON.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns whether an entry existed.
    fn remove(&self, key: &str) -> Result<bool>;

    /// All keys starting with `prefix`, sorted.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;
}
