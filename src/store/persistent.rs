//! Persistent store factory: a [`Writable`] seeded from storage and written
//! back to it on every change.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. A missing, corrupt, or unreadable entry falls
//! back to the caller's default, and a failed write is logged and dropped. The
//! in-memory value is always authoritative, so storage trouble never reaches
//! the UI; the cost is that durable state can silently lag behind it.

#[cfg(test)]
#[path = "persistent_test.rs"]
mod persistent_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::writable::Writable;
use crate::storage::{Storage, StorageError};

/// Result of reading a JSON entry from storage.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// No entry exists at the key.
    Missing,
    /// The entry parsed successfully.
    Restored(T),
    /// The entry exists but is not valid JSON for `T`.
    Corrupt(serde_json::Error),
    /// The backend could not be read.
    Unavailable(StorageError),
}

/// Error returned by [`save_json`].
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Read and decode the JSON entry at `key`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> LoadOutcome<T> {
    match storage.get_item(key) {
        Ok(None) => LoadOutcome::Missing,
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => LoadOutcome::Restored(value),
            Err(e) => LoadOutcome::Corrupt(e),
        },
        Err(e) => LoadOutcome::Unavailable(e),
    }
}

/// Encode `value` as JSON and write it to `key`.
///
/// # Errors
///
/// Returns [`SaveError::Encode`] when `value` cannot be serialized and
/// [`SaveError::Storage`] when the backend rejects the write.
pub fn save_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), SaveError> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)?;
    Ok(())
}

fn resolve_initial<T: DeserializeOwned>(storage: &dyn Storage, key: &str, initial: T) -> T {
    match load_json(storage, key) {
        LoadOutcome::Restored(value) => {
            log::debug!("restored persisted state for {key:?}");
            value
        }
        LoadOutcome::Missing => initial,
        LoadOutcome::Corrupt(e) => {
            log::debug!("discarding corrupt persisted state for {key:?}: {e}");
            initial
        }
        LoadOutcome::Unavailable(e) => {
            log::warn!("persisted state for {key:?} unreadable, using default: {e}");
            initial
        }
    }
}

/// Build a [`Writable`] backed by the entry at `key`.
///
/// The container starts with the stored value when it exists and parses, and
/// with `initial` otherwise. A write-through subscriber is registered for the
/// container's lifetime; because subscribers fire on registration, the
/// resolved starting value is written back before this function returns.
///
/// Never fails: storage and encoding errors are logged and ignored.
pub fn create_persistent_store<T>(storage: Arc<dyn Storage>, key: &str, initial: T) -> Writable<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    let store = Writable::new(resolve_initial(storage.as_ref(), key, initial));

    let key = key.to_owned();
    store
        .subscribe(move |value| {
            if let Err(e) = save_json(storage.as_ref(), &key, value) {
                log::warn!("failed to persist state for {key:?}: {e}");
            }
        })
        .forget();

    store
}
