//! Durable key/value storage backends.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend exposes the same synchronous, string-keyed surface as the
//! browser's `localStorage`. Reactive stores only ever talk to [`Storage`], so
//! the same state code runs in the browser (`hydrate`), on a native host with
//! files on disk, and in tests with an in-memory map.

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod file;
pub mod memory;

#[cfg(feature = "hydrate")]
pub use browser::BrowserStorage;
pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Error returned by a [`Storage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store cannot be reached at all (no window, storage disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The write would exceed the backend's size limit.
    #[error("storage quota exceeded writing {key:?} ({needed} bytes)")]
    QuotaExceeded { key: String, needed: usize },
    /// The key cannot be stored by this backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    /// The backend refused the operation for a reason it did not classify.
    #[error("storage rejected operation: {0}")]
    Rejected(String),
}

/// Synchronous string-keyed, string-valued persistence surface.
pub trait Storage: Send + Sync {
    /// Read the entry at `key`. `Ok(None)` means no entry exists.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Create or overwrite the entry at `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the entry at `key`. Removing a missing entry is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
