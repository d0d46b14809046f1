//! `window.localStorage` backend. Requires a browser environment.
//!
//! The storage handle is looked up on every call rather than cached, since
//! `web_sys::Storage` is not `Send` and the lookup is cheap.

use wasm_bindgen::{JsCast, JsValue};

use super::{Storage, StorageError};

/// [`Storage`] over the page's origin-scoped `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(describe(&e)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<web_sys::DomException>()
        .map_or_else(|| format!("{err:?}"), |dom| format!("{}: {}", dom.name(), dom.message()))
}

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Rejected(describe(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        local_storage()?.set_item(key, value).map_err(|e| {
            let quota = e
                .dyn_ref::<web_sys::DomException>()
                .is_some_and(|dom| dom.name() == "QuotaExceededError");
            if quota {
                StorageError::QuotaExceeded { key: key.to_owned(), needed: key.len() + value.len() }
            } else {
                StorageError::Rejected(describe(&e))
            }
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Rejected(describe(&e)))
    }
}
