//! # client-state
//!
//! Persistent client-side state for the code-agent UI. Reactive containers
//! are seeded from durable key/value storage when the app starts and write
//! every change back, so the request form and the message log survive a page
//! reload.
//!
//! The crate is split into three layers: `storage` (where bytes live), `store`
//! (reactive containers and the persistence factory), and `state` (the
//! concrete form/messages records and the `AppState` context that owns them).

pub mod config;
pub mod state;
pub mod storage;
pub mod store;

pub use config::{BackendKind, ConfigError, StateConfig};
pub use state::app::AppState;
pub use storage::{Storage, StorageError};
pub use store::persistent::create_persistent_store;
pub use store::writable::{Subscription, Writable};

/// Install the browser console logger and panic hook.
///
/// Safe to call more than once; later calls are ignored.
#[cfg(feature = "hydrate")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
