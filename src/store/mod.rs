//! Reactive containers and the persistence factory that binds them to storage.

pub mod persistent;
pub mod writable;

pub use persistent::{LoadOutcome, SaveError, create_persistent_store, load_json, save_json};
pub use writable::{Subscription, Writable};
