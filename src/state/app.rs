//! Application-wide persistent state.
//!
//! DESIGN
//! ======
//! `AppState` is built once at startup and handed to whoever needs it, either
//! directly or through Leptos context, instead of living in global statics.
//! Each field is a persistent [`Writable`] bound to its own storage key, so
//! any mutation made through it is durable by the time the call returns.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use leptos::prelude::{provide_context, use_context};

use super::form::{FORM_STATE_KEY, FormState, InitMessage};
use super::messages::{AgentMessage, MESSAGES_STATE_KEY, MessagesState};
use crate::config::{ConfigError, StateConfig};
use crate::storage::Storage;
use crate::store::{Writable, create_persistent_store};

/// Shared handles to the persisted form and message log.
/// Cheap to clone; clones share the same containers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub form: Writable<FormState>,
    pub messages: Writable<MessagesState>,
}

impl AppState {
    /// Restore both containers from `storage` and bind them to it.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let form = create_persistent_store(Arc::clone(&storage), FORM_STATE_KEY, FormState::default());
        let messages = create_persistent_store(storage, MESSAGES_STATE_KEY, MessagesState::default());
        log::debug!(
            "app state ready: {} message(s), pending diff: {}",
            messages.with(|m| m.messages.len()),
            messages.with(MessagesState::has_pending_diff)
        );
        Self { form, messages }
    }

    /// Open the configured backend and restore state from it.
    pub fn from_config(config: &StateConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.open_storage()?))
    }

    /// Append a message from the agent or the user.
    pub fn record_message(&self, message: AgentMessage) {
        self.messages.update(|state| state.push(message));
    }

    /// Drop the message log and any pending diff.
    pub fn clear_messages(&self) {
        self.messages.update(MessagesState::clear);
    }

    /// Put the form back to its defaults.
    pub fn reset_form(&self) {
        self.form.set(FormState::default());
    }

    /// Opening message for a new agent session, built from the current form.
    pub fn init_message(&self) -> InitMessage {
        self.form.with(FormState::init_message)
    }
}

/// Make `state` available to descendant Leptos components.
pub fn provide_app_state(state: AppState) {
    provide_context(state);
}

/// Fetch the `AppState` provided by an ancestor, if any.
pub fn use_app_state() -> Option<AppState> {
    use_context::<AppState>()
}
