//! Request form state: what the user wants the agent to do, and how.
//!
//! DESIGN
//! ======
//! Field names on the wire keep the browser client's spelling (`userRequest`,
//! `rootDirectory`, but `max_iterations`) so entries written by earlier
//! builds keep restoring. Missing fields fall back to their defaults instead
//! of discarding the whole entry.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde::{Deserialize, Serialize};

/// Storage key for the persisted form.
pub const FORM_STATE_KEY: &str = "formState";

pub const DEFAULT_MAX_ITERATIONS: u32 = 2;
pub const DEFAULT_ROOT_DIRECTORY: &str = ".";

/// Contents of the request form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormState {
    /// Free-text change request sent to the agent.
    #[serde(rename = "userRequest")]
    pub user_request: String,
    /// Whether proposed changes go through the review agent.
    pub review: bool,
    /// Upper bound on plan/review rounds.
    pub max_iterations: u32,
    /// Repository root the agent operates in.
    #[serde(rename = "rootDirectory")]
    pub root_directory: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            user_request: String::new(),
            review: true,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            root_directory: DEFAULT_ROOT_DIRECTORY.to_owned(),
        }
    }
}

impl FormState {
    /// True when the form holds a non-blank request and at least one iteration.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        !self.user_request.trim().is_empty() && self.max_iterations >= 1
    }

    /// Build the opening WebSocket message for an agent session.
    #[must_use]
    pub fn init_message(&self) -> InitMessage {
        InitMessage {
            content: self.user_request.trim().to_owned(),
            review: self.review,
            max_iterations: self.max_iterations,
            root_directory: self.root_directory.clone(),
        }
    }
}

/// First message sent to the agent backend when a session opens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitMessage {
    pub content: String,
    pub review: bool,
    pub max_iterations: u32,
    #[serde(rename = "rootDirectory")]
    pub root_directory: String,
}
