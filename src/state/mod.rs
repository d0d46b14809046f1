//! Persisted client-side state models.
//!
//! DESIGN
//! ======
//! State is split by concern (`form`, `messages`) so components can depend on
//! small focused records; `app` binds each record to durable storage.

pub mod app;
pub mod form;
pub mod messages;

pub use app::{AppState, provide_app_state, use_app_state};
pub use form::{FORM_STATE_KEY, FormState, InitMessage};
pub use messages::{AgentMessage, MESSAGES_STATE_KEY, MessageContent, MessageKind, MessagesState};
