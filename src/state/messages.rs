//! Agent conversation log and the diff currently awaiting confirmation.

#[cfg(test)]
#[path = "messages_test.rs"]
mod messages_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Storage key for the persisted message log.
pub const MESSAGES_STATE_KEY: &str = "messagesState";

/// Known message categories exchanged with the agent backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// Typed by the user.
    User,
    /// Progress line from the orchestrator.
    Log,
    /// Unified diff of proposed changes.
    Diff,
    /// Free-form question the agent needs answered.
    Question,
    /// Prompt to accept, reject, or revise a diff.
    Confirmation,
    Error,
    /// Orchestration finished.
    Completed,
    /// Per-agent token counts; content is a JSON object.
    TokenUsage,
}

impl MessageKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Log => "log",
            Self::Diff => "diff",
            Self::Question => "question",
            Self::Confirmation => "confirmation",
            Self::Error => "error",
            Self::Completed => "completed",
            Self::TokenUsage => "token_usage",
        }
    }

    /// Parse a wire `type` string. Unknown strings yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "log" => Some(Self::Log),
            "diff" => Some(Self::Diff),
            "question" => Some(Self::Question),
            "confirmation" => Some(Self::Confirmation),
            "error" => Some(Self::Error),
            "completed" => Some(Self::Completed),
            "token_usage" => Some(Self::TokenUsage),
            _ => None,
        }
    }
}

/// Message payload: plain text for most kinds, any JSON value otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Structured(Value),
}

impl MessageContent {
    /// The text payload, or `None` for structured content.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// A single `{ type, content }` message.
///
/// `kind` stays a plain string and `content` accepts any JSON value, so
/// messages this build does not know about still round-trip through storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: MessageContent,
}

impl AgentMessage {
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self { kind: kind.as_str().to_owned(), content: MessageContent::Text(content.into()) }
    }

    /// Message carrying a JSON payload, such as a `token_usage` report.
    pub fn structured(kind: MessageKind, content: Value) -> Self {
        Self { kind: kind.as_str().to_owned(), content: MessageContent::Structured(content) }
    }

    #[must_use]
    pub fn kind(&self) -> Option<MessageKind> {
        MessageKind::parse(&self.kind)
    }

    /// Text content, if this message has any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.as_text()
    }
}

/// Persisted conversation state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesState {
    /// All messages this session, in arrival order.
    pub messages: Vec<AgentMessage>,
    /// Most recent diff received; empty when none is pending.
    #[serde(rename = "currentDiff")]
    pub current_diff: String,
}

impl MessagesState {
    /// Append a message. A diff message also becomes the current diff.
    pub fn push(&mut self, message: AgentMessage) {
        if message.kind() == Some(MessageKind::Diff)
            && let Some(diff) = message.text()
        {
            diff.clone_into(&mut self.current_diff);
        }
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.current_diff.clear();
    }

    #[must_use]
    pub fn has_pending_diff(&self) -> bool {
        !self.current_diff.is_empty()
    }
}
