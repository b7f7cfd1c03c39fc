use std::fmt;

use serde::{Deserialize, Serialize};

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// One message in the conversation log. Append-only once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub text: String,
    pub sender: Sender,
    pub timestamp: i64,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Flattened `"<sender>: <text>"` form used when the transcript is
    /// attached to a generation request.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.sender, self.text)
    }
}

pub const DEFAULT_TITLE: &str = "New Chat";

/// The persisted unit: the full conversation plus its display title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptData {
    pub title: String,
    pub turns: Vec<ChatTurn>,
}

impl Default for TranscriptData {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            turns: Vec::new(),
        }
    }
}
