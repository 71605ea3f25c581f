//! Transcript entry types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::markup::RichText;

/// Who produced a transcript entry.
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

/// One entry in the visible transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLogEntry {
    pub sender: Sender,
    /// Rendered markup for the entry body.
    pub content: RichText,
    /// Error entries get distinct styling.
    #[serde(default)]
    pub is_error: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatLogEntry {
    pub fn new(sender: Sender, content: RichText) -> Self {
        Self {
            sender,
            content,
            is_error: false,
            created_at: Utc::now(),
        }
    }

    /// Mark the entry as an error notice.
    pub fn into_error(mut self) -> Self {
        self.is_error = true;
        self
    }
}
