//! Append-only conversation logs for the two demo chat sides.
//!
//! Each side of the demo (protected and unprotected) owns one log. Messages
//! are created once, appended in submission order, and never mutated,
//! reordered, or deleted for the lifetime of the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::Verdict;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The end user.
    User,
    /// The assistant.
    Ai,
}

/// The two parallel demo conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Routed through classification.
    Protected,
    /// Sent straight to the model.
    Unprotected,
}

impl Side {
    /// Returns a human-readable name for this side.
    pub fn name(&self) -> &'static str {
        match self {
            Side::Protected => "Protected",
            Side::Unprotected => "Unprotected",
        }
    }
}

/// A single chat message.
///
/// `status` is only ever set on AI messages from the protected side; it
/// carries the verdict of the classification that produced the reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Opaque, time-derived identifier.
    pub id: String,
    /// Message text.
    pub text: String,
    /// Message author.
    pub sender: Sender,
    /// Submission time.
    pub timestamp: DateTime<Utc>,
    /// Classification verdict, for protected-side AI messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Verdict>,
    /// Human-readable classification reason, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Ordered, append-only sequence of messages for one conversation side.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    side: Side,
    entries: Vec<ChatMessage>,
    /// Per-log sequence folded into ids so same-millisecond appends stay
    /// distinct.
    seq: u64,
}

impl ConversationLog {
    /// Creates an empty log for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            side,
            entries: Vec::new(),
            seq: 0,
        }
    }

    /// Returns the side this log belongs to.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns the messages in submission order.
    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most recent message, if any.
    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last()
    }

    /// Appends a user message and returns it.
    pub fn push_user(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(text.into(), Sender::User, None, None)
    }

    /// Appends a plain AI message with no classification status.
    pub fn push_ai(&mut self, text: impl Into<String>) -> &ChatMessage {
        self.push(text.into(), Sender::Ai, None, None)
    }

    /// Appends an AI message carrying a classification outcome.
    pub fn push_ai_with_status(
        &mut self,
        text: impl Into<String>,
        status: Verdict,
        reason: Option<String>,
    ) -> &ChatMessage {
        self.push(text.into(), Sender::Ai, Some(status), reason)
    }

    fn push(
        &mut self,
        text: String,
        sender: Sender,
        status: Option<Verdict>,
        reason: Option<String>,
    ) -> &ChatMessage {
        let timestamp = Utc::now();
        let id = format!("{}-{}", timestamp.timestamp_millis(), self.seq);
        self.seq += 1;

        self.entries.push(ChatMessage {
            id,
            text,
            sender,
            timestamp,
            status,
            reason,
        });

        // Just pushed, so the vec is non-empty.
        self.entries.last().unwrap()
    }
}
