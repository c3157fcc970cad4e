//! In-process demo session driving the two chat sides.
//!
//! This is the local stand-in for the remote gateway: the protected side
//! runs every submission through the keyword classifier and replies with a
//! refusal, a flagged notice, or a canned answer; the unprotected side
//! replies with canned answers only.

use crate::classifier::{ClassificationResult, KeywordClassifier, Verdict};
use crate::conversation::{ChatMessage, ConversationLog, Side};
use crate::policy::Policy;

/// Reply returned when a message is blocked.
pub const BLOCKED_REPLY: &str =
    "I cannot process this request as it violates our security policies.";

/// Reply returned when a message is flagged but allowed.
pub const FLAGGED_REPLY: &str =
    "I'll help you with that, but please note this request has been flagged for review.";

const CANNED_REPLIES: &[&str] = &[
    "I understand your request. Here's what I can tell you about that topic...",
    "That's an interesting question! Let me provide you with some helpful information...",
    "I'd be happy to help you with that. Here's what you should know...",
    "Based on your question, here's the information you're looking for...",
];

/// Deterministic source of canned assistant replies.
///
/// Rotates through a fixed set instead of picking randomly so repeated runs
/// are reproducible.
#[derive(Debug, Default)]
pub struct ReplyBank {
    next: usize,
}

impl ReplyBank {
    /// Creates a new reply bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next canned reply.
    pub fn next_reply(&mut self) -> &'static str {
        let reply = CANNED_REPLIES[self.next % CANNED_REPLIES.len()];
        self.next += 1;
        reply
    }

    /// Returns the reply text for a classified submission.
    pub fn reply_for(&mut self, verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::Blocked => BLOCKED_REPLY,
            Verdict::Warning => FLAGGED_REPLY,
            Verdict::Success => self.next_reply(),
        }
    }
}

/// One demo session: a protected and an unprotected conversation sharing a
/// policy and a classifier.
///
/// Submissions are serialized by construction: each `submit_*` call runs to
/// completion before the next, so at most one classification is in flight
/// per side.
pub struct DemoSession {
    policy: Policy,
    classifier: KeywordClassifier,
    replies: ReplyBank,
    protected: ConversationLog,
    unprotected: ConversationLog,
}

impl DemoSession {
    /// Creates a session with the given policy.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            classifier: KeywordClassifier::new(),
            replies: ReplyBank::new(),
            protected: ConversationLog::new(Side::Protected),
            unprotected: ConversationLog::new(Side::Unprotected),
        }
    }

    /// Returns the active policy.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Replaces the active policy.
    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    /// Returns the protected-side log.
    pub fn protected(&self) -> &ConversationLog {
        &self.protected
    }

    /// Returns the unprotected-side log.
    pub fn unprotected(&self) -> &ConversationLog {
        &self.unprotected
    }

    /// Submits a message on the protected side.
    ///
    /// Whitespace-only input is rejected before dispatch: nothing is
    /// appended and `None` is returned. Otherwise the user message and
    /// exactly one AI reply carrying the classification outcome are
    /// appended, and the AI reply is returned.
    pub fn submit_protected(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.protected.push_user(text);

        let result = self.classifier.classify(text, self.policy.text());
        let reply = self.replies.reply_for(result.verdict);
        Some(
            self.protected
                .push_ai_with_status(reply, result.verdict, result.reason),
        )
    }

    /// Submits a message on the unprotected side.
    ///
    /// No classification is performed; the AI reply carries no status.
    pub fn submit_unprotected(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.unprotected.push_user(text);
        let reply = self.replies.next_reply();
        Some(self.unprotected.push_ai(reply))
    }

    /// Classifies a message without touching the logs.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        self.classifier.classify(text, self.policy.text())
    }
}

impl Default for DemoSession {
    fn default() -> Self {
        Self::new(Policy::demo_default())
    }
}
