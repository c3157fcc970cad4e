//! Nova Core - Classification, conversation, and authentication logic.
//!
//! This crate provides the core functionality for the Nova AI trust gateway:
//! the three-outcome message classifier, the demo conversation logs, policy
//! records, and the session/password primitives used by the API server.

pub mod auth;
pub mod classifier;
pub mod conversation;
pub mod demo;
pub mod policy;

pub use classifier::{ClassificationResult, KeywordClassifier, PolicyCategory, Verdict};
pub use conversation::{ChatMessage, ConversationLog, Sender, Side};
pub use demo::{DemoSession, ReplyBank};
pub use policy::{Policy, PolicyRecord};
