//! Message classification for the Nova gateway.
//!
//! This module provides the three-outcome classifier used by the demo: every
//! message maps to exactly one verdict (success, warning, or blocked).

mod category;
mod keyword;

pub use category::{ClassificationResult, PolicyCategory, Verdict};
pub use category::{CLEAN_CONFIDENCE, MATCH_CONFIDENCE};
pub use keyword::KeywordClassifier;
