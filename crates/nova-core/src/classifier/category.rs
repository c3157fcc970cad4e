//! Verdicts and policy categories for message classification.

use serde::{Deserialize, Serialize};

/// Confidence reported when any category matched.
///
/// This is a stub value inherited from the demo contract, not a statistical
/// estimate.
pub const MATCH_CONFIDENCE: f32 = 0.95;

/// Confidence reported when no category matched.
pub const CLEAN_CONFIDENCE: f32 = 0.1;

/// The three-state outcome of evaluating a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// The message passed all checks.
    #[default]
    Success,
    /// The message is allowed but flagged for review.
    Warning,
    /// The message violates policy and must not be processed.
    Blocked,
}

impl Verdict {
    /// Returns a human-readable name for this verdict.
    pub fn name(&self) -> &'static str {
        match self {
            Verdict::Success => "Success",
            Verdict::Warning => "Warning",
            Verdict::Blocked => "Blocked",
        }
    }

    /// Returns true if this verdict indicates a detected threat.
    pub fn is_threat(&self) -> bool {
        !matches!(self, Verdict::Success)
    }
}

/// Policy categories that a message can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyCategory {
    /// Requests for medical advice.
    MedicalAdvice,
    /// Requests involving personal or credential information.
    PersonalInfo,
    /// Potentially harmful or abusive content.
    HarmfulContent,
}

impl PolicyCategory {
    /// Returns all available categories in evaluation order.
    pub fn all() -> &'static [PolicyCategory] {
        &[
            PolicyCategory::MedicalAdvice,
            PolicyCategory::PersonalInfo,
            PolicyCategory::HarmfulContent,
        ]
    }

    /// Returns a human-readable name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyCategory::MedicalAdvice => "Medical Advice",
            PolicyCategory::PersonalInfo => "Personal Information",
            PolicyCategory::HarmfulContent => "Harmful Content",
        }
    }

    /// Returns the fixed user-facing reason reported for this category.
    pub fn reason(&self) -> &'static str {
        match self {
            PolicyCategory::MedicalAdvice => "Medical advice request detected",
            PolicyCategory::PersonalInfo => "Personal information request detected",
            PolicyCategory::HarmfulContent => "Potentially harmful content detected",
        }
    }

    /// Returns the verdict this category maps to.
    pub fn verdict(&self) -> Verdict {
        match self {
            PolicyCategory::MedicalAdvice | PolicyCategory::PersonalInfo => Verdict::Blocked,
            PolicyCategory::HarmfulContent => Verdict::Warning,
        }
    }
}

/// Result of classifying a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The verdict for the message.
    pub verdict: Verdict,
    /// Human-readable reason, present when a category matched.
    pub reason: Option<String>,
    /// Whether any threat was detected.
    pub threat_detected: bool,
    /// Categories the message violated.
    pub policy_violations: Vec<PolicyCategory>,
    /// Confidence score in [0, 1].
    pub confidence: f32,
}

impl ClassificationResult {
    /// Creates a clean (success) result.
    pub fn clean() -> Self {
        Self {
            verdict: Verdict::Success,
            reason: None,
            threat_detected: false,
            policy_violations: Vec::new(),
            confidence: CLEAN_CONFIDENCE,
        }
    }

    /// Creates a result for a single violated category.
    pub fn violation(category: PolicyCategory) -> Self {
        Self {
            verdict: category.verdict(),
            reason: Some(category.reason().to_string()),
            threat_detected: true,
            policy_violations: vec![category],
            confidence: MATCH_CONFIDENCE,
        }
    }

    /// Returns true if any category matched.
    pub fn has_violations(&self) -> bool {
        !self.policy_violations.is_empty()
    }

    /// Returns true if the verdict is Blocked.
    pub fn is_blocked(&self) -> bool {
        self.verdict == Verdict::Blocked
    }

    /// Returns true if the verdict is Warning.
    pub fn is_warning(&self) -> bool {
        self.verdict == Verdict::Warning
    }
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self::clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_all_in_evaluation_order() {
        let all = PolicyCategory::all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], PolicyCategory::MedicalAdvice);
        assert_eq!(all[2], PolicyCategory::HarmfulContent);
    }

    #[test]
    fn category_verdict_mapping() {
        assert_eq!(PolicyCategory::MedicalAdvice.verdict(), Verdict::Blocked);
        assert_eq!(PolicyCategory::PersonalInfo.verdict(), Verdict::Blocked);
        assert_eq!(PolicyCategory::HarmfulContent.verdict(), Verdict::Warning);
    }

    #[test]
    fn clean_result_has_low_confidence() {
        let result = ClassificationResult::clean();
        assert_eq!(result.verdict, Verdict::Success);
        assert!(!result.threat_detected);
        assert!(!result.has_violations());
        assert!(result.reason.is_none());
        assert_eq!(result.confidence, CLEAN_CONFIDENCE);
    }

    #[test]
    fn violation_result_carries_category_reason() {
        let result = ClassificationResult::violation(PolicyCategory::MedicalAdvice);
        assert!(result.is_blocked());
        assert!(result.threat_detected);
        assert_eq!(result.reason.as_deref(), Some("Medical advice request detected"));
        assert_eq!(result.policy_violations, vec![PolicyCategory::MedicalAdvice]);
        assert_eq!(result.confidence, MATCH_CONFIDENCE);
    }

    #[test]
    fn verdict_serialization_is_lowercase() {
        assert_eq!(serde_json::to_string(&Verdict::Blocked).unwrap(), "\"blocked\"");
        assert_eq!(serde_json::to_string(&Verdict::Warning).unwrap(), "\"warning\"");
        assert_eq!(serde_json::to_string(&Verdict::Success).unwrap(), "\"success\"");
    }

    #[test]
    fn category_serialization_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&PolicyCategory::MedicalAdvice).unwrap(),
            "\"medical_advice\""
        );
        assert_eq!(
            serde_json::to_string(&PolicyCategory::PersonalInfo).unwrap(),
            "\"personal_info\""
        );
        assert_eq!(
            serde_json::to_string(&PolicyCategory::HarmfulContent).unwrap(),
            "\"harmful_content\""
        );
    }

    #[test]
    fn classification_result_round_trips() {
        let result = ClassificationResult::violation(PolicyCategory::HarmfulContent);
        let json = serde_json::to_string(&result).unwrap();
        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
