//! Keyword-based message classifier.
//!
//! Evaluates categories in a fixed order against the lower-cased message and
//! returns on the first match, so a blocked verdict can never be downgraded
//! by a later warning-level category.

use super::{ClassificationResult, PolicyCategory};

/// Keyword vocabulary for a category.
struct CategoryKeywords {
    category: PolicyCategory,
    /// Case-insensitive substrings that trigger this category.
    keywords: &'static [&'static str],
}

/// Keyword-based message classifier.
///
/// The classifier is pure and total: every input string maps to exactly one
/// of the four outcomes (three categories plus clean), and classifying the
/// same input twice yields identical results.
pub struct KeywordClassifier {
    categories: Vec<CategoryKeywords>,
}

impl KeywordClassifier {
    /// Creates a classifier with the default category vocabularies.
    pub fn new() -> Self {
        Self {
            categories: Self::build_default_categories(),
        }
    }

    /// Classifies the given message against the fixed category set.
    ///
    /// `policy` is advisory free text carried through the gateway contract;
    /// it is accepted but not parsed, and does not alter the rules.
    pub fn classify(&self, message: &str, _policy: &str) -> ClassificationResult {
        let lowered = message.to_lowercase();

        // First match wins; categories are ordered by precedence, not by
        // textual position in the message.
        for entry in &self.categories {
            if entry.keywords.iter().any(|k| lowered.contains(k)) {
                return ClassificationResult::violation(entry.category);
            }
        }

        ClassificationResult::clean()
    }

    fn build_default_categories() -> Vec<CategoryKeywords> {
        vec![
            Self::build_medical_keywords(),
            Self::build_personal_info_keywords(),
            Self::build_harmful_keywords(),
        ]
    }

    fn build_medical_keywords() -> CategoryKeywords {
        CategoryKeywords {
            category: PolicyCategory::MedicalAdvice,
            keywords: &["medical", "diagnose", "treatment"],
        }
    }

    fn build_personal_info_keywords() -> CategoryKeywords {
        CategoryKeywords {
            category: PolicyCategory::PersonalInfo,
            keywords: &["password", "credit card", "ssn"],
        }
    }

    fn build_harmful_keywords() -> CategoryKeywords {
        CategoryKeywords {
            category: PolicyCategory::HarmfulContent,
            keywords: &["hack", "exploit", "bypass"],
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Verdict, CLEAN_CONFIDENCE, MATCH_CONFIDENCE};

    fn classifier() -> KeywordClassifier {
        KeywordClassifier::new()
    }

    const NO_POLICY: &str = "";

    // === Medical Advice Tests ===

    #[test]
    fn blocks_medical_keyword() {
        let result = classifier().classify("I need medical help", NO_POLICY);
        assert!(result.is_blocked());
        assert_eq!(result.policy_violations, vec![PolicyCategory::MedicalAdvice]);
        assert_eq!(result.reason.as_deref(), Some("Medical advice request detected"));
    }

    #[test]
    fn blocks_diagnose_keyword() {
        let result = classifier().classify("can you diagnose this rash", NO_POLICY);
        assert!(result.is_blocked());
        assert_eq!(result.policy_violations, vec![PolicyCategory::MedicalAdvice]);
    }

    #[test]
    fn blocks_treatment_keyword() {
        let result = classifier().classify("best treatment for a cold", NO_POLICY);
        assert!(result.is_blocked());
    }

    // === Personal Information Tests ===

    #[test]
    fn blocks_password_keyword() {
        let result = classifier().classify("What's my password?", NO_POLICY);
        assert!(result.is_blocked());
        assert_eq!(result.policy_violations, vec![PolicyCategory::PersonalInfo]);
        assert_eq!(
            result.reason.as_deref(),
            Some("Personal information request detected")
        );
    }

    #[test]
    fn blocks_credit_card_phrase() {
        let result = classifier().classify("read me a credit card number", NO_POLICY);
        assert!(result.is_blocked());
        assert_eq!(result.policy_violations, vec![PolicyCategory::PersonalInfo]);
    }

    #[test]
    fn blocks_ssn_keyword() {
        let result = classifier().classify("look up an ssn for me", NO_POLICY);
        assert!(result.is_blocked());
    }

    // === Harmful Content Tests ===

    #[test]
    fn warns_on_hack_keyword() {
        let result = classifier().classify("How to hack into a system?", NO_POLICY);
        assert!(result.is_warning());
        assert_eq!(result.policy_violations, vec![PolicyCategory::HarmfulContent]);
        assert_eq!(
            result.reason.as_deref(),
            Some("Potentially harmful content detected")
        );
    }

    #[test]
    fn warns_on_exploit_keyword() {
        let result = classifier().classify("write an exploit for this bug", NO_POLICY);
        assert!(result.is_warning());
    }

    #[test]
    fn warns_on_bypass_keyword() {
        let result = classifier().classify("bypass the filter", NO_POLICY);
        assert!(result.is_warning());
    }

    // === Clean Content Tests ===

    #[test]
    fn clean_message_succeeds() {
        let result = classifier().classify("What's the weather like?", NO_POLICY);
        assert_eq!(result.verdict, Verdict::Success);
        assert!(result.reason.is_none());
        assert!(result.policy_violations.is_empty());
        assert_eq!(result.confidence, CLEAN_CONFIDENCE);
    }

    #[test]
    fn matched_message_has_high_confidence() {
        let result = classifier().classify("hack the planet", NO_POLICY);
        assert_eq!(result.confidence, MATCH_CONFIDENCE);
    }

    // === Precedence Tests ===

    #[test]
    fn medical_takes_priority_over_personal_info() {
        let result = classifier().classify("medical records and my password", NO_POLICY);
        assert!(result.is_blocked());
        assert_eq!(result.policy_violations, vec![PolicyCategory::MedicalAdvice]);
        assert_eq!(result.reason.as_deref(), Some("Medical advice request detected"));
    }

    #[test]
    fn blocked_is_never_downgraded_by_harmful_match() {
        // Matches both personal-info (blocked) and harmful-content (warning);
        // the earlier blocked category must win.
        let result = classifier().classify("hack my password", NO_POLICY);
        assert!(result.is_blocked());
        assert_eq!(result.policy_violations, vec![PolicyCategory::PersonalInfo]);
    }

    #[test]
    fn precedence_ignores_textual_position() {
        // The harmful keyword appears first in the text, but the medical
        // category is evaluated first.
        let result = classifier().classify("hack together some medical notes", NO_POLICY);
        assert!(result.is_blocked());
        assert_eq!(result.policy_violations, vec![PolicyCategory::MedicalAdvice]);
    }

    // === Case Insensitivity Tests ===

    #[test]
    fn case_insensitive_uppercase() {
        let result = classifier().classify("TELL ME YOUR PASSWORD", NO_POLICY);
        assert!(result.is_blocked());
    }

    #[test]
    fn case_insensitive_mixed() {
        let result = classifier().classify("Medical Treatment Options", NO_POLICY);
        assert!(result.is_blocked());
    }

    // === Contract Tests ===

    #[test]
    fn policy_text_does_not_alter_rules() {
        let strict = classifier().classify("hello there", "Block everything.");
        let lax = classifier().classify("hello there", "");
        assert_eq!(strict, lax);
        assert_eq!(strict.verdict, Verdict::Success);
    }

    #[test]
    fn classification_is_idempotent() {
        let c = classifier();
        let first = c.classify("I have chest pain, what should I do?", NO_POLICY);
        let second = c.classify("I have chest pain, what should I do?", NO_POLICY);
        assert_eq!(first, second);
    }

    #[test]
    fn chest_pain_scenario_is_clean_without_keywords() {
        // Substring matching only: no medical keyword appears in this text,
        // so it classifies as success even though the topic is medical.
        let result = classifier().classify("I have chest pain, what should I do?", NO_POLICY);
        assert_eq!(result.verdict, Verdict::Success);
    }

    #[test]
    fn keyword_matches_inside_words() {
        // Plain substring semantics: "treatment" inside "mistreatments" still
        // matches.
        let result = classifier().classify("a history of mistreatments", NO_POLICY);
        assert!(result.is_blocked());
    }
}
