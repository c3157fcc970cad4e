//! Gateway policies.
//!
//! Two forms exist: the free-text policy the demo threads through the chat
//! endpoints, and the structured records served by the `/policies`
//! collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default demo policy text.
pub const DEFAULT_POLICY_TEXT: &str =
    "Do not provide medical advice. Do not share personal information. Be helpful and professional.";

/// Free-text policy threaded through classification and the chat endpoints.
///
/// The classifier accepts but does not parse this text; it exists to keep
/// the gateway contract intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy(String);

impl Policy {
    /// Creates a policy from free text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the demo's default policy.
    pub fn demo_default() -> Self {
        Self::new(DEFAULT_POLICY_TEXT)
    }

    /// Returns the policy text.
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::demo_default()
    }
}

impl From<&str> for Policy {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Structured policy record served by the policies collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rules: Vec<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PolicyRecord {
    /// Creates an enabled record with matching creation and update times.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        rules: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            rules,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Built-in demo policy records.
pub fn builtin_records() -> Vec<PolicyRecord> {
    vec![
        PolicyRecord::new(
            "medical-advice",
            "Medical Advice",
            "Refuse requests for medical diagnoses or treatment guidance.",
            vec![
                "Do not provide medical advice.".to_string(),
                "Do not diagnose conditions or recommend treatments.".to_string(),
            ],
        ),
        PolicyRecord::new(
            "personal-info",
            "Personal Information",
            "Refuse requests involving credentials or personal data.",
            vec![
                "Do not share passwords or credentials.".to_string(),
                "Do not disclose payment or identity information.".to_string(),
            ],
        ),
        PolicyRecord::new(
            "harmful-content",
            "Harmful Content",
            "Flag requests that may enable abuse for review.",
            vec!["Flag hacking, exploit, and bypass requests.".to_string()],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_has_demo_text() {
        let policy = Policy::default();
        assert_eq!(policy.text(), DEFAULT_POLICY_TEXT);
    }

    #[test]
    fn policy_from_str() {
        let policy: Policy = "Be terse.".into();
        assert_eq!(policy.text(), "Be terse.");
    }

    #[test]
    fn builtin_records_are_enabled() {
        let records = builtin_records();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.enabled));
        assert!(records.iter().all(|r| !r.rules.is_empty()));
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = PolicyRecord::new("p1", "Test", "A test policy.", vec!["rule".to_string()]);
        let json = serde_json::to_string(&record).unwrap();
        let back: PolicyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
