//! Wire models for the gateway API.
//!
//! The three-state chat outcome travels in two structurally different
//! encodings: the checked shape (independent inbound/outbound critic
//! verdicts, produced by the gateway) and the flat shape (a `status` field
//! plus analysis, produced by the demo stub). Both are variants of the
//! single [`ChatReply`] enum and normalize to the same
//! [`ClassificationResult`] at this boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nova_core::classifier::{
    ClassificationResult, PolicyCategory, Verdict, CLEAN_CONFIDENCE, MATCH_CONFIDENCE,
};

/// Inbound-check verdict meaning the prompt was rejected.
pub const INBOUND_MALICIOUS: &str = "MALICIOUS";

/// Outbound-check verdict meaning the reply violated the policy.
pub const OUTBOUND_FAIL: &str = "FAIL";

/// The authenticated account in an auth response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Response body for login and signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

/// Inbound (prompt) security check result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundCheck {
    /// `SAFE` or `MALICIOUS`.
    pub verdict: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub confidence_score: f32,
    /// Attack classification, `none` when safe.
    #[serde(default)]
    pub attack_type: String,
}

/// Outbound (reply) policy check result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundCheck {
    /// `PASS` or `FAIL`.
    pub verdict: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub confidence_score: f32,
}

/// Checked wire shape: the gateway response with per-direction verdicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub llm_response: String,
    pub inbound_check: InboundCheck,
    pub outbound_check: OutboundCheck,
}

/// Analysis block of the flat wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub threat_detected: bool,
    pub policy_violations: Vec<PolicyCategory>,
    pub confidence: f32,
}

/// Flat wire shape: verdict carried directly as `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatChatResponse {
    pub response: String,
    pub status: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub analysis: Analysis,
}

/// A chat reply in either wire encoding.
///
/// The two shapes have disjoint required fields (`llm_response` vs.
/// `response`), so untagged deserialization is unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatReply {
    /// Gateway response with independent inbound/outbound verdicts.
    Checked(GatewayResponse),
    /// Stub response with a flat status field.
    Flat(FlatChatResponse),
}

/// A chat reply normalized to the internal classification contract.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReply {
    /// The assistant reply text.
    pub text: String,
    /// The three-state outcome in canonical form.
    pub classification: ClassificationResult,
}

impl ChatReply {
    /// Normalizes either wire shape to the canonical result.
    ///
    /// Checked-shape mapping: inbound `MALICIOUS` wins and maps to
    /// `blocked`; otherwise outbound `FAIL` maps to `warning`; otherwise
    /// `success`. Confidence uses the same stub constants as the local
    /// classifier so both transports report identically. Category tags are
    /// not carried by the checked shape and normalize to an empty set.
    pub fn normalize(self) -> NormalizedReply {
        match self {
            ChatReply::Flat(flat) => NormalizedReply {
                text: flat.response,
                classification: ClassificationResult {
                    verdict: flat.status,
                    reason: flat.reason,
                    threat_detected: flat.analysis.threat_detected,
                    policy_violations: flat.analysis.policy_violations,
                    confidence: flat.analysis.confidence,
                },
            },
            ChatReply::Checked(checked) => {
                let (verdict, reason) = if checked.inbound_check.verdict == INBOUND_MALICIOUS {
                    (Verdict::Blocked, non_empty(checked.inbound_check.reasoning))
                } else if checked.outbound_check.verdict == OUTBOUND_FAIL {
                    (Verdict::Warning, non_empty(checked.outbound_check.reasoning))
                } else {
                    (Verdict::Success, None)
                };

                let threat_detected = verdict.is_threat();
                NormalizedReply {
                    text: checked.llm_response,
                    classification: ClassificationResult {
                        verdict,
                        reason,
                        threat_detected,
                        policy_violations: Vec::new(),
                        confidence: if threat_detected {
                            MATCH_CONFIDENCE
                        } else {
                            CLEAN_CONFIDENCE
                        },
                    },
                }
            }
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Response body for POST /api/v1/direct-chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectChatResponse {
    pub response: String,
}

/// Dashboard counters from GET /api/v1/analytics/dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsData {
    pub total_requests: u64,
    pub blocked_threats: u64,
    pub warned_requests: u64,
    pub successful_requests: u64,
    pub average_response_time_ms: f64,
    pub uptime_seconds: u64,
}

/// One gateway transaction from GET /api/v1/logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub ai_response: String,
    pub status: Verdict,
    pub threat_detected: bool,
    pub policy_violations: Vec<PolicyCategory>,
    pub response_time_ms: u64,
}

/// Paginated logs response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsPage {
    pub logs: Vec<LogRecord>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn checked_shape_deserializes_as_checked() {
        let body = json!({
            "llm_response": "Paris is the capital of France.",
            "inbound_check": {
                "verdict": "SAFE",
                "reasoning": "No injection detected.",
                "confidence_score": 0.98,
                "attack_type": "none"
            },
            "outbound_check": {
                "verdict": "PASS",
                "reasoning": "Within policy.",
                "confidence_score": 0.97
            }
        });

        let reply: ChatReply = serde_json::from_value(body).unwrap();
        assert!(matches!(reply, ChatReply::Checked(_)));

        let normalized = reply.normalize();
        assert_eq!(normalized.classification.verdict, Verdict::Success);
        assert!(normalized.classification.reason.is_none());
        assert!(!normalized.classification.threat_detected);
        assert_eq!(normalized.classification.confidence, CLEAN_CONFIDENCE);
    }

    #[test]
    fn flat_shape_deserializes_as_flat() {
        let body = json!({
            "response": "I cannot process this request as it violates our security policies.",
            "status": "blocked",
            "reason": "Personal information request detected",
            "analysis": {
                "threat_detected": true,
                "policy_violations": ["personal_info"],
                "confidence": 0.95
            }
        });

        let reply: ChatReply = serde_json::from_value(body).unwrap();
        assert!(matches!(reply, ChatReply::Flat(_)));

        let normalized = reply.normalize();
        assert_eq!(normalized.classification.verdict, Verdict::Blocked);
        assert_eq!(
            normalized.classification.reason.as_deref(),
            Some("Personal information request detected")
        );
        assert_eq!(
            normalized.classification.policy_violations,
            vec![PolicyCategory::PersonalInfo]
        );
    }

    #[test]
    fn malicious_inbound_normalizes_to_blocked() {
        let reply = ChatReply::Checked(GatewayResponse {
            llm_response: "BLOCKED".to_string(),
            inbound_check: InboundCheck {
                verdict: "MALICIOUS".to_string(),
                reasoning: "Instruction hijacking attempt.".to_string(),
                confidence_score: 0.99,
                attack_type: "instruction_hijacking".to_string(),
            },
            outbound_check: OutboundCheck {
                verdict: "PASS".to_string(),
                reasoning: String::new(),
                confidence_score: 0.0,
            },
        });

        let normalized = reply.normalize();
        assert_eq!(normalized.classification.verdict, Verdict::Blocked);
        assert_eq!(
            normalized.classification.reason.as_deref(),
            Some("Instruction hijacking attempt.")
        );
        assert_eq!(normalized.classification.confidence, MATCH_CONFIDENCE);
    }

    #[test]
    fn failed_outbound_normalizes_to_warning() {
        let reply = ChatReply::Checked(GatewayResponse {
            llm_response: "Flagged answer".to_string(),
            inbound_check: InboundCheck {
                verdict: "SAFE".to_string(),
                reasoning: String::new(),
                confidence_score: 0.9,
                attack_type: "none".to_string(),
            },
            outbound_check: OutboundCheck {
                verdict: "FAIL".to_string(),
                reasoning: "Reply skirts the policy.".to_string(),
                confidence_score: 0.8,
            },
        });

        let normalized = reply.normalize();
        assert_eq!(normalized.classification.verdict, Verdict::Warning);
        assert_eq!(
            normalized.classification.reason.as_deref(),
            Some("Reply skirts the policy.")
        );
        assert!(normalized.classification.threat_detected);
    }

    #[test]
    fn malicious_inbound_wins_over_failed_outbound() {
        let reply = ChatReply::Checked(GatewayResponse {
            llm_response: "BLOCKED".to_string(),
            inbound_check: InboundCheck {
                verdict: "MALICIOUS".to_string(),
                reasoning: String::new(),
                confidence_score: 0.9,
                attack_type: "prompt_leaking".to_string(),
            },
            outbound_check: OutboundCheck {
                verdict: "FAIL".to_string(),
                reasoning: "irrelevant".to_string(),
                confidence_score: 0.5,
            },
        });

        assert_eq!(reply.normalize().classification.verdict, Verdict::Blocked);
    }

    #[test]
    fn checked_shape_tolerates_missing_optional_fields() {
        let body = json!({
            "llm_response": "hi",
            "inbound_check": {"verdict": "SAFE"},
            "outbound_check": {"verdict": "PASS"}
        });
        let reply: ChatReply = serde_json::from_value(body).unwrap();
        assert_eq!(reply.normalize().classification.verdict, Verdict::Success);
    }
}
