//! API request and response models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nova_core::classifier::{PolicyCategory, Verdict};
use nova_core::policy::DEFAULT_POLICY_TEXT;

/// Request body for POST /api/v1/demo-chat.
#[derive(Debug, Deserialize)]
pub struct DemoChatRequest {
    /// The user's prompt.
    pub prompt: String,
    /// Advisory policy text threaded through the gateway.
    #[serde(default = "default_policy")]
    pub policy: String,
}

fn default_policy() -> String {
    DEFAULT_POLICY_TEXT.to_string()
}

/// Inbound (prompt) check in the gateway response.
#[derive(Debug, Serialize)]
pub struct InboundCheckResponse {
    /// `SAFE` or `MALICIOUS`.
    pub verdict: &'static str,
    pub reasoning: String,
    pub confidence_score: f32,
    /// Category tag of the violation, `none` when safe.
    pub attack_type: String,
}

/// Outbound (reply) check in the gateway response.
#[derive(Debug, Serialize)]
pub struct OutboundCheckResponse {
    /// `PASS` or `FAIL`.
    pub verdict: &'static str,
    pub reasoning: String,
    pub confidence_score: f32,
}

/// Response body for POST /api/v1/demo-chat.
#[derive(Debug, Serialize)]
pub struct DemoChatResponse {
    pub llm_response: String,
    pub inbound_check: InboundCheckResponse,
    pub outbound_check: OutboundCheckResponse,
}

/// Request body for POST /api/v1/direct-chat.
#[derive(Debug, Deserialize)]
pub struct DirectChatRequest {
    pub prompt: String,
}

/// Response body for POST /api/v1/direct-chat.
#[derive(Debug, Serialize)]
pub struct DirectChatResponse {
    pub response: String,
}

/// Request body for POST /api/v1/signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Form body for POST /api/v1/login.
///
/// Follows the OAuth2 password form convention: the email travels in the
/// `username` field.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// The authenticated account in an auth response.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Response body for login and signup.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub user: UserResponse,
}

/// Response body for GET /api/v1/analytics/dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_requests: u64,
    pub blocked_threats: u64,
    pub warned_requests: u64,
    pub successful_requests: u64,
    pub average_response_time_ms: f64,
    pub uptime_seconds: u64,
}

/// Query parameters for GET /api/v1/logs.
#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    /// 1-based page number (default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size (default: 50).
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    50
}

/// One gateway transaction in the logs response.
#[derive(Debug, Serialize)]
pub struct LogEntryResponse {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user_message: String,
    pub ai_response: String,
    pub status: Verdict,
    pub threat_detected: bool,
    pub policy_violations: Vec<PolicyCategory>,
    pub response_time_ms: u64,
}

/// Response body for GET /api/v1/logs.
#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<LogEntryResponse>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}
