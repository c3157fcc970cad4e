//! API route handlers.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::{Form, Json};
use tracing::{debug, info};

use nova_core::auth::SessionToken;
use nova_core::classifier::{PolicyCategory, Verdict};
use nova_core::policy::PolicyRecord;

use crate::error::{ApiError, Result};
use crate::models::{
    AuthResponse, DashboardResponse, DemoChatRequest, DemoChatResponse, DirectChatRequest,
    DirectChatResponse, HealthResponse, InboundCheckResponse, LogEntryResponse, LoginForm,
    LogsQuery, LogsResponse, OutboundCheckResponse, SignupRequest, UserResponse,
};
use crate::state::AppState;

const SAFE_REASONING: &str = "No policy violation detected";

/// GET / - Health check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Nova Gateway API is operational.",
    })
}

/// POST /api/v1/demo-chat - Classify a prompt and reply through the gateway.
///
/// Always answers 200 with both check verdicts; blocked prompts carry
/// `MALICIOUS` on the inbound check, flagged replies carry `FAIL` on the
/// outbound check.
pub async fn demo_chat(
    State(state): State<AppState>,
    Json(req): Json<DemoChatRequest>,
) -> Result<Json<DemoChatResponse>> {
    let started = Instant::now();
    debug!(prompt_len = req.prompt.len(), "demo-chat request");

    let result = state.classifier.classify(&req.prompt, &req.policy);

    let reply = {
        let mut replies = state.replies.lock().unwrap();
        replies.reply_for(result.verdict)
    };

    let response_time_ms = started.elapsed().as_millis() as u64;

    {
        let mut events = state.events.write().unwrap();
        events.append(
            req.prompt.clone(),
            reply.to_string(),
            result.verdict,
            result.threat_detected,
            result.policy_violations.clone(),
            response_time_ms,
        );
    }

    info!(
        verdict = result.verdict.name(),
        response_time_ms,
        "demo-chat complete"
    );

    let reason = result.reason.clone().unwrap_or_default();
    let attack_type = result
        .policy_violations
        .first()
        .map(|c| category_tag(*c).to_string())
        .unwrap_or_else(|| "none".to_string());

    let (inbound, outbound) = match result.verdict {
        Verdict::Blocked => (
            InboundCheckResponse {
                verdict: "MALICIOUS",
                reasoning: reason,
                confidence_score: result.confidence,
                attack_type,
            },
            OutboundCheckResponse {
                verdict: "PASS",
                reasoning: String::new(),
                confidence_score: 0.0,
            },
        ),
        Verdict::Warning => (
            InboundCheckResponse {
                verdict: "SAFE",
                reasoning: SAFE_REASONING.to_string(),
                confidence_score: result.confidence,
                attack_type: "none".to_string(),
            },
            OutboundCheckResponse {
                verdict: "FAIL",
                reasoning: reason,
                confidence_score: result.confidence,
            },
        ),
        Verdict::Success => (
            InboundCheckResponse {
                verdict: "SAFE",
                reasoning: SAFE_REASONING.to_string(),
                confidence_score: result.confidence,
                attack_type: "none".to_string(),
            },
            OutboundCheckResponse {
                verdict: "PASS",
                reasoning: SAFE_REASONING.to_string(),
                confidence_score: result.confidence,
            },
        ),
    };

    Ok(Json(DemoChatResponse {
        llm_response: reply.to_string(),
        inbound_check: inbound,
        outbound_check: outbound,
    }))
}

/// Wire tag for a policy category (e.g. `medical_advice`), matching its
/// serde encoding.
fn category_tag(category: PolicyCategory) -> &'static str {
    match category {
        PolicyCategory::MedicalAdvice => "medical_advice",
        PolicyCategory::PersonalInfo => "personal_info",
        PolicyCategory::HarmfulContent => "harmful_content",
    }
}

/// POST /api/v1/direct-chat - Reply without any classification.
pub async fn direct_chat(
    State(state): State<AppState>,
    Json(req): Json<DirectChatRequest>,
) -> Result<Json<DirectChatResponse>> {
    debug!(prompt_len = req.prompt.len(), "direct-chat request");

    let reply = {
        let mut replies = state.replies.lock().unwrap();
        replies.next_reply()
    };

    Ok(Json(DirectChatResponse {
        response: reply.to_string(),
    }))
}

/// POST /api/v1/signup - Create an account and return a session.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let email = req.email.trim().to_string();
    if email.is_empty() {
        return Err(ApiError::BadRequest("email cannot be empty".to_string()));
    }

    let password_hash = state.auth.hash_password(&req.password)?;

    let account = {
        let mut accounts = state.accounts.write().unwrap();
        if accounts.contains(&email) {
            return Err(ApiError::BadRequest(
                "a user with this email already exists".to_string(),
            ));
        }
        accounts.insert(req.full_name, email, password_hash)
    };

    let token = state.auth.create_session(&account.email);
    info!(user_id = %account.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(auth_response(token, &account.id, &account.email, &account.full_name)),
    ))
}

/// POST /api/v1/login - Verify credentials and return a session.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<AuthResponse>> {
    let account = {
        let accounts = state.accounts.read().unwrap();
        accounts.get(&form.username).cloned()
    };

    let Some(account) = account else {
        return Err(ApiError::InvalidCredentials);
    };

    let valid = state
        .auth
        .verify_password(&form.password, &account.password_hash)
        .map_err(|_| ApiError::InvalidCredentials)?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.auth.create_session(&account.email);
    info!(user_id = %account.id, "login successful");

    Ok(Json(auth_response(
        token,
        &account.id,
        &account.email,
        &account.full_name,
    )))
}

fn auth_response(token: SessionToken, id: &str, email: &str, name: &str) -> AuthResponse {
    AuthResponse {
        access_token: token.as_str().to_string(),
        token_type: "bearer",
        user: UserResponse {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
        },
    }
}

/// GET /api/v1/analytics/dashboard - Counters over the transaction log.
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>> {
    require_session(&state, &headers)?;

    let stats = {
        let events = state.events.read().unwrap();
        events.stats()
    };

    Ok(Json(DashboardResponse {
        total_requests: stats.total,
        blocked_threats: stats.blocked,
        warned_requests: stats.warned,
        successful_requests: stats.successful,
        average_response_time_ms: stats.average_response_time_ms,
        uptime_seconds: state.started.elapsed().as_secs(),
    }))
}

/// GET /api/v1/logs - Paginated transaction log, newest first.
pub async fn get_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LogsQuery>,
) -> Result<Json<LogsResponse>> {
    require_session(&state, &headers)?;

    if query.limit == 0 {
        return Err(ApiError::BadRequest("limit must be positive".to_string()));
    }

    let (entries, total) = {
        let events = state.events.read().unwrap();
        (events.page(query.page, query.limit), events.len() as u64)
    };

    let logs: Vec<LogEntryResponse> = entries
        .into_iter()
        .map(|e| LogEntryResponse {
            id: e.id,
            timestamp: e.timestamp,
            user_message: e.user_message,
            ai_response: e.ai_response,
            status: e.verdict,
            threat_detected: e.threat_detected,
            policy_violations: e.policy_violations,
            response_time_ms: e.response_time_ms,
        })
        .collect();

    Ok(Json(LogsResponse {
        logs,
        total,
        page: query.page,
        total_pages: total.div_ceil(query.limit),
    }))
}

/// GET /api/v1/policies - Built-in policy records.
pub async fn get_policies(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PolicyRecord>>> {
    require_session(&state, &headers)?;
    Ok(Json(state.policies.as_ref().clone()))
}

/// Validates the bearer token in the Authorization header.
fn require_session(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    if state.auth.validate_session(&SessionToken::from_string(token)) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}
