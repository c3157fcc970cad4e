//! Nova Client - async HTTP client for the Nova gateway API.
//!
//! Wraps the gateway's REST endpoints behind typed methods and normalizes
//! both chat wire shapes to the core classification contract. Session state
//! is explicit: login/signup return a [`Session`] which the client carries
//! and attaches as a bearer header to authenticated reads.
//!
//! ## Example
//!
//! ```no_run
//! use nova_client::GatewayClient;
//!
//! # async fn run() -> Result<(), nova_client::ClientError> {
//! let mut client = GatewayClient::new("http://127.0.0.1:8000")?;
//! client.login("user@example.com", "secret-password").await?;
//!
//! let reply = client.demo_chat("What's the weather like?", "Be helpful.").await?;
//! println!("{} -> {:?}", reply.text, reply.classification.verdict);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod session;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use nova_core::policy::PolicyRecord;

use crate::models::{
    AnalyticsData, AuthResponse, ChatReply, DirectChatResponse, LogsPage, NormalizedReply,
};

pub use error::{ClientError, Result};
pub use session::Session;

/// Default gateway base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Async client for the Nova gateway API.
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
    session: Option<Session>,
}

impl GatewayClient {
    /// Creates a client for the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("Nova/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self {
            base_url,
            http,
            session: None,
        })
    }

    /// Returns the current session, if authenticated.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Installs a previously obtained session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Drops the current session.
    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Logs in with form-encoded credentials and stores the session.
    ///
    /// The gateway follows the OAuth2 password form convention: the email
    /// travels in the `username` field.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        let url = self.url("/api/v1/login");
        debug!(%url, "logging in");

        let response = self
            .http
            .post(&url)
            .form(&[("username", email), ("password", password)])
            .send()
            .await?;

        let auth: AuthResponse = Self::decode(response).await?;
        let session = Session {
            access_token: auth.access_token,
            token_type: auth.token_type,
            user: auth.user,
        };
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Creates an account and stores the returned session.
    pub async fn signup(&mut self, full_name: &str, email: &str, password: &str) -> Result<Session> {
        #[derive(Serialize)]
        struct SignupBody<'a> {
            full_name: &'a str,
            email: &'a str,
            password: &'a str,
        }

        let auth: AuthResponse = self
            .post_json(
                "/api/v1/signup",
                &SignupBody {
                    full_name,
                    email,
                    password,
                },
            )
            .await?;

        let session = Session {
            access_token: auth.access_token,
            token_type: auth.token_type,
            user: auth.user,
        };
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Sends a prompt through the protected gateway endpoint.
    ///
    /// The response arrives in either wire shape and is normalized to the
    /// canonical classification result.
    pub async fn demo_chat(&self, prompt: &str, policy: &str) -> Result<NormalizedReply> {
        #[derive(Serialize)]
        struct DemoChatBody<'a> {
            prompt: &'a str,
            policy: &'a str,
        }

        let reply: ChatReply = self
            .post_json("/api/v1/demo-chat", &DemoChatBody { prompt, policy })
            .await?;
        Ok(reply.normalize())
    }

    /// Sends a prompt straight to the model, bypassing classification.
    pub async fn direct_chat(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct DirectChatBody<'a> {
            prompt: &'a str,
        }

        let reply: DirectChatResponse = self
            .post_json("/api/v1/direct-chat", &DirectChatBody { prompt })
            .await?;
        Ok(reply.response)
    }

    /// Fetches dashboard counters. Requires a session.
    pub async fn dashboard(&self) -> Result<AnalyticsData> {
        self.get_json("/api/v1/analytics/dashboard").await
    }

    /// Fetches a page of gateway transaction logs. Requires a session.
    pub async fn logs(&self, page: u64, limit: u64) -> Result<LogsPage> {
        self.get_json(&format!("/api/v1/logs?page={page}&limit={limit}"))
            .await
    }

    /// Fetches the policy records. Requires a session.
    pub async fn policies(&self) -> Result<Vec<PolicyRecord>> {
        self.get_json("/api/v1/policies").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<String> {
        self.session
            .as_ref()
            .map(Session::bearer)
            .ok_or(ClientError::NotAuthenticated)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.bearer()?)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "POST");

        let response = self.http.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        Err(ClientError::Status {
            status: status.as_u16(),
            detail: Self::error_detail(status, response).await,
        })
    }

    /// Pulls a human-readable detail out of an error body, falling back to
    /// the status reason. Bodies arrive as `{"error": ...}` from the
    /// gateway or `{"detail": ...}` from FastAPI-style backends.
    async fn error_detail(status: StatusCode, response: reqwest::Response) -> String {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            #[serde(alias = "detail")]
            error: Option<String>,
        }

        if let Ok(body) = response.json::<ErrorBody>().await {
            if let Some(detail) = body.error {
                return detail;
            }
        }

        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    }
}
