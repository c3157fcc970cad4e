//! Client error types.

use thiserror::Error;

/// Errors surfaced by the gateway client.
///
/// Transport failures and non-OK statuses are reported as-is; the client
/// never retries (a failed call is surfaced once to the caller).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, decode).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-OK status.
    #[error("api error ({status}): {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail, or the status reason when absent.
        detail: String,
    },

    /// An authenticated endpoint was called without a session.
    #[error("not authenticated: call login or signup first")]
    NotAuthenticated,
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
