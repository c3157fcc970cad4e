//! Account authentication primitives.
//!
//! Provides Argon2 password hashing and bearer-session management for the
//! gateway API.
//!
//! ## Usage
//!
//! ```
//! use nova_core::auth::AuthManager;
//!
//! let auth = AuthManager::new();
//!
//! // Hash a password at signup
//! let hash = auth.hash_password("secret123").unwrap();
//!
//! // Verify it at login
//! assert!(auth.verify_password("secret123", &hash).unwrap());
//!
//! // Issue a bearer session for the account
//! let token = auth.create_session("user@example.com");
//! assert!(auth.validate_session(&token));
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum password length requirement.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Session idle timeout (30 minutes).
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password is empty.
    #[error("password cannot be empty")]
    PasswordEmpty,

    /// Password hashing failed.
    #[error("failed to hash password: {0}")]
    HashingFailed(String),

    /// Password verification failed (invalid hash format).
    #[error("failed to verify password: {0}")]
    VerificationFailed(String),

    /// Session expired or invalid.
    #[error("session expired or invalid")]
    SessionInvalid,
}

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// An opaque bearer token representing an authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    /// Creates a new random session token.
    pub fn new() -> Self {
        let salt = SaltString::generate(&mut OsRng);
        Self(salt.to_string())
    }

    /// Reconstructs a token from a bearer header value.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the token as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-session data with idle-expiry tracking.
#[derive(Debug, Clone)]
struct SessionData {
    /// Email of the account that owns the session.
    subject: String,
    /// When the session was last used.
    last_used: Instant,
}

impl SessionData {
    fn new(subject: String) -> Self {
        Self {
            subject,
            last_used: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.last_used.elapsed() > SESSION_TIMEOUT
    }

    fn touch(&mut self) {
        self.last_used = Instant::now();
    }
}

/// Authentication manager: password hashing plus session issuance.
#[derive(Debug, Clone, Default)]
pub struct AuthManager {
    sessions: Arc<RwLock<HashMap<SessionToken, SessionData>>>,
}

impl AuthManager {
    /// Creates a new authentication manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates that a password meets requirements.
    pub fn validate_password(password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(AuthError::PasswordEmpty);
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort);
        }

        Ok(())
    }

    /// Hashes a password with Argon2, returning a PHC-format string.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        Self::validate_password(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashingFailed(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verifies a password against a stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::VerificationFailed(e.to_string()))?;

        let argon2 = Argon2::default();

        match argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::VerificationFailed(e.to_string())),
        }
    }

    /// Creates a session for the given account and returns its token.
    ///
    /// Call this after successful password verification. Expired sessions
    /// are swept while the write lock is held.
    pub fn create_session(&self, subject: impl Into<String>) -> SessionToken {
        let token = SessionToken::new();
        let data = SessionData::new(subject.into());

        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(token.clone(), data);
        sessions.retain(|_, data| !data.is_expired());

        token
    }

    /// Validates a session token and refreshes its expiry if valid.
    pub fn validate_session(&self, token: &SessionToken) -> bool {
        let mut sessions = self.sessions.write().unwrap();

        if let Some(data) = sessions.get_mut(token) {
            if data.is_expired() {
                sessions.remove(token);
                return false;
            }
            data.touch();
            return true;
        }

        false
    }

    /// Returns the account email behind a valid session, refreshing expiry.
    pub fn session_subject(&self, token: &SessionToken) -> Option<String> {
        let mut sessions = self.sessions.write().unwrap();

        if let Some(data) = sessions.get_mut(token) {
            if data.is_expired() {
                sessions.remove(token);
                return None;
            }
            data.touch();
            return Some(data.subject.clone());
        }

        None
    }

    /// Invalidates (logs out) a session.
    pub fn invalidate_session(&self, token: &SessionToken) {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(token);
    }

    /// Returns the number of active (non-expired) sessions.
    pub fn active_session_count(&self) -> usize {
        let sessions = self.sessions.read().unwrap();
        sessions.values().filter(|d| !d.is_expired()).count()
    }
}
