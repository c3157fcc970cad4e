//! Explicit session state for authenticated calls.
//!
//! The session is a value handed back from login/signup and carried by the
//! client; there is no ambient global token store.

use serde::{Deserialize, Serialize};

use crate::models::AuthUser;

/// An authenticated session: bearer token plus the account it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token type, normally `bearer`.
    pub token_type: String,
    /// The authenticated account.
    pub user: AuthUser,
}

impl Session {
    /// Returns the value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}
