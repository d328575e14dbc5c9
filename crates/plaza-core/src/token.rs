//! Credential storage trait.
//!
//! The web client keeps its access/refresh tokens in the browser cookie
//! store; natively they live in a credential file. This trait is that
//! collaborator expressed as a seam, so the session logic is independent of
//! where the tokens actually live.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An access/refresh token pair as issued by the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Storage for the current credential pair.
///
/// Absence of a token is a valid state, not an error; reads never touch the
/// network.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Credential files have appropriate permissions (e.g., 600 on Unix)
/// - Tokens are never logged or exposed in error messages
#[async_trait::async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored access token, if any.
    async fn access_token(&self) -> Option<String>;

    /// Returns the stored refresh token, if any.
    async fn refresh_token(&self) -> Option<String>;

    /// Replaces the stored pair with a freshly issued one.
    async fn store(&self, pair: TokenPair) -> Result<()>;

    /// Removes all stored credentials.
    async fn clear(&self) -> Result<()>;
}
