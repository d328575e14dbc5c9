//! Platform API trait.
//!
//! Defines the REST surface this client consumes. The reqwest implementation
//! lives in `plaza-interaction`; tests substitute in-memory fakes.

use crate::error::Result;
use crate::page::{PageQuery, PagedResponse};
use crate::token::TokenPair;

/// Reaction kinds a post accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    /// Wire name of the reaction, as the API expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Reaction::Like => "like",
            Reaction::Dislike => "dislike",
        }
    }
}

/// The REST API consumed by the client.
///
/// Error contract: a non-success response surfaces as
/// [`PlazaError::Api`](crate::PlazaError::Api) carrying the response body
/// text verbatim; transport failures surface as
/// [`PlazaError::Network`](crate::PlazaError::Network). Callers treat both
/// uniformly as "not ok" and do not retry beyond the single bounded
/// credential refresh in the session service.
#[async_trait::async_trait]
pub trait PlatformApi: Send + Sync {
    /// `GET /api/users/me` with bearer auth. Returns the raw profile payload.
    async fn fetch_userinfo(&self, access_token: &str) -> Result<serde_json::Value>;

    /// `POST /api/auth/token` with a refresh grant. Returns the new pair.
    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair>;

    /// Paged GET against a list endpoint (e.g. `/api/posts`).
    async fn list(&self, endpoint: &str, query: &PageQuery) -> Result<PagedResponse>;

    /// `POST /api/posts`. Publishes a new post.
    async fn create_post(&self, access_token: &str, body: serde_json::Value) -> Result<()>;

    /// `DELETE /api/posts/{id}`.
    async fn delete_post(&self, access_token: &str, id: u64) -> Result<()>;

    /// `POST /api/posts/{id}/react` with the given reaction.
    async fn react_post(&self, access_token: &str, id: u64, reaction: Reaction) -> Result<()>;
}
