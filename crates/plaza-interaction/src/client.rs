//! ApiClient - reqwest implementation of the platform REST API.
//!
//! One client per process is enough; `reqwest::Client` pools connections
//! internally and the struct is cheap to clone.

use std::time::Duration;

use plaza_core::api::{PlatformApi, Reaction};
use plaza_core::error::{PlazaError, Result};
use plaza_core::page::{PageQuery, PagedResponse};
use plaza_core::token::TokenPair;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;

/// Endpoint path of the global post feed.
pub const POSTS_ENDPOINT: &str = "/api/posts";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct RefreshGrant<'a> {
    refresh_token: &'a str,
    grant_type: &'static str,
}

/// HTTP client for the platform API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client against the given API base URL (no trailing slash
    /// needed; one is stripped if present).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and maps any non-success status to
    /// `PlazaError::Api` carrying the response body text verbatim.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| PlazaError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!(status = status.as_u16(), "API request failed: {}", body);
            return Err(PlazaError::api(status.as_u16(), body));
        }

        Ok(response)
    }

    /// Like `send`, but discards the response body. Used by mutations whose
    /// callers only need success or the error text.
    async fn send_unit(&self, request: RequestBuilder) -> Result<()> {
        self.send(request).await.map(|_| ())
    }
}

#[async_trait::async_trait]
impl PlatformApi for ApiClient {
    async fn fetch_userinfo(&self, access_token: &str) -> Result<serde_json::Value> {
        let response = self
            .send(self.client.get(self.url("/api/users/me")).bearer_auth(access_token))
            .await?;

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| PlazaError::network(format!("Failed to parse profile response: {}", e)))
    }

    async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair> {
        let body = RefreshGrant {
            refresh_token,
            grant_type: "refresh_token",
        };

        let response = self
            .send(self.client.post(self.url("/api/auth/token")).json(&body))
            .await?;

        response
            .json::<TokenPair>()
            .await
            .map_err(|e| PlazaError::network(format!("Failed to parse token response: {}", e)))
    }

    async fn list(&self, endpoint: &str, query: &PageQuery) -> Result<PagedResponse> {
        let response = self
            .send(self.client.get(self.url(endpoint)).query(&query.to_params()))
            .await?;

        response
            .json::<PagedResponse>()
            .await
            .map_err(|e| PlazaError::network(format!("Failed to parse list response: {}", e)))
    }

    async fn create_post(&self, access_token: &str, body: serde_json::Value) -> Result<()> {
        self.send_unit(
            self.client
                .post(self.url(POSTS_ENDPOINT))
                .bearer_auth(access_token)
                .json(&body),
        )
        .await
    }

    async fn delete_post(&self, access_token: &str, id: u64) -> Result<()> {
        self.send_unit(
            self.client
                .delete(self.url(&format!("{}/{}", POSTS_ENDPOINT, id)))
                .bearer_auth(access_token),
        )
        .await
    }

    async fn react_post(&self, access_token: &str, id: u64, reaction: Reaction) -> Result<()> {
        self.send_unit(
            self.client
                .post(self.url(&format!("{}/{}/react", POSTS_ENDPOINT, id)))
                .bearer_auth(access_token)
                .json(&serde_json::json!({ "reaction": reaction.as_str() })),
        )
        .await
    }
}
