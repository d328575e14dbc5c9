//! Post mutation actions.
//!
//! Wraps the create/delete/react calls the list views trigger, with
//! client-side validation and a per-action submit gate: an empty post never
//! reaches the network, and a second submit while one is outstanding is
//! rejected instead of duplicated.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use plaza_core::api::{PlatformApi, Reaction};
use plaza_core::error::{PlazaError, Result};
use plaza_core::token::TokenStore;

/// Executes authenticated post mutations.
pub struct Composer {
    api: Arc<dyn PlatformApi>,
    tokens: Arc<dyn TokenStore>,
    /// True while a publish is outstanding; gates duplicate submissions of
    /// the same action.
    submitting: AtomicBool,
}

impl Composer {
    pub fn new(api: Arc<dyn PlatformApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether a publish is currently outstanding.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Publishes a new post.
    ///
    /// Empty or whitespace-only content is rejected before any network call.
    /// A concurrent duplicate submit is rejected while the first is still
    /// outstanding.
    pub async fn publish(&self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PlazaError::validation("Post content cannot be empty"));
        }

        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(PlazaError::validation("A post is already being submitted"));
        }

        let result = match self.access_token().await {
            Ok(token) => {
                self.api
                    .create_post(&token, serde_json::json!({ "content": content }))
                    .await
            }
            Err(err) => Err(err),
        };

        self.submitting.store(false, Ordering::SeqCst);
        result
    }

    /// Deletes a post by id.
    pub async fn delete(&self, id: u64) -> Result<()> {
        let token = self.access_token().await?;
        self.api.delete_post(&token, id).await
    }

    /// Reacts to a post.
    pub async fn react(&self, id: u64, reaction: Reaction) -> Result<()> {
        let token = self.access_token().await?;
        self.api.react_post(&token, id, reaction).await
    }

    async fn access_token(&self) -> Result<String> {
        self.tokens
            .access_token()
            .await
            .ok_or(PlazaError::NotAuthenticated)
    }
}
