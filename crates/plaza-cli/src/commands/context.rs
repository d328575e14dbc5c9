//! Shared command wiring.

use std::sync::Arc;

use anyhow::Result;
use plaza_application::SessionService;
use plaza_core::api::PlatformApi;
use plaza_core::token::TokenStore;
use plaza_infrastructure::{FileTokenStore, load_config};
use plaza_interaction::ApiClient;

/// Everything a command needs: the API client against the configured base
/// URL and the file-backed token store.
pub struct Context {
    pub api: Arc<dyn PlatformApi>,
    pub tokens: Arc<dyn TokenStore>,
}

impl Context {
    /// Builds the context from `config.toml`, letting `--api-base` override
    /// the configured URL.
    pub fn new(api_base_override: Option<String>) -> Result<Self> {
        let config = load_config()?;
        let api_base = api_base_override.unwrap_or_else(|| config.api_base_trimmed().to_string());
        tracing::debug!("Using API base {}", api_base);

        Ok(Self {
            api: Arc::new(ApiClient::new(api_base)),
            tokens: Arc::new(FileTokenStore::new()?),
        })
    }

    /// A session service over this context's API and token store.
    pub fn session_service(&self) -> SessionService {
        SessionService::new(self.api.clone(), self.tokens.clone())
    }
}
