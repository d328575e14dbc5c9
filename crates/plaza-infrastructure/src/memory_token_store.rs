//! In-memory token store.

use std::sync::Arc;

use plaza_core::Result;
use plaza_core::token::{TokenPair, TokenStore};
use tokio::sync::RwLock;

/// A [`TokenStore`] that keeps the credential pair in process memory only.
///
/// Used for ephemeral sessions and as the store backing tests. Nothing is
/// persisted; dropping the store forgets the credentials.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    pair: Arc<RwLock<Option<TokenPair>>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a pair.
    pub fn with_pair(pair: TokenPair) -> Self {
        Self {
            pair: Arc::new(RwLock::new(Some(pair))),
        }
    }
}

#[async_trait::async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> Option<String> {
        self.pair.read().await.as_ref().map(|p| p.access_token.clone())
    }

    async fn refresh_token(&self) -> Option<String> {
        self.pair.read().await.as_ref().map(|p| p.refresh_token.clone())
    }

    async fn store(&self, pair: TokenPair) -> Result<()> {
        *self.pair.write().await = Some(pair);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.pair.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_has_no_tokens() {
        let store = MemoryTokenStore::new();
        assert!(store.access_token().await.is_none());
        assert!(store.refresh_token().await.is_none());
    }

    #[tokio::test]
    async fn test_store_and_clear() {
        let store = MemoryTokenStore::new();
        store
            .store(TokenPair {
                access_token: "atk".to_string(),
                refresh_token: "rtk".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(store.access_token().await.as_deref(), Some("atk"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("rtk"));

        store.clear().await.unwrap();
        assert!(store.access_token().await.is_none());
    }
}
