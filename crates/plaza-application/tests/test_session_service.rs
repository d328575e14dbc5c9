use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use plaza_application::{SessionOutcome, SessionService};
use plaza_core::api::{PlatformApi, Reaction};
use plaza_core::error::PlazaError;
use plaza_core::page::{PageQuery, PagedResponse};
use plaza_core::session::DEFAULT_DISPLAY_NAME;
use plaza_core::token::{TokenPair, TokenStore};
use plaza_infrastructure::MemoryTokenStore;
use serde_json::json;
use tokio::sync::Mutex;

/// Scripted API double: profile responses are consumed in call order.
#[derive(Default)]
struct FakeApi {
    profile_responses: Mutex<VecDeque<plaza_core::Result<serde_json::Value>>>,
    refresh_response: Mutex<Option<plaza_core::Result<TokenPair>>>,
    profile_calls: AtomicUsize,
    refresh_calls: AtomicUsize,
}

impl FakeApi {
    fn with_profile_responses(
        responses: Vec<plaza_core::Result<serde_json::Value>>,
    ) -> Self {
        Self {
            profile_responses: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    async fn set_refresh_response(&self, response: plaza_core::Result<TokenPair>) {
        *self.refresh_response.lock().await = Some(response);
    }

    fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PlatformApi for FakeApi {
    async fn fetch_userinfo(&self, _access_token: &str) -> plaza_core::Result<serde_json::Value> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile_responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(PlazaError::api(401, "unauthorized")))
    }

    async fn refresh_tokens(&self, _refresh_token: &str) -> plaza_core::Result<TokenPair> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_response
            .lock()
            .await
            .take()
            .unwrap_or_else(|| Err(PlazaError::api(400, "refresh unsupported")))
    }

    async fn list(&self, _endpoint: &str, _query: &PageQuery) -> plaza_core::Result<PagedResponse> {
        Err(PlazaError::internal("not used in session tests"))
    }

    async fn create_post(
        &self,
        _access_token: &str,
        _body: serde_json::Value,
    ) -> plaza_core::Result<()> {
        Err(PlazaError::internal("not used in session tests"))
    }

    async fn delete_post(&self, _access_token: &str, _id: u64) -> plaza_core::Result<()> {
        Err(PlazaError::internal("not used in session tests"))
    }

    async fn react_post(
        &self,
        _access_token: &str,
        _id: u64,
        _reaction: Reaction,
    ) -> plaza_core::Result<()> {
        Err(PlazaError::internal("not used in session tests"))
    }
}

/// Token store holding an access token but no refresh token, modelling the
/// variant of the platform that has no refresh support.
struct AccessOnlyStore;

#[async_trait::async_trait]
impl TokenStore for AccessOnlyStore {
    async fn access_token(&self) -> Option<String> {
        Some("atk-stale".to_string())
    }

    async fn refresh_token(&self) -> Option<String> {
        None
    }

    async fn store(&self, _pair: TokenPair) -> plaza_core::Result<()> {
        Ok(())
    }

    async fn clear(&self) -> plaza_core::Result<()> {
        Ok(())
    }
}

fn pair(tag: &str) -> TokenPair {
    TokenPair {
        access_token: format!("atk-{tag}"),
        refresh_token: format!("rtk-{tag}"),
    }
}

#[tokio::test]
async fn test_load_profile_without_token_makes_no_network_call() {
    let api = Arc::new(FakeApi::default());
    let tokens = Arc::new(MemoryTokenStore::new());
    let service = SessionService::new(api.clone(), tokens);

    let outcome = service.load_profile().await.unwrap();

    assert_eq!(outcome, SessionOutcome::Anonymous);
    assert_eq!(api.profile_calls(), 0);
    let info = service.userinfo().await;
    assert!(!info.is_logged_in);
    assert_eq!(info.display_name, DEFAULT_DISPLAY_NAME);
}

#[tokio::test]
async fn test_load_profile_success_populates_state() {
    let api = Arc::new(FakeApi::with_profile_responses(vec![Ok(json!({
        "nick": "alice",
        "id": 7
    }))]));
    let tokens = Arc::new(MemoryTokenStore::with_pair(pair("ok")));
    let service = SessionService::new(api.clone(), tokens);
    let mut observer = service.subscribe();

    let outcome = service.load_profile().await.unwrap();

    assert_eq!(outcome, SessionOutcome::Authenticated);
    let info = service.userinfo().await;
    assert!(info.is_logged_in);
    assert_eq!(info.display_name, "alice");
    assert!(info.profile.is_some());

    observer.changed().await.unwrap();
    assert!(observer.borrow().is_logged_in);
}

#[tokio::test]
async fn test_rejected_profile_recovers_through_refresh() {
    let api = Arc::new(FakeApi::with_profile_responses(vec![
        Err(PlazaError::api(401, "token expired")),
        Ok(json!({ "nick": "alice" })),
    ]));
    api.set_refresh_response(Ok(pair("fresh"))).await;
    let tokens = Arc::new(MemoryTokenStore::with_pair(pair("stale")));
    let service = SessionService::new(api.clone(), tokens.clone());

    let outcome = service.load_profile().await.unwrap();

    assert_eq!(outcome, SessionOutcome::Authenticated);
    assert!(service.userinfo().await.is_logged_in);
    assert_eq!(api.refresh_calls(), 1);
    assert_eq!(api.profile_calls(), 2);
    // the refreshed pair replaced the stale one
    assert_eq!(tokens.access_token().await.as_deref(), Some("atk-fresh"));
    assert_eq!(tokens.refresh_token().await.as_deref(), Some("rtk-fresh"));
}

#[tokio::test]
async fn test_failed_refresh_resets_session_and_fires_reload() {
    let api = Arc::new(FakeApi::with_profile_responses(vec![Err(PlazaError::api(
        401,
        "token expired",
    ))]));
    api.set_refresh_response(Err(PlazaError::api(400, "refresh token invalid")))
        .await;
    let tokens = Arc::new(MemoryTokenStore::with_pair(pair("stale")));
    let service = SessionService::new(api.clone(), tokens.clone());

    let reloaded = Arc::new(AtomicBool::new(false));
    let flag = reloaded.clone();
    service
        .set_reload_handler(Arc::new(move || {
            flag.store(true, Ordering::SeqCst);
        }))
        .await;

    let outcome = service.load_profile().await.unwrap();

    assert_eq!(outcome, SessionOutcome::Reset);
    assert!(reloaded.load(Ordering::SeqCst));
    assert!(tokens.access_token().await.is_none());
    let info = service.userinfo().await;
    assert!(!info.is_logged_in);
    assert_eq!(info.display_name, DEFAULT_DISPLAY_NAME);
}

#[tokio::test]
async fn test_retry_depth_is_bounded_at_one() {
    // Refresh succeeds, but the retried fetch is rejected too: exactly one
    // refresh and exactly two profile fetches, then reset. No loop.
    let api = Arc::new(FakeApi::with_profile_responses(vec![
        Err(PlazaError::api(401, "token expired")),
        Err(PlazaError::api(401, "still rejected")),
    ]));
    api.set_refresh_response(Ok(pair("fresh"))).await;
    let tokens = Arc::new(MemoryTokenStore::with_pair(pair("stale")));
    let service = SessionService::new(api.clone(), tokens.clone());

    let outcome = service.load_profile().await.unwrap();

    assert_eq!(outcome, SessionOutcome::Reset);
    assert_eq!(api.refresh_calls(), 1);
    assert_eq!(api.profile_calls(), 2);
    assert!(tokens.access_token().await.is_none());
}

#[tokio::test]
async fn test_missing_refresh_token_resets_immediately() {
    let api = Arc::new(FakeApi::with_profile_responses(vec![Err(PlazaError::api(
        401,
        "token expired",
    ))]));
    let service = SessionService::new(api.clone(), Arc::new(AccessOnlyStore));

    let outcome = service.load_profile().await.unwrap();

    assert_eq!(outcome, SessionOutcome::Reset);
    assert_eq!(api.refresh_calls(), 0);
}

#[tokio::test]
async fn test_logout_clears_tokens_and_fires_reload() {
    let api = Arc::new(FakeApi::default());
    let tokens = Arc::new(MemoryTokenStore::with_pair(pair("ok")));
    let service = SessionService::new(api, tokens.clone());

    let reloaded = Arc::new(AtomicBool::new(false));
    let flag = reloaded.clone();
    service
        .set_reload_handler(Arc::new(move || {
            flag.store(true, Ordering::SeqCst);
        }))
        .await;

    assert!(service.is_authenticated().await);
    service.logout().await.unwrap();

    assert!(!service.is_authenticated().await);
    assert!(reloaded.load(Ordering::SeqCst));
    assert!(!service.userinfo().await.is_logged_in);
}
