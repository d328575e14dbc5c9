//! Session use case implementation.
//!
//! `SessionService` is the single source of truth for "who is the current
//! user". It owns the shared [`Userinfo`] state, reads credentials through
//! the [`TokenStore`] seam, and performs the bounded credential refresh when
//! a profile fetch is rejected.

use std::sync::Arc;

use plaza_core::api::PlatformApi;
use plaza_core::error::{PlazaError, Result};
use plaza_core::session::Userinfo;
use plaza_core::token::TokenStore;
use tokio::sync::{RwLock, watch};

/// Callback invoked when the session had to be reset and the surface should
/// rebuild itself from scratch (a web surface would force a full page reload
/// here).
pub type ReloadCallback = Arc<dyn Fn() + Send + Sync>;

/// What a `load_profile` call concluded about the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// No access credential present; defaults left in place, no network call.
    Anonymous,
    /// Profile confirmed; state now reflects the logged-in user.
    Authenticated,
    /// Credentials were rejected and could not be refreshed; session cleared
    /// and the reload callback fired.
    Reset,
}

/// Single source of truth for the authenticated user.
///
/// # Thread Safety
///
/// The state is behind `Arc<RwLock<..>>` and is only mutated through the
/// operations on this type; observers receive snapshots over a watch channel
/// and never hold the lock.
pub struct SessionService {
    /// API used for profile fetches and token refreshes
    api: Arc<dyn PlatformApi>,
    /// Credential storage (the cookie-jar collaborator)
    tokens: Arc<dyn TokenStore>,
    /// Shared user state
    state: Arc<RwLock<Userinfo>>,
    /// Publishes a snapshot after every state mutation
    changed: watch::Sender<Userinfo>,
    /// Optional hook fired on irrecoverable session reset / logout
    reload_handler: Arc<RwLock<Option<ReloadCallback>>>,
}

impl SessionService {
    /// Creates a service over the given API and token store, starting from
    /// the logged-out defaults.
    pub fn new(api: Arc<dyn PlatformApi>, tokens: Arc<dyn TokenStore>) -> Self {
        let initial = Userinfo::logged_out();
        let (changed, _) = watch::channel(initial.clone());
        Self {
            api,
            tokens,
            state: Arc::new(RwLock::new(initial)),
            changed,
            reload_handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Registers the callback fired when the session is reset or logged out.
    pub async fn set_reload_handler(&self, handler: ReloadCallback) {
        *self.reload_handler.write().await = Some(handler);
    }

    /// Returns the stored access token, if any. No network call; absence is
    /// a valid state.
    pub async fn access_token(&self) -> Option<String> {
        self.tokens.access_token().await
    }

    /// True iff an access credential is present in the store.
    ///
    /// Used to short-circuit profile fetches; presence does not imply the
    /// credential is still accepted by the API.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.access_token().await.is_some()
    }

    /// Returns a snapshot of the current user state.
    pub async fn userinfo(&self) -> Userinfo {
        self.state.read().await.clone()
    }

    /// Subscribes to user state changes. The receiver always starts with the
    /// current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Userinfo> {
        self.changed.subscribe()
    }

    /// Resolves the profile of the current credential holder.
    ///
    /// - Without a stored access token this returns immediately and performs
    ///   no network call.
    /// - On a rejected profile fetch, exactly one credential refresh is
    ///   attempted, followed by exactly one retried fetch. If either fails
    ///   the session is cleared and the reload callback fires. The retry
    ///   depth is fixed at 1 so a permanently invalid refresh token can never
    ///   loop.
    ///
    /// Network errors and auth rejections are deliberately not distinguished:
    /// any failed fetch counts as "not authenticated".
    pub async fn load_profile(&self) -> Result<SessionOutcome> {
        let Some(access_token) = self.tokens.access_token().await else {
            return Ok(SessionOutcome::Anonymous);
        };

        match self.api.fetch_userinfo(&access_token).await {
            Ok(profile) => {
                self.set_state(Userinfo::from_profile(profile)).await;
                Ok(SessionOutcome::Authenticated)
            }
            Err(err) => {
                tracing::debug!("Profile fetch rejected, attempting refresh: {}", err);
                self.recover_once().await
            }
        }
    }

    /// One refresh attempt plus one retried profile fetch; anything short of
    /// full success resets the session.
    async fn recover_once(&self) -> Result<SessionOutcome> {
        let refreshed = match self.refresh_credentials().await {
            Ok(token) => token,
            Err(err) => {
                tracing::info!("Credential refresh failed, resetting session: {}", err);
                return self.reset_session().await;
            }
        };

        match self.api.fetch_userinfo(&refreshed).await {
            Ok(profile) => {
                self.set_state(Userinfo::from_profile(profile)).await;
                Ok(SessionOutcome::Authenticated)
            }
            Err(err) => {
                tracing::info!("Retried profile fetch failed, resetting session: {}", err);
                self.reset_session().await
            }
        }
    }

    /// Exchanges the stored refresh token for a new pair and persists it.
    /// Returns the new access token.
    async fn refresh_credentials(&self) -> Result<String> {
        let refresh_token = self
            .tokens
            .refresh_token()
            .await
            .ok_or(PlazaError::NotAuthenticated)?;

        let pair = self.api.refresh_tokens(&refresh_token).await?;
        let access_token = pair.access_token.clone();
        self.tokens.store(pair).await?;
        Ok(access_token)
    }

    async fn reset_session(&self) -> Result<SessionOutcome> {
        self.clear_session().await?;
        self.fire_reload().await;
        Ok(SessionOutcome::Reset)
    }

    /// Deletes all stored credentials and resets the user state to defaults.
    ///
    /// Subsequent authenticated requests will find no bearer credential.
    pub async fn clear_session(&self) -> Result<()> {
        self.tokens.clear().await?;
        self.set_state(Userinfo::logged_out()).await;
        Ok(())
    }

    /// `clear_session` plus the navigation hook. The navigation itself is a
    /// presentation concern handled by the registered callback.
    pub async fn logout(&self) -> Result<()> {
        self.clear_session().await?;
        self.fire_reload().await;
        Ok(())
    }

    async fn fire_reload(&self) {
        if let Some(handler) = self.reload_handler.read().await.as_ref() {
            handler();
        }
    }

    async fn set_state(&self, info: Userinfo) {
        *self.state.write().await = info.clone();
        // Observers may have all dropped their receivers; not an error.
        let _ = self.changed.send(info);
    }
}
