//! Session and authentication state.
//!
//! One [`Session`] is one authenticated context: the active bearer token, the
//! cached user snapshot, and the operations that move between them. There is
//! no global session; the consuming app constructs one and passes it around
//! (or provides it via context), which keeps independent sessions possible in
//! tests and multi-account setups.
//!
//! `logged_in` and `verified` are computed on read from `token`/`user`, never
//! stored, so they cannot drift from their sources. Token and user are only
//! ever replaced together on successful auth calls, so a user snapshot
//! without a token cannot be observed.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use uuid::Uuid;

use crate::net::api;
use crate::net::error::ApiError;
use crate::net::gateway::ApiGateway;
use crate::net::types::{AuthSuccess, User};
use crate::util::single_flight::SingleFlight;
use crate::util::token_store::TokenStore;

/// Authoritative in-memory session state: who the current user is and the
/// token that proves it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub token: String,
    pub user: Option<User>,
}

impl SessionState {
    /// A session is logged in exactly when it holds a non-empty token.
    pub fn logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    /// Verified flag of the cached user; false while no user is cached.
    pub fn verified(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.verified)
    }

    /// Replace token and user together from an auth response.
    pub fn apply_auth(&mut self, auth: AuthSuccess) {
        self.token = auth.token;
        self.user = Some(auth.user);
    }

    /// Drop token and user together (logout).
    pub fn reset(&mut self) {
        self.token.clear();
        self.user = None;
    }
}

/// Handle over one session: reactive state, token persistence, and the auth
/// operations against the backend. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct Session {
    state: ArcRwSignal<SessionState>,
    store: TokenStore,
    gateway: ApiGateway,
    me_flight: SingleFlight<Option<User>>,
}

impl Session {
    /// New session talking to `api_host` (empty for same-origin), with the
    /// default token store.
    pub fn new(api_host: impl Into<String>) -> Self {
        Self::with_store(api_host, TokenStore::default())
    }

    /// New session over an existing token store. A token persisted by a
    /// previous session (or page load) is picked up by [`Session::init_auth`].
    pub fn with_store(api_host: impl Into<String>, store: TokenStore) -> Self {
        let state = ArcRwSignal::new(SessionState::default());
        let gateway = ApiGateway::new(api_host, state.clone(), store.clone());
        Self {
            state,
            store,
            gateway,
            me_flight: SingleFlight::default(),
        }
    }

    /// The reactive state signal, for UI code that needs to subscribe.
    pub fn state(&self) -> ArcRwSignal<SessionState> {
        self.state.clone()
    }

    /// The configured gateway, for collaborators issuing their own
    /// authenticated calls (e.g. the upload client).
    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.with_untracked(SessionState::logged_in)
    }

    pub fn is_verified(&self) -> bool {
        self.state.with_untracked(SessionState::verified)
    }

    /// Current bearer token, after reconciling persisted storage (a
    /// non-empty persisted value overwrites the in-memory one).
    pub fn token(&self) -> String {
        self.gateway.bearer_token()
    }

    /// Set the active token in memory and persist it.
    pub fn set_token(&self, token: &str) {
        self.state.update(|s| s.token = token.to_owned());
        self.store.write(token);
    }

    /// Empty the active token and drop the persisted value. Does not touch
    /// the cached user; full logout goes through [`Session::logout`].
    pub fn clear_token(&self) {
        self.state.update(|s| s.token.clear());
        self.store.clear();
    }

    /// The cached user snapshot, without any network effect.
    pub fn current_user_cached(&self) -> Option<User> {
        self.state.with_untracked(|s| s.user.clone())
    }

    /// The current user: cached if present, otherwise fetched once when a
    /// token exists, otherwise `None`. A failed fetch logs and returns `None`
    /// without clearing the token — a transient network failure must not log
    /// the user out.
    pub async fn current_user(&self) -> Option<User> {
        if let Some(user) = self.current_user_cached() {
            return Some(user);
        }
        if !self.is_logged_in() {
            return None;
        }
        self.fetch_me().await
    }

    /// Reconcile the in-memory token with persisted storage, then refresh the
    /// user snapshot if logged in. Idempotent; safe to call on every guarded
    /// route entry. Concurrent callers share one "who am I" fetch.
    pub async fn init_auth(&self) {
        if let Some(persisted) = self.store.read() {
            if self.state.with_untracked(|s| s.token != persisted) {
                self.state.update(|s| s.token = persisted);
            }
        }
        if self.is_logged_in() {
            self.fetch_me().await;
        }
    }

    /// Guard for routes that need any authenticated user. Returns whether
    /// the guard passed; on failure the browser is redirected to the login
    /// page carrying the current path as the return destination.
    pub async fn require_logged_in(&self) -> bool {
        self.init_auth().await;
        if self.is_logged_in() {
            return true;
        }
        redirect_to_entry("/account/login");
        false
    }

    /// Guard for routes that need a verified user. Redirects to the
    /// verification page on failure.
    pub async fn require_verified_user(&self) -> bool {
        self.init_auth().await;
        if self.is_verified() {
            return true;
        }
        redirect_to_entry("/account/verify-email");
        false
    }

    /// Create an account and start its session.
    ///
    /// # Errors
    ///
    /// On failure the prior session state is left untouched and the
    /// classified error is returned.
    pub async fn signup(&self, email: &str, password: &str) -> Result<(), ApiError> {
        match api::signup(&self.gateway, email, password).await {
            Ok(auth) => {
                self.apply_auth(auth);
                Ok(())
            }
            Err(err) => {
                leptos::logging::warn!("signup failed: {err}");
                Err(err)
            }
        }
    }

    /// Authenticate and start a session.
    ///
    /// # Errors
    ///
    /// On failure the prior session state is left untouched and the
    /// classified error is returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        match api::login(&self.gateway, email, password).await {
            Ok(auth) => {
                self.apply_auth(auth);
                Ok(())
            }
            Err(err) => {
                leptos::logging::warn!("login failed: {err}");
                Err(err)
            }
        }
    }

    /// Exchange a verification id for a refreshed token+user pair (the
    /// verified flag flips server-side).
    ///
    /// # Errors
    ///
    /// On failure the prior session state is left untouched and the
    /// classified error is returned.
    pub async fn verify(&self, verification_id: Uuid) -> Result<(), ApiError> {
        match api::verify(&self.gateway, verification_id).await {
            Ok(auth) => {
                self.apply_auth(auth);
                Ok(())
            }
            Err(err) => {
                leptos::logging::warn!("verification failed: {err}");
                Err(err)
            }
        }
    }

    /// Request a fresh verification email for the current user.
    ///
    /// # Errors
    ///
    /// Returns the classified failure. No state mutation either way.
    pub async fn send_verification(&self) -> Result<(), ApiError> {
        api::send_verification(&self.gateway)
            .await
            .inspect_err(|err| leptos::logging::warn!("send-verification failed: {err}"))
    }

    /// Change the current user's password.
    ///
    /// # Errors
    ///
    /// Returns the classified failure. No state mutation either way.
    pub async fn change_password(&self, password: &str) -> Result<(), ApiError> {
        api::change_password(&self.gateway, password)
            .await
            .inspect_err(|err| leptos::logging::warn!("password change failed: {err}"))
    }

    /// Delete the current user's account. On success the session is cleared
    /// like a logout.
    ///
    /// # Errors
    ///
    /// On failure the session is left intact and the classified error is
    /// returned.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        match api::delete_account(&self.gateway).await {
            Ok(()) => {
                self.logout();
                Ok(())
            }
            Err(err) => {
                leptos::logging::warn!("account deletion failed: {err}");
                Err(err)
            }
        }
    }

    /// End the session: drop token and user together and clear persistence.
    /// Always succeeds.
    pub fn logout(&self) -> bool {
        self.store.clear();
        self.state.update(SessionState::reset);
        true
    }

    /// Atomic token+user replacement from an auth response, persisted.
    fn apply_auth(&self, auth: AuthSuccess) {
        self.store.write(&auth.token);
        self.state.update(|s| s.apply_auth(auth));
    }

    /// Deduplicated "who am I" fetch. Updates the cached user on success
    /// only; failures log and leave the session as it was.
    async fn fetch_me(&self) -> Option<User> {
        let gateway = self.gateway.clone();
        let user = self
            .me_flight
            .run(|| async move {
                match api::fetch_current_user(&gateway).await {
                    Ok(user) => Some(user),
                    Err(err) => {
                        leptos::logging::warn!("current-user fetch failed: {err}");
                        None
                    }
                }
            })
            .await;
        if let Some(user) = &user {
            self.state.update(|s| s.user = Some(user.clone()));
        }
        user
    }
}

/// Redirect the browser to an auth entry point, carrying the current path as
/// the return destination.
fn redirect_to_entry(entry: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let location = window.location();
            let current = location.pathname().unwrap_or_default();
            let escaped = String::from(js_sys::encode_uri_component(&current));
            let _ = location.set_href(&format!("{entry}?redirect={escaped}"));
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = entry;
    }
}
