//! Configured HTTP client for the backend API.
//!
//! Every request targets the single configured API origin and carries
//! `Authorization: Bearer <token>` (empty bearer when logged out). The token
//! is re-read from the persisted store on each access, so a value written by
//! another tab or a previous page load wins over stale in-memory state.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use leptos::prelude::*;

use crate::state::session::SessionState;
use crate::util::token_store::TokenStore;

/// Request builder targeting the configured API origin, with bearer-token
/// injection on every call.
#[derive(Clone)]
pub struct ApiGateway {
    base: String,
    state: ArcRwSignal<SessionState>,
    store: TokenStore,
}

impl ApiGateway {
    /// `base` is the API origin, e.g. `https://api.example.com`. An empty
    /// base produces same-origin relative URLs.
    pub(crate) fn new(
        base: impl Into<String>,
        state: ArcRwSignal<SessionState>,
        store: TokenStore,
    ) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base, state, store }
    }

    /// Current bearer token, reconciling persisted storage into the session
    /// first: a non-empty persisted value overwrites the in-memory one.
    pub fn bearer_token(&self) -> String {
        if let Some(persisted) = self.store.read() {
            if self.state.with_untracked(|s| s.token != persisted) {
                self.state.update(|s| s.token = persisted);
            }
        }
        self.state.with_untracked(|s| s.token.clone())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

#[cfg(feature = "hydrate")]
impl ApiGateway {
    pub(crate) fn get(&self, path: &str) -> gloo_net::http::RequestBuilder {
        self.authorize(gloo_net::http::Request::get(&self.url(path)))
    }

    pub(crate) fn post(&self, path: &str) -> gloo_net::http::RequestBuilder {
        self.authorize(gloo_net::http::Request::post(&self.url(path)))
    }

    pub(crate) fn patch(&self, path: &str) -> gloo_net::http::RequestBuilder {
        self.authorize(gloo_net::http::Request::patch(&self.url(path)))
    }

    pub(crate) fn delete(&self, path: &str) -> gloo_net::http::RequestBuilder {
        self.authorize(gloo_net::http::Request::delete(&self.url(path)))
    }

    fn authorize(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        builder.header("Authorization", &format!("Bearer {}", self.bearer_token()))
    }
}
