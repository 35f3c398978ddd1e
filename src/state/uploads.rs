//! Upload list state and the two-phase upload protocol.
//!
//! Phase one asks the backend to mint an upload record plus a time-boxed
//! presigned write URL; phase two is the caller's direct PUT of the bytes to
//! that URL, which never transits the application backend.

#[cfg(test)]
#[path = "uploads_test.rs"]
mod uploads_test;

use leptos::prelude::*;
use uuid::Uuid;

use crate::net::api;
use crate::net::error::ApiError;
use crate::net::gateway::ApiGateway;
use crate::net::types::Upload;
use crate::state::session::Session;

/// Cached list of the current user's uploads.
#[derive(Clone, Debug, Default)]
pub struct UploadsState {
    pub items: Vec<Upload>,
    pub loading: bool,
}

/// Handle over the uploads cache and the upload protocol, issuing calls
/// through the owning session's gateway. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct UploadClient {
    state: ArcRwSignal<UploadsState>,
    gateway: ApiGateway,
}

impl UploadClient {
    pub fn new(session: &Session) -> Self {
        Self {
            state: ArcRwSignal::new(UploadsState::default()),
            gateway: session.gateway().clone(),
        }
    }

    /// The reactive state signal, for UI code that needs to subscribe.
    pub fn state(&self) -> ArcRwSignal<UploadsState> {
        self.state.clone()
    }

    /// The cached upload list. No network effect.
    pub fn uploads(&self) -> Vec<Upload> {
        self.state.with_untracked(|s| s.items.clone())
    }

    /// Replace the cached upload list. No network effect.
    pub fn set_uploads(&self, items: Vec<Upload>) {
        self.state.update(|s| s.items = items);
    }

    /// Fetch the authenticated user's uploads and replace the cache
    /// wholesale. On failure the previous cache stays untouched.
    pub async fn refresh(&self) {
        self.state.update(|s| s.loading = true);
        match api::list_my_uploads(&self.gateway).await {
            Ok(items) => self.state.update(|s| {
                s.items = items;
                s.loading = false;
            }),
            Err(err) => {
                leptos::logging::warn!("upload list refresh failed: {err}");
                self.state.update(|s| s.loading = false);
            }
        }
    }

    /// Allocate an upload slot (default write-presign expiry: 24 hours) and
    /// return the presigned write URL for the caller's byte transfer.
    ///
    /// # Errors
    ///
    /// Unlike the read paths this propagates the failure: the caller must
    /// know the slot could not be allocated before attempting a transfer.
    pub async fn start_new_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<String, ApiError> {
        api::start_upload(&self.gateway, file_name, content_type).await
    }

    /// Fetch one upload's metadata. `None` on any failure; "not found" and
    /// a transport error look the same to the caller.
    pub async fn get_upload(&self, id: Uuid) -> Option<Upload> {
        match api::fetch_upload(&self.gateway, id).await {
            Ok(upload) => Some(upload),
            Err(err) => {
                leptos::logging::warn!("upload {id} fetch failed: {err}");
                None
            }
        }
    }
}
