//! Failure classification for backend calls.

use thiserror::Error;

/// Why a backend call failed.
///
/// Callers can tell "not logged in" from "network down" from "the server said
/// no" and message (or retry) accordingly, instead of collapsing all three
/// into a boolean.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered 401: no token, or a stale/revoked one.
    #[error("not authenticated")]
    Unauthenticated,
    /// The request never produced a usable response: network failure,
    /// or an unparseable body.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status and (usually) a
    /// human-readable message.
    #[error("rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl ApiError {
    /// Stub error for non-browser builds, where the REST endpoints are
    /// unreachable.
    pub(crate) fn offline() -> Self {
        Self::Transport("not available on server".to_owned())
    }
}
