//! Wire types shared with the backend REST API.
//!
//! Field sets and timestamp/id formats mirror the backend DTOs exactly, so
//! every struct (de)serializes against the server's JSON without adapters.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use chrono::{DateTime, Duration, FixedOffset, Utc};
use uuid::Uuid;

/// Snapshot of the authenticated user, as returned by `GET /api/users/me`.
///
/// Replaced wholesale on every refresh; never partially mutated.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub email: String,
    pub verified: bool,
}

/// One object in the store. `presigned_get` is a time-limited read URL;
/// `expires_at` bounds the write-presign validity.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Upload {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub file_name: String,
    pub content_type: String,
    pub presigned_get: String,
    pub expires_at: DateTime<FixedOffset>,
}

/// Successful signup/login/verify payload: a fresh token and the matching
/// user snapshot, applied to the session together.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthSuccess {
    pub token: String,
    pub user: User,
}

/// Error body the backend sends with non-success statuses.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Credentials for `POST /api/users/signup` and `POST /api/users/login`.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Body for `PATCH /api/users/me/password`.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PasswordChangeRequest {
    pub password: String,
}

/// Body for `POST /api/uploads/start`. The backend allocates the storage key
/// and mints a presigned write URL valid until `expires_at`.
#[derive(Clone, Debug, serde::Serialize)]
pub struct UploadStartRequest {
    pub file_name: String,
    pub content_type: String,
    pub expires_at: DateTime<Utc>,
}

impl UploadStartRequest {
    /// Builds a start request with the default 24-hour write-presign expiry.
    pub fn new(file_name: &str, content_type: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            content_type: content_type.to_owned(),
            expires_at: Utc::now() + Duration::hours(24),
        }
    }
}

/// Response to `POST /api/uploads/start`: the presigned write URL the caller
/// PUTs the bytes to.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct UploadStartResponse {
    pub url: String,
}
