//! REST calls to the backend, one async function per endpoint.
//!
//! Client-side (hydrate): real HTTP via `gloo-net` through the [`ApiGateway`].
//! Server-side: stubs returning [`ApiError::offline`] since these endpoints
//! are only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! A 401 maps to `ApiError::Unauthenticated`; any other non-success status
//! maps to `ApiError::Rejected` carrying the server's `message` body when one
//! is present; network and decode failures map to `ApiError::Transport`.
//! Nothing here panics.

#![allow(clippy::unused_async)]

use uuid::Uuid;

use super::error::ApiError;
use super::gateway::ApiGateway;
use super::types::{AuthSuccess, Upload, User};

/// Create an account via `POST /api/users/signup`.
///
/// # Errors
///
/// Returns the classified failure; `Rejected` carries the server's reason
/// (e.g. "email already in use").
pub async fn signup(gw: &ApiGateway, email: &str, password: &str) -> Result<AuthSuccess, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_credentials(gw, "/api/users/signup", email, password).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (gw, email, password);
        Err(ApiError::offline())
    }
}

/// Authenticate via `POST /api/users/login`.
///
/// # Errors
///
/// Returns the classified failure; bad credentials arrive as `Rejected`.
pub async fn login(gw: &ApiGateway, email: &str, password: &str) -> Result<AuthSuccess, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        post_credentials(gw, "/api/users/login", email, password).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (gw, email, password);
        Err(ApiError::offline())
    }
}

/// Fetch the authenticated user's snapshot from `GET /api/users/me`.
///
/// # Errors
///
/// `Unauthenticated` when the token is missing or stale.
pub async fn fetch_current_user(gw: &ApiGateway) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gw.get("/api/users/me").send().await.map_err(transport)?;
        into_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = gw;
        Err(ApiError::offline())
    }
}

/// Consume a verification token via `POST /api/users/verify/{id}`.
///
/// The server flips the user's `verified` flag and issues a refreshed
/// token+user pair.
///
/// # Errors
///
/// `Rejected` for an unknown or already-consumed verification id.
pub async fn verify(gw: &ApiGateway, verification_id: Uuid) -> Result<AuthSuccess, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gw
            .post(&format!("/api/users/verify/{verification_id}"))
            .send()
            .await
            .map_err(transport)?;
        into_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (gw, verification_id);
        Err(ApiError::offline())
    }
}

/// Request a fresh verification email via
/// `POST /api/users/me/send-verification`.
///
/// # Errors
///
/// Returns the classified failure. No client state changes either way.
pub async fn send_verification(gw: &ApiGateway) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gw
            .post("/api/users/me/send-verification")
            .send()
            .await
            .map_err(transport)?;
        check(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = gw;
        Err(ApiError::offline())
    }
}

/// Change the authenticated user's password via
/// `PATCH /api/users/me/password`.
///
/// # Errors
///
/// Returns the classified failure.
pub async fn change_password(gw: &ApiGateway, password: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::PasswordChangeRequest {
            password: password.to_owned(),
        };
        let resp = gw
            .patch("/api/users/me/password")
            .json(&body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        check(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (gw, password);
        Err(ApiError::offline())
    }
}

/// Delete the authenticated user's account via `DELETE /api/users/me`.
///
/// # Errors
///
/// Returns the classified failure.
pub async fn delete_account(gw: &ApiGateway) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gw.delete("/api/users/me").send().await.map_err(transport)?;
        check(resp).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = gw;
        Err(ApiError::offline())
    }
}

/// List the caller's uploads via `GET /api/uploads/mine`.
///
/// # Errors
///
/// Returns the classified failure.
pub async fn list_my_uploads(gw: &ApiGateway) -> Result<Vec<Upload>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gw.get("/api/uploads/mine").send().await.map_err(transport)?;
        into_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = gw;
        Err(ApiError::offline())
    }
}

/// Allocate an upload slot via `POST /api/uploads/start` and return the
/// presigned write URL. The byte transfer to that URL is the caller's
/// second phase, outside this crate.
///
/// # Errors
///
/// Returns the classified failure; the caller must not attempt the transfer.
pub async fn start_upload(
    gw: &ApiGateway,
    file_name: &str,
    content_type: &str,
) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::UploadStartRequest::new(file_name, content_type);
        let resp = gw
            .post("/api/uploads/start")
            .json(&body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let started: super::types::UploadStartResponse = into_json(resp).await?;
        Ok(started.url)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (gw, file_name, content_type);
        Err(ApiError::offline())
    }
}

/// Fetch one upload record via `GET /api/uploads/{id}`.
///
/// # Errors
///
/// `Rejected` with status 404 for an unknown id.
pub async fn fetch_upload(gw: &ApiGateway, id: Uuid) -> Result<Upload, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gw
            .get(&format!("/api/uploads/{id}"))
            .send()
            .await
            .map_err(transport)?;
        into_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (gw, id);
        Err(ApiError::offline())
    }
}

#[cfg(feature = "hydrate")]
async fn post_credentials(
    gw: &ApiGateway,
    path: &str,
    email: &str,
    password: &str,
) -> Result<AuthSuccess, ApiError> {
    let body = super::types::CredentialsRequest {
        email: email.to_owned(),
        password: password.to_owned(),
    };
    let resp = gw
        .post(path)
        .json(&body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;
    into_json(resp).await
}

#[cfg(feature = "hydrate")]
fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

/// Classify a non-success response, preferring the server's `message` body.
#[cfg(feature = "hydrate")]
async fn check(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, ApiError> {
    if resp.status() == 401 {
        return Err(ApiError::Unauthenticated);
    }
    if resp.ok() {
        return Ok(resp);
    }
    let message = resp
        .json::<super::types::MessageResponse>()
        .await
        .map_or_else(|_| resp.status_text(), |m| m.message);
    Err(ApiError::Rejected {
        status: resp.status(),
        message,
    })
}

#[cfg(feature = "hydrate")]
async fn into_json<T: serde::de::DeserializeOwned>(
    resp: gloo_net::http::Response,
) -> Result<T, ApiError> {
    check(resp).await?.json::<T>().await.map_err(transport)
}
