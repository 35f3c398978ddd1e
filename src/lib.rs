//! # fileshare-client
//!
//! Browser-side (WASM) client core for the file-sharing application:
//! session/authentication state against the REST backend, and the client half
//! of the presigned-URL direct-to-S3 upload flow.
//!
//! This crate contains no pages or components. A consuming Leptos app creates
//! a [`state::session::Session`], provides it via context, and calls the
//! route guards before rendering protected views.

pub mod net;
pub mod state;
pub mod util;

/// Install the console panic hook. Call once during app startup.
#[cfg(feature = "hydrate")]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
