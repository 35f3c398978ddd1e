//! Network layer: wire types, the configured API gateway, and one async
//! function per backend REST endpoint.

pub mod api;
pub mod error;
pub mod gateway;
pub mod types;
