//! Shared client-side state.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `uploads`) so consumers can depend on
//! small focused models. Each domain pairs a plain state struct with a
//! cloneable handle that owns the reactive signal and drives the backend
//! operations; the handle is what a consuming app provides via context.

pub mod session;
pub mod uploads;
