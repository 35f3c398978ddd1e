//! Small shared helpers: token persistence and in-flight call sharing.

pub mod single_flight;
pub mod token_store;
