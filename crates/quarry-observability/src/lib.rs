//! # quarry-observability
//!
//! Tracing subscriber setup plus the named structured events and spans the
//! other crates emit.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, init_tracing_with_config};
