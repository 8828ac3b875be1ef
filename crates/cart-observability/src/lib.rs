//! Observability for the storefront cart.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with component and page context
//! - `LogSink` - Where entries go: stderr, `tracing`, or an in-memory capture

mod logging;

pub use logging::*;
