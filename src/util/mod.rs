//! Shared utilities.

/// Telemetry helpers for structured logging and tracing.
pub mod telemetry;

pub use telemetry::init_tracing;
