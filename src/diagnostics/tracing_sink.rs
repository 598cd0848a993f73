//! `tracing` adapter for diagnostics.

use super::{DiagnosticLevel, DiagnosticSink};
use std::fmt::Arguments;

/// Sink that forwards every event to the `tracing` crate under the
/// `layer_metadata` target. Installing a subscriber is up to the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingSink {
    fn emit(&self, level: DiagnosticLevel, args: Arguments<'_>) {
        match level {
            DiagnosticLevel::Trace => tracing::trace!(target: "layer_metadata", "{}", args),
            DiagnosticLevel::Debug => tracing::debug!(target: "layer_metadata", "{}", args),
            DiagnosticLevel::Info => tracing::info!(target: "layer_metadata", "{}", args),
            DiagnosticLevel::Warn => tracing::warn!(target: "layer_metadata", "{}", args),
            DiagnosticLevel::Error => tracing::error!(target: "layer_metadata", "{}", args),
        }
    }
}
