//! Diagnostic sink used by the metadata pipeline.
//!
//! Degraded results (an extent that could not be computed, for example)
//! are reported through a [`DiagnosticSink`] instead of failing the build.
//! The builder holds an `Arc<dyn DiagnosticSink>`:
//!
//! - [`TracingSink`] - default, forwards to the `tracing` crate
//! - [`NoOpSink`] - discards everything
//! - [`RecordingSink`] - keeps events in memory, for tests and callers that
//!   want to surface warnings alongside the descriptor
//!
//! ```
//! use layer_metadata::diagnostics::{DiagnosticSink, RecordingSink};
//! use layer_metadata::diag_debug;
//!
//! let sink = RecordingSink::new();
//! diag_debug!(sink, "extent skipped for layer {}", 3);
//! assert_eq!(sink.messages(), vec!["extent skipped for layer 3".to_string()]);
//! ```

mod recording;
mod sink;
mod tracing_sink;

pub use recording::{DiagnosticEvent, NoOpSink, RecordingSink};
pub use sink::{DiagnosticLevel, DiagnosticSink};
pub use tracing_sink::TracingSink;
