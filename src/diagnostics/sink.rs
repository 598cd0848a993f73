//! Diagnostic sink trait definition.

use std::fmt::Arguments;

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// Receiver for diagnostic events.
///
/// Fire-and-forget: implementations must not panic or block the caller, and
/// must be `Send + Sync` so one sink can serve concurrent builds.
pub trait DiagnosticSink: Send + Sync {
    /// Record a message at the given level.
    fn emit(&self, level: DiagnosticLevel, args: Arguments<'_>);

    /// Record a debug-level message.
    fn debug(&self, args: Arguments<'_>) {
        self.emit(DiagnosticLevel::Debug, args);
    }
}

/// Emit a debug-level diagnostic with format arguments.
#[macro_export]
macro_rules! diag_debug {
    ($sink:expr, $($arg:tt)*) => {
        $sink.debug(format_args!($($arg)*))
    };
}
