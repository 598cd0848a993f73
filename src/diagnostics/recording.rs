//! In-memory and discarding sinks.

use parking_lot::Mutex;
use std::fmt::Arguments;

use super::{DiagnosticLevel, DiagnosticSink};

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

impl DiagnosticSink for NoOpSink {
    #[inline]
    fn emit(&self, _level: DiagnosticLevel, _args: Arguments<'_>) {}
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// A sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events, oldest first.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().clone()
    }

    /// Recorded messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, level: DiagnosticLevel, args: Arguments<'_>) {
        let message = args.to_string();
        self.events.lock().push(DiagnosticEvent { level, message });
    }
}
