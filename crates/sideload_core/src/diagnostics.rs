//! Diagnostic sinks for resolver failure reporting.
//!
//! The host wires two sinks in production: a trace stream and its own
//! output-pane logger. Both receive the same plain text lines.

use log::warn;
use std::sync::{Arc, Mutex};

/// Write-only collaborator receiving one formatted diagnostic line per call.
pub trait DiagnosticSink: Send + Sync {
    fn write_line(&self, line: &str);
}

/// Sink forwarding lines to the process log facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceSink;

impl TraceSink {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TraceSink {
    fn write_line(&self, line: &str) {
        warn!("event=resolver_diagnostic module=core status=error detail={line}");
    }
}

/// Sink capturing lines in memory, for hosts without a text stream and for
/// tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured lines in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn write_line(&self, line: &str) {
        if let Ok(mut guard) = self.lines.lock() {
            guard.push(line.to_string());
        }
    }
}

/// Ordered fan-out over shared diagnostic sinks.
#[derive(Clone, Default)]
pub struct Diagnostics {
    sinks: Vec<Arc<dyn DiagnosticSink>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one sink; lines are delivered in registration order.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Writes the same line to every registered sink.
    pub fn emit(&self, line: &str) {
        for sink in &self.sinks {
            sink.write_line(line);
        }
    }
}
