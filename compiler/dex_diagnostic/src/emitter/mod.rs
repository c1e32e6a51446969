//! Diagnostic Sinks
//!
//! Producers never print. They hand each [`Diagnostic`] to a
//! [`DiagnosticSink`] chosen by the caller:
//! - [`TerminalEmitter`]: one verbatim line per diagnostic (standard error by default)
//! - [`DiagnosticCollector`]: in-memory capture
//! - [`SharedSink`]: a lock around another sink, cloneable across threads
//! - [`NullSink`]: discards everything

mod collector;
mod terminal;

pub use collector::{DiagnosticCollector, SharedSink};
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for receiving diagnostics.
pub trait DiagnosticSink {
    /// Emit a single diagnostic.
    fn emit(&mut self, diagnostic: &Diagnostic);

    /// Emit multiple diagnostics.
    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for Box<S> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        (**self).emit(diagnostic);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

/// Sink that drops every diagnostic.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _diagnostic: &Diagnostic) {}
}
