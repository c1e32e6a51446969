//! In-memory and shared sinks.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::Diagnostic;

use super::DiagnosticSink;

/// Sink that keeps every diagnostic in emission order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected diagnostics, oldest first.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Messages of all collected diagnostics, oldest first.
    pub fn messages(&self) -> Vec<&str> {
        self.diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_warning()).count()
    }

    /// Drain the collected diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Replay everything collected so far into another sink.
    pub fn replay(&self, sink: &mut dyn DiagnosticSink) {
        sink.emit_all(&self.diagnostics);
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

/// A sink shared by several owners, possibly on different threads.
///
/// Each clone points at the same inner sink; every `emit` takes the lock for
/// the duration of one diagnostic.
pub struct SharedSink<S>(Arc<Mutex<S>>);

impl<S> SharedSink<S> {
    pub fn new(sink: S) -> Self {
        SharedSink(Arc::new(Mutex::new(sink)))
    }

    /// Lock the inner sink, e.g. to read a shared collector.
    pub fn lock(&self) -> MutexGuard<'_, S> {
        self.0.lock()
    }
}

impl<S> Clone for SharedSink<S> {
    fn clone(&self) -> Self {
        SharedSink(Arc::clone(&self.0))
    }
}

impl<S: Default> Default for SharedSink<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: DiagnosticSink> DiagnosticSink for SharedSink<S> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.0.lock().emit(diagnostic);
    }

    fn flush(&mut self) {
        self.0.lock().flush();
    }
}

#[cfg(test)]
mod tests;
