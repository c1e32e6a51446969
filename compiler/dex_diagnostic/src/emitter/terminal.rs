//! Terminal Emitter
//!
//! Writes each diagnostic message as one line, with optional ANSI color.

use std::io::{self, Write};

use crate::{Diagnostic, Severity};

use super::DiagnosticSink;

/// ANSI color codes for terminal output.
mod colors {
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Automatically detect based on terminal capabilities.
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    #[default]
    Never,
}

impl ColorMode {
    /// Resolve to a boolean based on terminal detection.
    ///
    /// For `Auto` mode, `is_tty` determines whether colors should be used.
    /// This parameter is ignored for `Always` and `Never` modes.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// Every diagnostic becomes exactly one `write_all` of one line, so writers
/// that lock per call (such as [`io::Stderr`]) never interleave two messages.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a new terminal emitter with explicit color mode.
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    /// Consume the emitter and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, diagnostic: &Diagnostic) -> String {
        if self.colors {
            let color = match diagnostic.severity {
                Severity::Warning => colors::WARNING,
                Severity::Note => colors::NOTE,
            };
            format!("{color}{}{}\n", diagnostic.message, colors::RESET)
        } else {
            format!("{}\n", diagnostic.message)
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Create a terminal emitter for stderr with explicit color mode.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl Default for TerminalEmitter<io::Stderr> {
    /// Plain, uncolored standard error: the process-wide diagnostic channel.
    fn default() -> Self {
        Self::stderr(ColorMode::Never, false)
    }
}

impl<W: Write> DiagnosticSink for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let line = self.render(diagnostic);
        if let Err(err) = self.writer.write_all(line.as_bytes()) {
            tracing::warn!(%err, "failed to write diagnostic");
        }
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests;
