//! Core diagnostic value.

use std::fmt;

/// Severity level for diagnostics.
///
/// Nothing in canonicalization is an error, so there is no `Error` level.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A single advisory line.
///
/// The message is rendered verbatim by every emitter; downstream tooling
/// matches on it, so its wording is part of the compatibility surface.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// Create a warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Create a note.
    pub fn note(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Note,
            message: message.into(),
        }
    }

    /// A sorted-set element was dropped because another element had the same key.
    ///
    /// `subject` names what was dropped (`"annotation value"` for annotation
    /// elements), `key` is the dropped element's identifying attribute.
    pub fn duplicate_element(subject: &str, key: impl fmt::Display) -> Self {
        Self::warning(format!("Ignoring duplicate {subject} for name: {key}"))
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
