//! Advisory diagnostics for dex IR canonicalization.
//!
//! Canonicalization never fails. The only observable side effect of a
//! questionable input (a duplicate key in a sorted set) is a diagnostic line.
//! This crate holds the value that describes such a line and the sinks that
//! receive it:
//!
//! - [`Diagnostic`] and [`Severity`]
//! - [`DiagnosticSink`], the seam every producer writes through
//! - [`TerminalEmitter`] for standard error (the default boundary)
//! - [`DiagnosticCollector`] for capturing messages in memory
//! - [`SharedSink`] for many threads writing one channel
//!
//! ```text
//! let mut sink = DiagnosticCollector::new();
//! let set = build_canonical_set(Some(&elements), &ByName, &mut sink);
//! assert_eq!(sink.messages(), ["Ignoring duplicate annotation value for name: x"]);
//! ```

mod diagnostic;
pub mod emitter;

pub use diagnostic::{Diagnostic, Severity};
pub use emitter::{
    ColorMode, DiagnosticCollector, DiagnosticSink, NullSink, SharedSink, TerminalEmitter,
};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=dex_ir=debug` or `RUST_LOG=dex_ir=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
