//! Tracing targets used by the library.
//!
//! The library only emits `tracing` events. Binaries decide where they go,
//! e.g. `RUST_LOG=pofile::reporter=debug`.

/// Target names for log filtering.
pub mod targets {
    /// Parsing engine steps, reductions and acceptance.
    pub const PARSER: &str = "pofile::parser";
    /// Failures handed out by the error reporter.
    pub const REPORTER: &str = "pofile::reporter";
    /// Compiled catalog encoding and decoding.
    pub const CATALOG: &str = "pofile::catalog";
}
