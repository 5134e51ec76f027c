//! errors.rs - Custom error types for the censorfilter-core library.
//!
//! Request-scoped failures (bad settings, bad caller-supplied regular expressions)
//! are reported through [`FilterError`]. Catalog loading happens once at startup
//! and reports through `anyhow::Error` with file context instead.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible request-level error types in `censorfilter-core`.
///
/// New variants may be added, so downstream matches need a wildcard arm.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FilterError {
    #[error("Failed to compile pattern '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Pattern '{0}': length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid filter settings: {0}")]
    InvalidSettings(String),
}
