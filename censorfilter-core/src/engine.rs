// censorfilter-core/src/engine.rs
//! Defines the `ModerationEngine` trait consumed by hosting layers.
//!
//! A hosting layer (CLI, HTTP service, bot) holds one engine for the whole
//! process and calls it concurrently from many requests. Implementations must
//! therefore be immutable after construction.
//!
//! License: MIT OR APACHE 2.0

use crate::errors::FilterError;
use crate::filter_result::FilterResult;
use crate::resolver::ResolvedText;
use crate::settings::FilterSettings;

/// The two operations a moderation host exposes.
pub trait ModerationEngine: Send + Sync {
    /// Normalizes and tokenizes `content` without matching anything.
    fn resolve(&self, content: &str) -> ResolvedText;

    /// Produces the censorship verdict for `content` under `settings`.
    ///
    /// # Errors
    /// * [`FilterError::InvalidSettings`] if the settings fail validation.
    /// * [`FilterError::PatternCompilation`] or [`FilterError::PatternLengthExceeded`]
    ///   if a server pattern or uncensor override is not a usable regular expression.
    fn test(&self, content: &str, settings: &FilterSettings) -> Result<FilterResult, FilterError>;

    /// Names of the loaded languages, in scan order.
    fn language_names(&self) -> Vec<&str>;
}
