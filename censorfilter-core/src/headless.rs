// censorfilter-core/src/headless.rs
// File: censorfilter-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot use of the embedded default catalog.
//!
//! The default [`Filter`] is built on first use and shared for the rest of the
//! process.

use anyhow::Result;
use once_cell::sync::OnceCell;

use crate::engine::ModerationEngine;
use crate::filter::Filter;
use crate::filter_result::FilterResult;
use crate::resolver::ResolvedText;
use crate::settings::FilterSettings;

static DEFAULT_FILTER: OnceCell<Filter> = OnceCell::new();

/// The shared catalog built from the embedded character map and word lists.
pub fn default_filter() -> Result<&'static Filter> {
    DEFAULT_FILTER.get_or_try_init(Filter::load_default)
}

/// Resolves `content` with the default catalog.
pub fn headless_resolve_string(content: &str) -> Result<ResolvedText> {
    Ok(default_filter()?.resolve(content))
}

/// Tests `content` against the default catalog.
pub fn headless_test_string(content: &str, settings: &FilterSettings) -> Result<FilterResult> {
    Ok(default_filter()?.test(content, settings)?)
}
