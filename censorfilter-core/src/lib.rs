// censorfilter-core/src/lib.rs
//! # CensorFilter Core Library
//!
//! `censorfilter-core` decides whether a chat message contains banned language and,
//! if so, which word positions of the message should be censored. It undoes common
//! obfuscation (leetspeak, stretched letters, separators inserted between letters,
//! links and emails) before matching against per-language word lists, caller-supplied
//! patterns, banned phrases and banned literal words.
//!
//! The library holds no per-request state. The catalog (character map and word lists)
//! is loaded once and only read afterwards, so one [`Filter`] can serve any number of
//! concurrent requests.
//!
//! ## Modules
//!
//! * `range`: Inclusive word-index ranges and the collapse that makes them disjoint.
//! * `chars`: The character map used to undo substitution obfuscation.
//! * `word`: A compiled banned-word pattern and its exception patterns.
//! * `language`: A named, ordered list of words loaded from a JSON word list.
//! * `resolver`: Normalization and tokenization of raw text into spots.
//! * `settings`: Per-request `FilterSettings`.
//! * `tester`: The phrase, literal-word and pattern scans.
//! * `filter_result`: The `FilterResult` verdict and hit-logging helpers.
//! * `config`: The YAML `FilterConfig` describing which catalog to load.
//! * `engine`: Defines the `ModerationEngine` trait.
//! * `filter`: The catalog, implementing `ModerationEngine`.
//! * `headless`: One-shot helpers over the embedded default catalog.
//! * `errors`: The `FilterError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use censorfilter_core::{headless_test_string, FilterSettings};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let settings = FilterSettings::with_languages(["en"]);
//!     let result = headless_test_string("well sh1t happens", &settings)?;
//!     assert!(result.censored);
//!     println!("{}", serde_json::to_string(&result)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Loading the catalog returns `anyhow::Result`; a missing or malformed word list is
//! fatal to startup. Per-request failures (invalid settings, a caller pattern that does
//! not compile) are reported as [`FilterError`] and never affect shared data.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod chars;
pub mod config;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod filter_result;
pub mod headless;
pub mod language;
pub mod range;
pub mod resolver;
pub mod settings;
pub mod tester;
pub mod word;

/// Re-exports the catalog configuration.
pub use config::FilterConfig;

/// Re-exports the custom error type for clear error reporting.
pub use errors::FilterError;

/// Re-exports the engine trait and its catalog implementation.
pub use engine::ModerationEngine;
pub use filter::Filter;

/// Re-exports the catalog building blocks.
pub use chars::CharacterMap;
pub use language::{Language, WordList, DEFAULT_LANGUAGES};
pub use word::{Exceptions, Word, MAX_PATTERN_LENGTH};

/// Re-exports the request and response types.
pub use filter_result::{redact_sensitive, FilterResult};
pub use range::{collapse_ranges, InclusiveRange};
pub use resolver::{ResolvedText, Resolver, Spot, SpotRole};
pub use settings::FilterSettings;
pub use tester::Tester;

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{default_filter, headless_resolve_string, headless_test_string};
