//! word.rs - A single banned pattern together with the patterns that veto it.
//!
//! Matching uses "contains" semantics: a word fires when its pattern is found
//! anywhere inside a token, unless one of its own exception patterns or one of
//! the request's uncensor overrides is also found in that token.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::errors::FilterError;

/// Maximum allowed length for a pattern supplied with a request.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Compiled size limit for any single pattern.
const PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compiles one pattern with the crate-wide size limit.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, FilterError> {
    RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| FilterError::PatternCompilation(pattern.to_string(), e))
}

/// Compiles a pattern that came from a request, enforcing [`MAX_PATTERN_LENGTH`].
pub(crate) fn compile_request_pattern(pattern: &str) -> Result<Regex, FilterError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(FilterError::PatternLengthExceeded(
            pattern.chars().take(32).collect(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }
    compile_pattern(pattern)
}

/// An ordered set of compiled exception patterns.
#[derive(Debug, Clone, Default)]
pub struct Exceptions {
    patterns: Vec<Regex>,
}

impl Exceptions {
    /// No exceptions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Compiles request-supplied exception patterns.
    ///
    /// The result is request-local and must not be shared between requests with
    /// different settings.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FilterError> {
        let patterns = patterns
            .iter()
            .map(|p| compile_request_pattern(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True if any exception pattern is found in `token`.
    pub fn vetoes(&self, token: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(token))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// A banned pattern plus its exception patterns. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Word {
    name: String,
    matcher: Regex,
    exceptions: Exceptions,
}

impl Word {
    /// Compiles a word from trusted list data.
    pub fn new<S: AsRef<str>>(pattern: &str, exceptions: &[S]) -> Result<Self, FilterError> {
        let matcher = compile_pattern(pattern)?;
        let exceptions = exceptions
            .iter()
            .map(|e| compile_pattern(e.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: pattern.to_string(),
            matcher,
            exceptions: Exceptions { patterns: exceptions },
        })
    }

    /// Compiles an ad-hoc word from a request's server pattern. It has no exceptions.
    pub fn from_request_pattern(pattern: &str) -> Result<Self, FilterError> {
        let matcher = compile_request_pattern(pattern)?;
        Ok(Self {
            name: pattern.to_string(),
            matcher,
            exceptions: Exceptions::none(),
        })
    }

    /// The pattern source; reported as the matched-rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exceptions(&self) -> &Exceptions {
        &self.exceptions
    }

    /// True iff `token` contains the banned pattern and no exception vetoes it.
    pub fn test(&self, token: &str, extra_exceptions: &Exceptions) -> bool {
        if token.is_empty() || !self.matcher.is_match(token) {
            return false;
        }
        if self.exceptions.vetoes(token) {
            debug!("Word '{}' vetoed by its own exception list.", self.name);
            return false;
        }
        if extra_exceptions.vetoes(token) {
            debug!("Word '{}' vetoed by an uncensor override.", self.name);
            return false;
        }
        true
    }

    /// Like [`Word::test`], compiling `extra_exceptions` on the fly.
    pub fn test_with<S: AsRef<str>>(&self, token: &str, extra_exceptions: &[S]) -> Result<bool, FilterError> {
        let extra = Exceptions::compile(extra_exceptions)?;
        Ok(self.test(token, &extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_inside_larger_token() {
        let word = Word::new("bad", &[] as &[&str]).unwrap();
        assert!(word.test("abadword", &Exceptions::none()));
        assert!(!word.test("good", &Exceptions::none()));
    }

    #[test]
    fn test_own_exception_vetoes_match() {
        let word = Word::new("ass", &["class", "pass"]).unwrap();
        assert!(word.test("ass", &Exceptions::none()));
        assert!(!word.test("classic", &Exceptions::none()));
        assert!(!word.test("passage", &Exceptions::none()));
    }

    #[test]
    fn test_extra_exception_vetoes_match() {
        let word = Word::new("badword", &[] as &[&str]).unwrap();
        assert!(!word.test_with("badword", &["^bad"]).unwrap());
        assert!(word.test_with("badword", &["nothing"]).unwrap());
    }

    #[test]
    fn test_empty_token_never_matches() {
        let word = Word::new("x*", &[] as &[&str]).unwrap();
        assert!(!word.test("", &Exceptions::none()));
    }

    #[test]
    fn test_invalid_request_pattern_is_reported() {
        let err = Word::from_request_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, FilterError::PatternCompilation(ref p, _) if p == "(unclosed"));

        let err = Exceptions::compile(&["[z-a]"]).unwrap_err();
        assert!(matches!(err, FilterError::PatternCompilation(_, _)));
    }

    #[test]
    fn test_overlong_request_pattern_is_rejected() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = Word::from_request_pattern(&long).unwrap_err();
        assert!(matches!(err, FilterError::PatternLengthExceeded(_, len, max) if len == MAX_PATTERN_LENGTH + 1 && max == MAX_PATTERN_LENGTH));
    }
}
