// censorfilter-core/src/filter_result.rs
//! The verdict of a filter test, plus helpers for logging hits without leaking
//! message content into debug logs.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::range::{collapse_ranges, InclusiveRange};

lazy_static! {
    /// Whether matched message text may appear verbatim in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("CENSORFILTER_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Result of testing one message.
///
/// `ranges` are word-index ranges over the original message, sorted and
/// disjoint once the result is finished. `places` names every rule that
/// produced a hit, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterResult {
    pub censored: bool,
    pub ranges: Vec<InclusiveRange>,
    pub places: Vec<String>,
}

impl FilterResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one hit: marks the result censored and appends the range.
    pub fn flag(&mut self, range: InclusiveRange) {
        self.censored = true;
        self.ranges.push(range);
    }

    /// Records the name of a rule that contributed a hit.
    pub fn place(&mut self, name: impl Into<String>) {
        self.places.push(name.into());
    }

    /// Collapses the accumulated ranges into a minimal disjoint cover.
    pub fn finish(mut self) -> Self {
        self.ranges = collapse_ranges(std::mem::take(&mut self.ranges));
        self
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", len)
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_hit_debug(scan: &str, rule_name: &str, matched_text: &str, range: &InclusiveRange) {
    debug!(
        "{} hit: Rule='{}', Text='{}', Range=[{}, {}]",
        scan,
        get_loggable_content(rule_name),
        get_loggable_content(matched_text),
        range.start,
        range.end
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_serializes_in_wire_shape() {
        let mut result = FilterResult::new();
        result.flag(InclusiveRange::new(1, 2));
        result.place("badword");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"censored":true,"ranges":[[1,2]],"places":["badword"]}"#);
    }

    #[test]
    fn test_finish_collapses_ranges() {
        let mut result = FilterResult::new();
        result.flag(InclusiveRange::single(3));
        result.flag(InclusiveRange::new(2, 3));
        result.flag(InclusiveRange::single(0));
        let result = result.finish();
        assert_eq!(result.ranges, vec![InclusiveRange::single(0), InclusiveRange::new(2, 3)]);
    }
}
