// censorfilter-core/src/settings.rs
//! Per-request filter settings supplied by the caller.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::errors::FilterError;

/// What a single request scans for.
///
/// Absent fields default to empty. An explicit JSON `null` for any list is a
/// deserialization error rather than an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Names of loaded languages whose words are active.
    pub base_languages: BTreeSet<String>,
    /// Extra banned patterns, compiled per request.
    pub server_patterns: Vec<String>,
    /// Literal substrings of the raw text.
    pub banned_phrases: Vec<String>,
    /// Whole space-separated words, compared case-insensitively.
    pub banned_literal_words: Vec<String>,
    /// Patterns that veto pattern hits for this request.
    pub uncensor_overrides: Vec<String>,
}

impl FilterSettings {
    /// Settings with the given base languages and nothing else.
    pub fn with_languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_languages: languages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parses settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, FilterError> {
        serde_json::from_str(json)
            .map_err(|e| FilterError::InvalidSettings(format!("malformed settings JSON: {}", e)))
    }

    /// Rejects settings that cannot be scanned meaningfully.
    ///
    /// Empty phrases, literal words and patterns would match everywhere (or,
    /// for uncensor overrides, veto everything) and are caller errors.
    pub fn validate(&self) -> Result<(), FilterError> {
        let mut errors = Vec::new();

        let fields: [(&str, &[String]); 4] = [
            ("server_patterns", &self.server_patterns),
            ("banned_phrases", &self.banned_phrases),
            ("banned_literal_words", &self.banned_literal_words),
            ("uncensor_overrides", &self.uncensor_overrides),
        ];
        for (field, values) in fields {
            if let Some(position) = values.iter().position(String::is_empty) {
                errors.push(format!("`{}` entry {} is empty", field, position));
            }
        }
        if self.base_languages.iter().any(String::is_empty) {
            errors.push("`base_languages` contains an empty name".to_string());
        }

        if errors.is_empty() {
            debug!(
                "Settings valid: {} language(s), {} pattern(s), {} phrase(s), {} literal word(s), {} override(s).",
                self.base_languages.len(),
                self.server_patterns.len(),
                self.banned_phrases.len(),
                self.banned_literal_words.len(),
                self.uncensor_overrides.len()
            );
            Ok(())
        } else {
            Err(FilterError::InvalidSettings(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let settings = FilterSettings::from_json_str(r#"{"base_languages": ["en"]}"#).unwrap();
        assert!(settings.base_languages.contains("en"));
        assert!(settings.server_patterns.is_empty());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_null_field_is_rejected() {
        let err = FilterSettings::from_json_str(r#"{"banned_phrases": null}"#).unwrap_err();
        assert!(matches!(err, FilterError::InvalidSettings(_)));
    }

    #[test]
    fn test_empty_entries_are_rejected() {
        let settings = FilterSettings {
            banned_phrases: vec!["ok".to_string(), String::new()],
            uncensor_overrides: vec![String::new()],
            ..FilterSettings::default()
        };
        let message = settings.validate().unwrap_err().to_string();
        assert!(message.contains("`banned_phrases` entry 1 is empty"));
        assert!(message.contains("`uncensor_overrides` entry 0 is empty"));
    }

    #[test]
    fn test_with_languages() {
        let settings = FilterSettings::with_languages(["en", "de"]);
        assert_eq!(settings.base_languages.len(), 2);
        assert!(settings.banned_phrases.is_empty());
    }
}
