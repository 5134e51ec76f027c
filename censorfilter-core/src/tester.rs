// censorfilter-core/src/tester.rs
//! Runs the three scans of a filter test and collapses their hits.
//!
//! Scans run in a fixed order over the same raw message and the same resolved
//! text, so `places` lists phrase hits first, then literal-word hits, then
//! pattern hits:
//!
//! 1. phrases: literal substrings of the raw message;
//! 2. literal words: whole space-separated words, case-insensitive;
//! 3. patterns: every spot against every active [`Word`].
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use std::collections::HashSet;

use crate::errors::FilterError;
use crate::filter_result::{log_hit_debug, FilterResult};
use crate::language::Language;
use crate::range::InclusiveRange;
use crate::resolver::{ResolvedText, Resolver};
use crate::settings::FilterSettings;
use crate::word::{Exceptions, Word};

/// Patterns compiled from one request's settings. Never shared between requests.
#[derive(Debug)]
struct CompiledRequest {
    server_words: Vec<Word>,
    uncensor: Exceptions,
}

impl CompiledRequest {
    fn compile(settings: &FilterSettings) -> Result<Self, FilterError> {
        let server_words = settings
            .server_patterns
            .iter()
            .map(|pattern| Word::from_request_pattern(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let uncensor = Exceptions::compile(&settings.uncensor_overrides)?;
        Ok(Self { server_words, uncensor })
    }
}

/// Borrowed view of the catalog that tests messages.
#[derive(Debug, Clone, Copy)]
pub struct Tester<'a> {
    resolver: &'a Resolver,
    languages: &'a [Language],
}

impl<'a> Tester<'a> {
    pub fn new(resolver: &'a Resolver, languages: &'a [Language]) -> Self {
        Self { resolver, languages }
    }

    /// Tests `raw` against `settings`.
    ///
    /// Fails before any scanning when the settings are invalid or one of the
    /// request's patterns does not compile.
    pub fn test(&self, raw: &str, settings: &FilterSettings) -> Result<FilterResult, FilterError> {
        settings.validate()?;
        let request = CompiledRequest::compile(settings)?;
        let resolved = self.resolver.resolve(raw);

        let mut result = FilterResult::new();
        scan_phrases(raw, &settings.banned_phrases, &mut result);
        scan_literal_words(raw, &settings.banned_literal_words, &mut result);

        let active = self.active_words(settings, &request);
        scan_patterns(&resolved, &active, &request.uncensor, &mut result);

        let result = result.finish();
        debug!(
            "Test finished: censored={}, {} range(s), {} place(s).",
            result.censored,
            result.ranges.len(),
            result.places.len()
        );
        Ok(result)
    }

    /// Words of the selected languages in load order, then the request's server patterns.
    fn active_words<'r>(&'r self, settings: &FilterSettings, request: &'r CompiledRequest) -> Vec<&'r Word> {
        for name in &settings.base_languages {
            if !self.languages.iter().any(|l| l.name() == name.as_str()) {
                warn!("Base language '{}' is not loaded; skipping.", name);
            }
        }
        self.languages
            .iter()
            .filter(|language| settings.base_languages.contains(language.name()))
            .flat_map(|language| language.words())
            .chain(request.server_words.iter())
            .collect()
    }
}

/// Word index of the character starting at byte `offset`: the number of single
/// spaces before it.
fn word_index_at(raw: &str, offset: usize) -> usize {
    raw.as_bytes()[..offset].iter().filter(|b| **b == b' ').count()
}

/// Converts the byte span `[start, end)` of a match into a word-index range.
pub fn word_range_of(raw: &str, start: usize, end: usize) -> InclusiveRange {
    let last_char_start = raw[start..end]
        .char_indices()
        .last()
        .map_or(start, |(i, _)| start + i);
    InclusiveRange::new(word_index_at(raw, start), word_index_at(raw, last_char_start))
}

/// Flags every non-overlapping occurrence of each phrase in the raw text.
pub fn scan_phrases(raw: &str, phrases: &[String], result: &mut FilterResult) {
    for phrase in phrases.iter().filter(|p| !p.is_empty()) {
        for (start, found) in raw.match_indices(phrase.as_str()) {
            let range = word_range_of(raw, start, start + found.len());
            log_hit_debug("Phrase", phrase, found, &range);
            result.flag(range);
            result.place(phrase.as_str());
        }
    }
}

/// Flags every space-separated word whose lower-cased form is a banned literal word.
pub fn scan_literal_words(raw: &str, literal_words: &[String], result: &mut FilterResult) {
    if literal_words.is_empty() {
        return;
    }
    let banned: HashSet<String> = literal_words.iter().map(|w| w.to_lowercase()).collect();
    for (index, word) in raw.split(' ').enumerate() {
        if banned.contains(&word.to_lowercase()) {
            let range = InclusiveRange::single(index);
            log_hit_debug("Literal word", word, word, &range);
            result.flag(range);
            result.place(word);
        }
    }
}

/// Tests every spot against every active word; each spot is flagged at most once.
pub fn scan_patterns(resolved: &ResolvedText, words: &[&Word], uncensor: &Exceptions, result: &mut FilterResult) {
    if words.is_empty() {
        return;
    }
    for spot in &resolved.spots {
        let mut flagged = false;
        for word in words {
            if !word.test(&spot.text, uncensor) {
                continue;
            }
            if !flagged {
                result.flag(spot.range);
                flagged = true;
            }
            log_hit_debug("Pattern", word.name(), &spot.text, &spot.range);
            result.place(word.name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chars::CharacterMap;

    fn catalog() -> (Resolver, Vec<Language>) {
        let en = Language::from_json_str("en", r#"{"badword": ["notabadword"], "bad": ["badminton"]}"#).unwrap();
        (Resolver::new(CharacterMap::load_default().unwrap()), vec![en])
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_word_range_counts_single_spaces() {
        let raw = "you are  so bad";
        assert_eq!(word_range_of(raw, 0, 3), InclusiveRange::single(0));
        assert_eq!(word_range_of(raw, 4, 12), InclusiveRange::new(1, 3));
        assert_eq!(word_range_of(raw, 12, 15), InclusiveRange::single(4));
        assert_eq!(word_range_of(raw, 0, 4), InclusiveRange::single(0));
    }

    #[test]
    fn test_phrase_occurrences_do_not_overlap() {
        let mut result = FilterResult::new();
        scan_phrases("aaa aaa", &strings(&["aa"]), &mut result);
        assert_eq!(result.ranges, vec![InclusiveRange::single(0), InclusiveRange::single(1)]);
        assert_eq!(result.places, strings(&["aa", "aa"]));
    }

    #[test]
    fn test_phrase_match_is_case_sensitive_on_raw_text() {
        let mut result = FilterResult::new();
        scan_phrases("Go Away now", &strings(&["go away"]), &mut result);
        assert!(!result.censored);
        scan_phrases("Go Away now", &strings(&["Go Away"]), &mut result);
        assert_eq!(result.ranges, vec![InclusiveRange::new(0, 1)]);
    }

    #[test]
    fn test_literal_words_are_case_insensitive_and_whole() {
        let mut result = FilterResult::new();
        scan_literal_words("Nope NOPE nopes", &strings(&["nope"]), &mut result);
        assert_eq!(result.ranges, vec![InclusiveRange::single(0), InclusiveRange::single(1)]);
        assert_eq!(result.places, strings(&["Nope", "NOPE"]));
    }

    #[test]
    fn test_pattern_hit_reports_every_matching_word() {
        let (resolver, languages) = catalog();
        let tester = Tester::new(&resolver, &languages);
        let result = tester.test("such a badword", &FilterSettings::with_languages(["en"])).unwrap();
        assert!(result.censored);
        assert_eq!(result.ranges, vec![InclusiveRange::new(1, 2)]);
        assert_eq!(result.places, strings(&["badword", "bad", "badword", "bad"]));
    }

    #[test]
    fn test_language_not_selected_yields_nothing() {
        let (resolver, languages) = catalog();
        let tester = Tester::new(&resolver, &languages);
        let result = tester.test("badword", &FilterSettings::with_languages(["de"])).unwrap();
        assert_eq!(result, FilterResult::default());
    }

    #[test]
    fn test_server_patterns_are_active_without_languages() {
        let (resolver, languages) = catalog();
        let tester = Tester::new(&resolver, &languages);
        let settings = FilterSettings { server_patterns: strings(&["sp[a4]m"]), ..FilterSettings::default() };
        let result = tester.test("buy sp4m today", &settings).unwrap();
        assert_eq!(result.ranges, vec![InclusiveRange::single(1)]);
        assert_eq!(result.places, strings(&["sp[a4]m", "sp[a4]m"]));
    }

    #[test]
    fn test_invalid_override_fails_the_request() {
        let (resolver, languages) = catalog();
        let tester = Tester::new(&resolver, &languages);
        let settings = FilterSettings {
            uncensor_overrides: strings(&["(oops"]),
            ..FilterSettings::with_languages(["en"])
        };
        let err = tester.test("badword", &settings).unwrap_err();
        assert!(matches!(err, FilterError::PatternCompilation(_, _)));
        assert!(tester.test("badword", &FilterSettings::with_languages(["en"])).unwrap().censored);
    }
}
