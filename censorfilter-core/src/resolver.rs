// censorfilter-core/src/resolver.rs
//! Normalization and tokenization of raw chat text.
//!
//! `resolve` turns a raw message into a [`ResolvedText`]: the normalized content
//! plus an ordered list of [`Spot`]s. Normalization lower-cases the text, strips
//! constructs that should never be matched (mentions, emoji tags, emails, links),
//! collapses stretched letters and maps obfuscation characters back to letters.
//! Tokenization then splits on an extended set of separators and fuses fragments
//! that obfuscation has split apart ("b.a.d", "fu ck").
//!
//! Every segment yields two spots: an editable one that the merge passes may fuse
//! with its neighbours, and an anchor that keeps the pristine single-segment
//! boundaries for position reporting.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};
use serde::{Serialize, Serializer};

use crate::chars::CharacterMap;
use crate::range::InclusiveRange;

/// Short fragments that are real words on their own and are never fused.
pub const SHORT_WORDS: [&str; 7] = ["an", "as", "us", "be", "it", "at", "xd"];

/// Fragments shorter than this (in characters) are fused into a neighbour.
const MIN_FRAGMENT_LEN: usize = 3;

lazy_static! {
    static ref MENTION: Regex = Regex::new(r"<#?@?!?&?(\d+)>").unwrap();
    static ref EMOJI: Regex = Regex::new(r"<a?:(?P<name>\w+):(?P<id>\d+)>").unwrap();
    static ref EMAIL: Regex = Regex::new(
        r"(?P<name>[a-zA-Z0-9_\-.]+)@(?P<domain>(\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.)|(([a-zA-Z0-9-]+\.)+))(?P<tld>[a-zA-Z]{2,4}|[0-9]{1,3})"
    )
    .unwrap();
    static ref LINK: Regex = Regex::new(
        r"https?://(www\.)?(?P<domain>[-a-zA-Z0-9@:%._+~#=]{1,256})\.(?P<tld>[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_+.~#?&/=]*))"
    )
    .unwrap();
}

/// Whitespace and punctuation that separate segments.
pub fn is_extended_space(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '_' | '/' | '\\' | '.' | '&' | '-' | '^' | '+' | '=' | ':' | '~' | ',' | '?' | '(' | ')'
        )
}

/// Characters deleted from segments without splitting them.
pub fn is_extended_nothing(c: char) -> bool {
    matches!(
        c,
        '"' | '*'
            | '\''
            | '|'
            | '`'
            | '<'
            | '>'
            | '#'
            | '!'
            | '['
            | ']'
            | '{'
            | '}'
            | ';'
            | '%'
            | '\u{200B}'
            | '\u{200C}'
            | '\u{200D}'
            | '\u{200E}'
            | '\u{200F}'
    )
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether a spot may be merged into neighbours or only anchors a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotRole {
    Editable,
    Anchor,
}

fn serialize_anchor_flag<S: Serializer>(role: &SpotRole, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(*role == SpotRole::Anchor)
}

/// One normalized token and the word-index range it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Spot {
    #[serde(rename = "t")]
    pub text: String,
    #[serde(rename = "i")]
    pub range: InclusiveRange,
    #[serde(rename = "n", serialize_with = "serialize_anchor_flag")]
    pub role: SpotRole,
    #[serde(skip)]
    pub removed: bool,
}

impl Spot {
    pub fn new(text: impl Into<String>, range: InclusiveRange, role: SpotRole) -> Self {
        Self { text: text.into(), range, role, removed: false }
    }

    pub fn is_editable(&self) -> bool {
        self.role == SpotRole::Editable
    }

    pub fn is_anchor(&self) -> bool {
        self.role == SpotRole::Anchor
    }
}

/// Output of [`Resolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedText {
    pub content: String,
    pub spots: Vec<Spot>,
}

impl ResolvedText {
    /// Spots produced by merging; these may span several segments.
    pub fn editable_spots(&self) -> impl Iterator<Item = &Spot> {
        self.spots.iter().filter(|s| s.is_editable())
    }

    /// One spot per non-empty segment, with its original boundaries.
    pub fn anchor_spots(&self) -> impl Iterator<Item = &Spot> {
        self.spots.iter().filter(|s| s.is_anchor())
    }
}

/// Normalizes and tokenizes text with a fixed character map.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    chars: CharacterMap,
}

impl Resolver {
    pub fn new(chars: CharacterMap) -> Self {
        Self { chars }
    }

    pub fn character_map(&self) -> &CharacterMap {
        &self.chars
    }

    /// Runs the full pipeline. Never fails; empty input yields an empty result.
    pub fn resolve(&self, raw: &str) -> ResolvedText {
        let content = self.normalize(raw);

        let spots = tokenize(&content);
        let segments = spots.len() / 2;
        let spots = merge_short_forward(spots);
        let spots = merge_short_backward(spots);
        let spots = combine_leading_characters(spots);

        debug!(
            "Resolved {} segment(s) into {} editable and {} anchor spot(s).",
            segments,
            spots.iter().filter(|s| s.is_editable()).count(),
            spots.iter().filter(|s| s.is_anchor()).count()
        );

        ResolvedText { content, spots }
    }

    /// Steps 1-4 of the pipeline: the normalized content without tokenization.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let stripped = strip_ignored_patterns(&lowered);
        let converted = convert_alternative_characters(&stripped, &self.chars);
        converted.trim_start().to_string()
    }
}

/// Removes every extended-space character from `text`.
fn strip_separators(text: &str) -> String {
    text.chars().filter(|c| !is_extended_space(*c)).collect()
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Drops mentions, unwraps emoji tags, flattens emails and links, then collapses stretching.
pub fn strip_ignored_patterns(text: &str) -> String {
    let without_mentions = MENTION.replace_all(text, "");
    let without_emoji = EMOJI.replace_all(&without_mentions, "${name}");
    let without_emails = EMAIL.replace_all(&without_emoji, |caps: &Captures| {
        strip_separators(&format!(
            "{}{}{}",
            group(caps, "name"),
            group(caps, "domain"),
            group(caps, "tld")
        ))
    });
    let without_links = LINK.replace_all(&without_emails, |caps: &Captures| {
        strip_separators(&format!("{}{}", group(caps, "domain"), group(caps, "tld")))
    });
    collapse_stretching(&without_links)
}

/// Collapses every run of three or more identical word characters to exactly two.
pub fn collapse_stretching(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if previous == Some(c) {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run <= 2 || !is_word_char(c) {
            out.push(c);
        }
    }
    out
}

/// Replaces obfuscation characters with their canonical letters.
pub fn convert_alternative_characters(text: &str, chars: &CharacterMap) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\n' || is_extended_space(c) || is_extended_nothing(c) {
            out.push(c);
            continue;
        }
        match chars.get(c) {
            Some(canonical) => out.push_str(canonical),
            None => out.push(c),
        }
    }
    out
}

/// Splits normalized content into an editable and an anchor spot per segment.
pub fn tokenize(content: &str) -> Vec<Spot> {
    let mut spots = Vec::new();
    for (index, segment) in content.split(is_extended_space).enumerate() {
        let text: String = segment.chars().filter(|c| !is_extended_nothing(*c)).collect();
        let range = InclusiveRange::single(index);
        spots.push(Spot::new(text.clone(), range, SpotRole::Editable));
        spots.push(Spot::new(text, range, SpotRole::Anchor));
    }
    spots
}

fn editable_indices(spots: &[Spot]) -> Vec<usize> {
    spots
        .iter()
        .enumerate()
        .filter(|(_, spot)| spot.is_editable())
        .map(|(index, _)| index)
        .collect()
}

fn is_short_fragment(text: &str) -> bool {
    !SHORT_WORDS.contains(&text) && text.chars().count() < MIN_FRAGMENT_LEN
}

/// Drops tombstoned and empty spots.
fn compact_spots(mut spots: Vec<Spot>) -> Vec<Spot> {
    spots.retain(|spot| !spot.removed && !spot.text.is_empty());
    spots
}

/// Marks `spots[from]` removed and returns its text and range.
fn take_spot(spots: &mut [Spot], from: usize) -> (String, InclusiveRange) {
    let spot = &mut spots[from];
    spot.removed = true;
    (std::mem::take(&mut spot.text), spot.range)
}

/// Prepends each short fragment onto the following editable spot.
pub fn merge_short_forward(mut spots: Vec<Spot>) -> Vec<Spot> {
    let editable = editable_indices(&spots);
    for pair in editable.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if !is_short_fragment(&spots[current].text) {
            continue;
        }
        let (fragment, range) = take_spot(&mut spots, current);
        let target = &mut spots[next];
        target.text.insert_str(0, &fragment);
        target.range.widen(&range);
    }
    compact_spots(spots)
}

/// Appends each short fragment onto the preceding editable spot, scanning from the end.
pub fn merge_short_backward(mut spots: Vec<Spot>) -> Vec<Spot> {
    let editable = editable_indices(&spots);
    for pair in editable.windows(2).rev() {
        let (previous, current) = (pair[0], pair[1]);
        if !is_short_fragment(&spots[current].text) {
            continue;
        }
        let (fragment, range) = take_spot(&mut spots, current);
        let target = &mut spots[previous];
        target.text.push_str(&fragment);
        target.range.widen(&range);
    }
    compact_spots(spots)
}

/// Fuses neighbours where one ends with the letter the next starts with ("fuc" "ck").
pub fn combine_leading_characters(mut spots: Vec<Spot>) -> Vec<Spot> {
    let editable = editable_indices(&spots);
    for pair in editable.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        let text = &spots[current].text;
        if SHORT_WORDS.iter().any(|word| text.ends_with(word)) {
            continue;
        }
        let boundary_repeats = match (text.chars().last(), spots[next].text.chars().next()) {
            (Some(last), Some(first)) => last == first,
            _ => false,
        };
        if !boundary_repeats {
            continue;
        }
        let (prefix, range) = take_spot(&mut spots, current);
        let target = &mut spots[next];
        target.text.insert_str(0, &prefix);
        target.range.widen(&range);
    }
    compact_spots(spots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> Resolver {
        Resolver::new(CharacterMap::load_default().unwrap())
    }

    fn editable(resolved: &ResolvedText) -> Vec<(&str, [usize; 2])> {
        resolved
            .editable_spots()
            .map(|s| (s.text.as_str(), [s.range.start, s.range.end]))
            .collect()
    }

    #[test]
    fn test_stretching_collapses_to_two() {
        assert_eq!(collapse_stretching("heeeellooo"), "heelloo");
        assert_eq!(collapse_stretching("aa"), "aa");
        assert_eq!(collapse_stretching("!!!!"), "!!!!");
        assert_eq!(resolver().resolve("HEEEELLOOO").content, "heelloo");
    }

    #[test]
    fn test_mentions_are_removed_and_emoji_unwrapped() {
        assert_eq!(strip_ignored_patterns("hi <@123456> there"), "hi  there");
        assert_eq!(strip_ignored_patterns("<@!42><#99><@&7>"), "");
        assert_eq!(strip_ignored_patterns("look <:pog:123456789>"), "look pog");
        assert_eq!(strip_ignored_patterns("<a:dance:1>"), "dance");
    }

    #[test]
    fn test_emails_and_links_lose_their_separators() {
        assert_eq!(strip_ignored_patterns("mail bad.word@ex-ample.com now"), "mail badwordexamplecom now");
        assert_eq!(
            strip_ignored_patterns("visit http://example.com/x now"),
            "visit examplecomx now"
        );
        assert_eq!(strip_ignored_patterns("https://www.b.a.d.word.com"), "badwordcom");
    }

    #[test]
    fn test_leetspeak_is_mapped_but_separators_are_kept() {
        let resolver = resolver();
        assert_eq!(resolver.normalize("h3ll0 w0rld"), "hello world");
        assert_eq!(resolver.normalize("a.b!c"), "a.b!c");
        assert_eq!(resolver.normalize("   $up"), "sup");
    }

    #[test]
    fn test_tokenize_emits_editable_and_anchor_pairs() {
        let spots = tokenize("a b!c");
        assert_eq!(spots.len(), 4);
        assert_eq!(spots[0], Spot::new("a", InclusiveRange::single(0), SpotRole::Editable));
        assert_eq!(spots[1], Spot::new("a", InclusiveRange::single(0), SpotRole::Anchor));
        assert_eq!(spots[2].text, "bc");
        assert_eq!(spots[3].range, InclusiveRange::single(1));
    }

    #[test]
    fn test_split_fragments_fuse_into_one_spot() {
        let resolved = resolver().resolve("b-a-d");
        assert_eq!(resolved.content, "b-a-d");
        assert_eq!(editable(&resolved), vec![("bad", [0, 2])]);
        let anchors: Vec<&str> = resolved.anchor_spots().map(|s| s.text.as_str()).collect();
        assert_eq!(anchors, vec!["b", "a", "d"]);
    }

    #[test]
    fn test_trailing_fragment_merges_backwards() {
        let resolved = resolver().resolve("hello x");
        assert_eq!(editable(&resolved), vec![("hellox", [0, 1])]);
    }

    #[test]
    fn test_short_words_are_left_alone() {
        let resolved = resolver().resolve("it is");
        assert_eq!(editable(&resolved), vec![("itis", [0, 1])]);

        let resolved = resolver().resolve("be there at");
        assert_eq!(editable(&resolved), vec![("be", [0, 0]), ("there", [1, 1]), ("at", [2, 2])]);
    }

    #[test]
    fn test_duplicated_boundary_letter_is_combined() {
        let resolved = resolver().resolve("fuc cking");
        assert_eq!(editable(&resolved), vec![("fuccking", [0, 1])]);

        let resolved = resolver().resolve("cat tail");
        assert_eq!(editable(&resolved), vec![("cat", [0, 0]), ("tail", [1, 1])]);
    }

    #[test]
    fn test_empty_input_resolves_to_nothing() {
        let resolved = resolver().resolve("");
        assert_eq!(resolved.content, "");
        assert!(resolved.spots.is_empty());

        let resolved = resolver().resolve("  \u{200B} ");
        assert!(resolved.spots.is_empty());
    }

    #[test]
    fn test_normalized_text_is_a_fixed_point() {
        let resolver = resolver();
        let once = resolver.resolve("hello there friend").content;
        assert_eq!(resolver.resolve(&once).content, once);
    }

    #[test]
    fn test_resolved_text_serializes_in_wire_shape() {
        let resolved = resolver().resolve("b-a-d");
        let json = serde_json::to_value(&resolved).unwrap();
        assert_eq!(json["content"], "b-a-d");
        assert_eq!(json["spots"][2]["t"], "bad");
        assert_eq!(json["spots"][2]["i"], serde_json::json!([0, 2]));
        assert_eq!(json["spots"][2]["n"], false);
        assert_eq!(json["spots"][0]["n"], true);
        assert!(json["spots"][0].get("removed").is_none());
    }
}
