// censorfilter-core/src/chars.rs
//! Character-substitution table used to undo leetspeak and accent obfuscation.
//!
//! The data source maps a canonical letter to every character that should
//! normalize to it (`{"a": ["4", "@", "à"]}`). Loading inverts that into a
//! lookup from obfuscation character to canonical letter. The keys `"-"` and
//! `"?"` are reserved in the source format and never loaded.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;

use crate::language::WordList;

/// Keys of the source format that group punctuation variants and are not substitutions.
const RESERVED_KEYS: [&str; 2] = ["-", "?"];

/// Immutable mapping from a single obfuscation character to its canonical letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterMap {
    conversions: HashMap<char, String>,
}

impl CharacterMap {
    /// An empty map that leaves every character unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the map from its JSON source text.
    ///
    /// Entries apply in document order, so a character listed under two letters
    /// maps to the later one.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let source: WordList =
            serde_json::from_str(json).context("Failed to parse character map")?;
        Ok(Self::from_source(source.0))
    }

    /// Builds the map from `canonical letter -> obfuscation characters` entries.
    pub fn from_source<I, S>(source: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: AsRef<str>,
    {
        let mut conversions = HashMap::new();
        for (canonical, characters) in source {
            let canonical = canonical.as_ref();
            if RESERVED_KEYS.contains(&canonical) {
                debug!("Skipping reserved character map key '{}'.", canonical);
                continue;
            }
            for character in characters {
                let character = character.as_ref();
                let mut chars = character.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        conversions.insert(c, canonical.to_string());
                    }
                    _ => warn!(
                        "Character map entry '{}' for '{}' is not a single character; skipping.",
                        character, canonical
                    ),
                }
            }
        }
        Self { conversions }
    }

    /// Loads a character map from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading character map from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read character map {}", path.display()))?;
        let map = Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse character map {}", path.display()))?;
        info!("Loaded {} character substitutions from {}.", map.len(), path.display());
        Ok(map)
    }

    /// Loads the character map embedded in the crate.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default character map from embedded string...");
        let map = Self::from_json_str(include_str!("../config/chars.json"))
            .context("Failed to parse default character map")?;
        debug!("Loaded {} default character substitutions.", map.len());
        Ok(map)
    }

    /// The canonical replacement for `c`, if it is an obfuscation character.
    pub fn get(&self, c: char) -> Option<&str> {
        self.conversions.get(&c).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.conversions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_keys_are_not_loaded() {
        let map = CharacterMap::from_json_str(r#"{"a": ["4"], "-": ["–"], "?": ["¿"]}"#).unwrap();
        assert_eq!(map.get('4'), Some("a"));
        assert_eq!(map.get('–'), None);
        assert_eq!(map.get('¿'), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_multi_character_entries_are_skipped() {
        let map = CharacterMap::from_source(vec![("w", vec!["vv", "ŵ"])]);
        assert_eq!(map.get('ŵ'), Some("w"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_default_map_covers_common_leetspeak() {
        let map = CharacterMap::load_default().unwrap();
        assert_eq!(map.get('0'), Some("o"));
        assert_eq!(map.get('1'), Some("i"));
        assert_eq!(map.get('3'), Some("e"));
        assert_eq!(map.get('@'), Some("a"));
        assert_eq!(map.get('$'), Some("s"));
        assert_eq!(map.get('é'), Some("e"));
        assert_eq!(map.get('b'), None);
    }

    #[test]
    fn test_later_letter_wins_for_shared_character() {
        let map = CharacterMap::from_json_str(r#"{"o": ["0"], "d": ["0"]}"#).unwrap();
        assert_eq!(map.get('0'), Some("d"));

        let map = CharacterMap::from_json_str(r#"{"d": ["0"], "o": ["0"]}"#).unwrap();
        assert_eq!(map.get('0'), Some("o"));
    }

    #[test]
    fn test_malformed_source_is_an_error() {
        assert!(CharacterMap::from_json_str(r#"{"a": "4"}"#).is_err());
    }
}
