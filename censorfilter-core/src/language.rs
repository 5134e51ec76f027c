// censorfilter-core/src/language.rs
//! Languages: named, ordered collections of banned [`Word`]s.
//!
//! A word list is a JSON object from banned pattern to its exception patterns,
//! e.g. `{"cunt": ["scunthorpe"], "twat": []}`. Key order is significant (it is
//! the order in which hits are reported) and is preserved while loading.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::path::Path;

use crate::word::Word;

/// Locales shipped with the crate, embedded at compile time.
pub const DEFAULT_LANGUAGES: [&str; 5] = ["en", "es", "de", "ru", "off"];

/// A JSON object of string lists as `(key, values)` pairs in document order.
///
/// Word lists read it as `(pattern, exceptions)`; the character map as
/// `(letter, variants)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList(pub Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for WordList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct WordListVisitor;

        impl<'de> Visitor<'de> for WordListVisitor {
            type Value = WordList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of strings to string lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<WordList, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((pattern, exceptions)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push((pattern, exceptions));
                }
                Ok(WordList(entries))
            }
        }

        deserializer.deserialize_map(WordListVisitor)
    }
}

/// A named, immutable, ordered collection of words.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    words: Vec<Word>,
}

impl Language {
    pub fn new(name: impl Into<String>, words: Vec<Word>) -> Self {
        Self { name: name.into(), words }
    }

    /// Compiles every entry of a word list. Any invalid pattern fails the whole language.
    pub fn from_word_list(name: &str, list: WordList) -> Result<Self> {
        let words = list
            .0
            .iter()
            .map(|(pattern, exceptions)| {
                Word::new(pattern, exceptions)
                    .with_context(|| format!("Language '{}' has an invalid entry '{}'", name, pattern))
            })
            .collect::<Result<Vec<_>>>()?;
        debug!("Compiled {} words for language '{}'.", words.len(), name);
        Ok(Self::new(name, words))
    }

    pub fn from_json_str(name: &str, json: &str) -> Result<Self> {
        let list: WordList = serde_json::from_str(json)
            .with_context(|| format!("Failed to parse word list for language '{}'", name))?;
        Self::from_word_list(name, list)
    }

    /// Loads `<dir>/<name>.json`.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P, name: &str) -> Result<Self> {
        let path = dir.as_ref().join(format!("{}.json", name));
        info!("Loading word list '{}' from: {}", name, path.display());
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        let language = Self::from_json_str(name, &text)
            .with_context(|| format!("Failed to load word list {}", path.display()))?;
        info!("Loaded {} words for language '{}'.", language.words.len(), name);
        Ok(language)
    }

    /// Loads one of the [`DEFAULT_LANGUAGES`] embedded in the crate.
    pub fn load_default(name: &str) -> Result<Self> {
        let json = match name {
            "en" => include_str!("../config/filters/en.json"),
            "es" => include_str!("../config/filters/es.json"),
            "de" => include_str!("../config/filters/de.json"),
            "ru" => include_str!("../config/filters/ru.json"),
            "off" => include_str!("../config/filters/off.json"),
            other => anyhow::bail!("No embedded word list for language '{}'.", other),
        };
        Self::from_json_str(name, json)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }
}
