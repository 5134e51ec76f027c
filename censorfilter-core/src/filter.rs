// censorfilter-core/src/filter.rs
//! The process-wide moderation catalog: one character map and the loaded
//! languages, built once at startup and only read afterwards.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::info;

use crate::chars::CharacterMap;
use crate::config::FilterConfig;
use crate::engine::ModerationEngine;
use crate::errors::FilterError;
use crate::filter_result::FilterResult;
use crate::language::Language;
use crate::resolver::{ResolvedText, Resolver};
use crate::settings::FilterSettings;
use crate::tester::Tester;

#[derive(Debug, Clone)]
pub struct Filter {
    resolver: Resolver,
    languages: Vec<Language>,
}

impl Filter {
    pub fn new(chars: CharacterMap, languages: Vec<Language>) -> Self {
        Self {
            resolver: Resolver::new(chars),
            languages,
        }
    }

    /// Builds the catalog described by `config`. Any missing or malformed source is an error.
    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        config.validate()?;

        let chars = match &config.chars_file {
            Some(path) => CharacterMap::load_from_file(path)?,
            None => CharacterMap::load_default()?,
        };

        let languages = config
            .languages
            .iter()
            .map(|name| match &config.filters_dir {
                Some(dir) => Language::load_from_dir(dir, name),
                None => Language::load_default(name)
                    .with_context(|| format!("Failed to load embedded word list '{}'", name)),
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Filter ready: {} character substitution(s), {} language(s), {} word(s).",
            chars.len(),
            languages.len(),
            languages.iter().map(|l| l.words().len()).sum::<usize>()
        );
        Ok(Self::new(chars, languages))
    }

    /// The catalog built from the embedded character map and every embedded language.
    pub fn load_default() -> Result<Self> {
        Self::from_config(&FilterConfig::default())
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn tester(&self) -> Tester<'_> {
        Tester::new(&self.resolver, &self.languages)
    }
}

impl ModerationEngine for Filter {
    fn resolve(&self, content: &str) -> ResolvedText {
        self.resolver.resolve(content)
    }

    fn test(&self, content: &str, settings: &FilterSettings) -> Result<FilterResult, FilterError> {
        self.tester().test(content, settings)
    }

    fn language_names(&self) -> Vec<&str> {
        self.languages.iter().map(Language::name).collect()
    }
}
