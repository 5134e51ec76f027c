//! Configuration management for `censorfilter-core`.
//!
//! A [`FilterConfig`] says which languages the process loads and where the word
//! lists and the character map come from. It is read once at startup from YAML;
//! anything wrong with it, or with the data it points at, is fatal to startup.
//!
//! ```yaml
//! languages: [en, de, off]
//! filters_dir: /etc/censorfilter/filters
//! chars_file: /etc/censorfilter/chars.json
//! ```
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::language::DEFAULT_LANGUAGES;

/// Which data the catalog is built from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Languages to load, in scan order.
    pub languages: Vec<String>,
    /// Directory holding `<language>.json` word lists. Embedded lists are used when unset.
    pub filters_dir: Option<PathBuf>,
    /// Character map JSON file. The embedded map is used when unset.
    pub chars_file: Option<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            filters_dir: None,
            chars_file: None,
        }
    }
}

impl FilterConfig {
    /// Loads a catalog configuration from a YAML file.
    ///
    /// Relative `filters_dir` and `chars_file` paths are resolved against the
    /// directory containing the configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading filter configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: FilterConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.filters_dir = config.filters_dir.map(|p| resolve_relative(base, p));
            config.chars_file = config.chars_file.map(|p| resolve_relative(base, p));
        }

        config.validate()?;
        info!(
            "Configuration from {} selects {} language(s).",
            path.display(),
            config.languages.len()
        );
        Ok(config)
    }

    /// Checks language names: at least one, none empty, no duplicates.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut errors = Vec::new();

        if self.languages.is_empty() {
            errors.push("No languages configured.".to_string());
        }
        for language in &self.languages {
            if language.trim().is_empty() {
                errors.push("A language has an empty name.".to_string());
            } else if !seen.insert(language.as_str()) {
                errors.push(format!("Duplicate language found: '{}'.", language));
            }
        }

        if errors.is_empty() {
            debug!("Filter configuration is valid: {:?}", self.languages);
            Ok(())
        } else {
            Err(anyhow!("Configuration validation failed:\n{}", errors.join("\n")))
        }
    }
}

fn resolve_relative(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}
