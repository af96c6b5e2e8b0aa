//! # Parser Configuration Module
//!
//! This module defines configuration structures for ingredient parsing,
//! including the policy for unmatched lines and the unit dictionary setup.

use crate::unit_dictionary::{StaticUnitDictionary, DEFAULT_LOCALE};
use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

// Environment variables read by `ParserConfig::from_env`
pub const LINE_POLICY_VAR: &str = "RECIPE_UNITS_LINE_POLICY";
pub const LOCALE_VAR: &str = "RECIPE_UNITS_LOCALE";
pub const ALIASES_VAR: &str = "RECIPE_UNITS_ALIASES";

/// What the parser does with a line that does not start with a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedLinePolicy {
    /// Keep the whole line as the ingredient name, quantity 1, no unit
    #[default]
    Lenient,
    /// Reject the line
    Strict,
}

impl FromStr for UnmatchedLinePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(UnmatchedLinePolicy::Lenient),
            "strict" => Ok(UnmatchedLinePolicy::Strict),
            other => Err(anyhow::anyhow!(
                "Unknown line policy '{}', expected 'lenient' or 'strict'",
                other
            )),
        }
    }
}

impl fmt::Display for UnmatchedLinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedLinePolicy::Lenient => write!(f, "lenient"),
            UnmatchedLinePolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Configuration structure for ingredient parsing
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Handling of lines without a leading quantity
    pub line_policy: UnmatchedLinePolicy,
    /// Locale of the built-in unit dictionary (e.g., "pl", "en-US")
    pub locale: LanguageIdentifier,
    /// Optional JSON file with extra unit aliases
    pub aliases_path: Option<PathBuf>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            line_policy: UnmatchedLinePolicy::default(),
            locale: DEFAULT_LOCALE.parse().unwrap_or_default(),
            aliases_path: None,
        }
    }
}

impl ParserConfig {
    /// Build the configuration from environment variables.
    ///
    /// Unset variables keep their defaults; set but invalid values are errors.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(policy) = env::var(LINE_POLICY_VAR) {
            config.line_policy = policy
                .parse()
                .with_context(|| format!("Invalid {}", LINE_POLICY_VAR))?;
        }

        if let Ok(locale) = env::var(LOCALE_VAR) {
            config.locale = locale
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {} '{}': {:?}", LOCALE_VAR, locale, e))?;
        }

        if let Ok(path) = env::var(ALIASES_VAR) {
            if !path.trim().is_empty() {
                config.aliases_path = Some(PathBuf::from(path.trim()));
            }
        }

        Ok(config)
    }

    /// Build the unit dictionary described by this configuration
    pub fn build_dictionary(&self) -> Result<StaticUnitDictionary> {
        let dictionary = StaticUnitDictionary::for_locale(&self.locale);
        match &self.aliases_path {
            Some(path) => dictionary.load_aliases_file(path),
            None => Ok(dictionary),
        }
    }
}
