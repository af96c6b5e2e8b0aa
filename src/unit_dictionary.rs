//! # Unit Dictionary
//!
//! Resolves free-text unit tokens ("łyżka", "teaspoons", "ml") into a
//! [`MeasurementUnit`]. Lookup lower-cases and trims the token and performs no
//! other normalization, so every spelling variant (singular, plural, per-locale,
//! multi-word) is listed explicitly in the alias tables.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_units::measurement_unit::MeasurementUnit;
//! use recipe_units::unit_dictionary::{StaticUnitDictionary, UnitDictionary};
//!
//! let dictionary = StaticUnitDictionary::polish();
//! assert_eq!(dictionary.resolve(" ŁYŻKA "), Some(MeasurementUnit::Tablespoons));
//! assert_eq!(dictionary.resolve("glass"), None);
//! ```

use crate::measurement_unit::MeasurementUnit;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use unic_langid::LanguageIdentifier;

/// Locale of the default dictionary
pub const DEFAULT_LOCALE: &str = "pl";

/// Polish aliases, English ones included since scraped Polish pages mix both
static POLISH_ALIASES: LazyLock<HashMap<&'static str, MeasurementUnit>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert("ml", MeasurementUnit::Milliliters);
    map.insert("mililitr", MeasurementUnit::Milliliters);
    map.insert("mililitry", MeasurementUnit::Milliliters);
    map.insert("mililitrów", MeasurementUnit::Milliliters);

    map.insert("l", MeasurementUnit::Liters);
    map.insert("litr", MeasurementUnit::Liters);
    map.insert("litry", MeasurementUnit::Liters);
    map.insert("litrów", MeasurementUnit::Liters);

    map.insert("g", MeasurementUnit::Grams);
    map.insert("gram", MeasurementUnit::Grams);
    map.insert("gramy", MeasurementUnit::Grams);
    map.insert("gramów", MeasurementUnit::Grams);

    map.insert("filiżanka", MeasurementUnit::Cups);
    map.insert("filiżanki", MeasurementUnit::Cups);
    map.insert("filiżanek", MeasurementUnit::Cups);
    map.insert("cup", MeasurementUnit::Cups);
    map.insert("cups", MeasurementUnit::Cups);

    map.insert("łyżeczka", MeasurementUnit::Teaspoons);
    map.insert("łyżeczki", MeasurementUnit::Teaspoons);
    map.insert("łyżeczek", MeasurementUnit::Teaspoons);
    map.insert("tea spoon", MeasurementUnit::Teaspoons);
    map.insert("teaspoon", MeasurementUnit::Teaspoons);
    map.insert("tea spoons", MeasurementUnit::Teaspoons);
    map.insert("teaspoons", MeasurementUnit::Teaspoons);

    map.insert("łyżka", MeasurementUnit::Tablespoons);
    map.insert("łyżki", MeasurementUnit::Tablespoons);
    map.insert("łyżek", MeasurementUnit::Tablespoons);
    map.insert("łyżka stołowa", MeasurementUnit::Tablespoons);
    map.insert("łyżki stołowe", MeasurementUnit::Tablespoons);
    map.insert("łyżek stołowych", MeasurementUnit::Tablespoons);
    map.insert("table spoon", MeasurementUnit::Tablespoons);
    map.insert("tablespoon", MeasurementUnit::Tablespoons);
    map.insert("table spoons", MeasurementUnit::Tablespoons);
    map.insert("tablespoons", MeasurementUnit::Tablespoons);

    map.insert("oz", MeasurementUnit::Ounces);
    map.insert("lb", MeasurementUnit::Pounds);

    map
});

static ENGLISH_ALIASES: LazyLock<HashMap<&'static str, MeasurementUnit>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Volume units
    map.insert("ml", MeasurementUnit::Milliliters);
    map.insert("milliliter", MeasurementUnit::Milliliters);
    map.insert("milliliters", MeasurementUnit::Milliliters);
    map.insert("millilitre", MeasurementUnit::Milliliters);
    map.insert("millilitres", MeasurementUnit::Milliliters);
    map.insert("l", MeasurementUnit::Liters);
    map.insert("liter", MeasurementUnit::Liters);
    map.insert("liters", MeasurementUnit::Liters);
    map.insert("litre", MeasurementUnit::Liters);
    map.insert("litres", MeasurementUnit::Liters);
    map.insert("cup", MeasurementUnit::Cups);
    map.insert("cups", MeasurementUnit::Cups);
    map.insert("tsp", MeasurementUnit::Teaspoons);
    map.insert("tea spoon", MeasurementUnit::Teaspoons);
    map.insert("tea spoons", MeasurementUnit::Teaspoons);
    map.insert("teaspoon", MeasurementUnit::Teaspoons);
    map.insert("teaspoons", MeasurementUnit::Teaspoons);
    map.insert("tbsp", MeasurementUnit::Tablespoons);
    map.insert("table spoon", MeasurementUnit::Tablespoons);
    map.insert("table spoons", MeasurementUnit::Tablespoons);
    map.insert("tablespoon", MeasurementUnit::Tablespoons);
    map.insert("tablespoons", MeasurementUnit::Tablespoons);

    // Weight units
    map.insert("g", MeasurementUnit::Grams);
    map.insert("gram", MeasurementUnit::Grams);
    map.insert("grams", MeasurementUnit::Grams);
    map.insert("oz", MeasurementUnit::Ounces);
    map.insert("ounce", MeasurementUnit::Ounces);
    map.insert("ounces", MeasurementUnit::Ounces);
    map.insert("lb", MeasurementUnit::Pounds);
    map.insert("lbs", MeasurementUnit::Pounds);
    map.insert("pound", MeasurementUnit::Pounds);
    map.insert("pounds", MeasurementUnit::Pounds);

    map
});

/// Resolves a raw unit token into a [`MeasurementUnit`]
pub trait UnitDictionary: Send + Sync {
    /// Look up a unit token.
    ///
    /// Returns `None` when the token is not recognised; callers decide what
    /// to do with the unmatched token.
    fn resolve(&self, raw_unit: &str) -> Option<MeasurementUnit>;
}

/// Table-backed dictionary built once at startup
#[derive(Debug, Clone)]
pub struct StaticUnitDictionary {
    locale: LanguageIdentifier,
    aliases: HashMap<String, MeasurementUnit>,
}

impl StaticUnitDictionary {
    /// Empty dictionary for the given locale
    pub fn new(locale: LanguageIdentifier) -> Self {
        Self {
            locale,
            aliases: HashMap::new(),
        }
    }

    /// Built-in Polish dictionary (also understands the common English aliases)
    pub fn polish() -> Self {
        Self::from_table("pl", &POLISH_ALIASES)
    }

    /// Built-in English dictionary
    pub fn english() -> Self {
        Self::from_table("en", &ENGLISH_ALIASES)
    }

    /// Built-in dictionary for a locale, matched on the language subtag.
    ///
    /// Unsupported locales fall back to the Polish dictionary.
    pub fn for_locale(locale: &LanguageIdentifier) -> Self {
        match locale.language.as_str() {
            "pl" => Self::polish(),
            "en" => Self::english(),
            other => {
                warn!(
                    "No unit dictionary for locale '{}', falling back to '{}'",
                    other, DEFAULT_LOCALE
                );
                Self::polish()
            }
        }
    }

    fn from_table(locale: &str, table: &HashMap<&'static str, MeasurementUnit>) -> Self {
        let locale = locale
            .parse()
            .unwrap_or_else(|_| LanguageIdentifier::default());
        let aliases = table
            .iter()
            .map(|(alias, unit)| (alias.to_string(), *unit))
            .collect();
        Self { locale, aliases }
    }

    /// Add an alias, replacing any previous mapping for the same key
    pub fn with_alias(mut self, alias: &str, unit: MeasurementUnit) -> Self {
        let key = normalize(alias);
        if let Some(previous) = self.aliases.insert(key.clone(), unit) {
            if previous != unit {
                debug!("Alias '{}' remapped from {} to {}", key, previous, unit);
            }
        }
        self
    }

    /// Extend the dictionary from a JSON file mapping aliases to unit ids.
    ///
    /// ```json
    /// { "szklanka": "CUPS", "szczypta": "TEASPOONS" }
    /// ```
    pub fn load_aliases_file(self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read unit alias file {}", path.display()))?;
        let raw: HashMap<String, String> = serde_json::from_str(&content)
            .with_context(|| format!("Invalid unit alias file {}", path.display()))?;

        let mut dictionary = self;
        for (alias, unit_id) in raw {
            let unit = MeasurementUnit::from_id(&unit_id).ok_or_else(|| {
                anyhow::anyhow!("Unknown measurement unit '{}' for alias '{}'", unit_id, alias)
            })?;
            dictionary = dictionary.with_alias(&alias, unit);
        }

        info!(
            "Loaded unit aliases from {}, dictionary now has {} entries",
            path.display(),
            dictionary.len()
        );
        Ok(dictionary)
    }

    /// Locale the dictionary was built for
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    /// Number of aliases
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Whether the dictionary has no aliases
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for StaticUnitDictionary {
    fn default() -> Self {
        Self::polish()
    }
}

impl UnitDictionary for StaticUnitDictionary {
    fn resolve(&self, raw_unit: &str) -> Option<MeasurementUnit> {
        self.aliases.get(&normalize(raw_unit)).copied()
    }
}

fn normalize(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// Shared handle on a dictionary, handed to the parser
#[derive(Clone)]
pub struct UnitDictionaryService {
    dictionary: Arc<dyn UnitDictionary>,
}

impl UnitDictionaryService {
    /// Wrap a dictionary for sharing
    pub fn new(dictionary: Arc<dyn UnitDictionary>) -> Self {
        Self { dictionary }
    }

    /// Resolve a raw unit token
    pub fn resolve_unit(&self, raw_unit: &str) -> Option<MeasurementUnit> {
        self.dictionary.resolve(raw_unit)
    }
}

impl Default for UnitDictionaryService {
    fn default() -> Self {
        Self::new(Arc::new(StaticUnitDictionary::default()))
    }
}

impl std::fmt::Debug for UnitDictionaryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitDictionaryService").finish_non_exhaustive()
    }
}
