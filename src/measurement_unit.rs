//! # Measurement Unit Catalog
//!
//! This module defines the closed set of measurement units understood by the
//! parser and the conversion service, together with the measurement system
//! each unit belongs to.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_units::measurement_unit::{MeasurementSystem, MeasurementUnit};
//!
//! let unit = MeasurementUnit::from_id("cups").unwrap();
//! assert_eq!(unit, MeasurementUnit::Cups);
//! assert_eq!(unit.symbol(), "cup");
//! assert_eq!(unit.system(), MeasurementSystem::Imperial);
//! assert!(unit.is_fractional());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement system grouping of units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasurementSystem {
    /// Metric units (ml, l, g)
    Metric,
    /// Imperial / US customary units (cups, spoons, oz, lb)
    Imperial,
}

impl MeasurementSystem {
    /// Identity name as exposed to API clients ("METRIC", "IMPERIAL")
    pub fn name(&self) -> &'static str {
        match self {
            MeasurementSystem::Metric => "METRIC",
            MeasurementSystem::Imperial => "IMPERIAL",
        }
    }

    /// Case-insensitive lookup by identity name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "METRIC" => Some(MeasurementSystem::Metric),
            "IMPERIAL" => Some(MeasurementSystem::Imperial),
            _ => None,
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supported measurement units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasurementUnit {
    // Metric units
    /// Milliliters
    Milliliters,
    /// Liters
    Liters,
    /// Grams
    Grams,

    // Imperial units
    /// Cups
    Cups,
    /// Teaspoons
    Teaspoons,
    /// Tablespoons
    Tablespoons,
    /// Ounces
    Ounces,
    /// Pounds
    Pounds,
}

impl MeasurementUnit {
    /// Every unit, in catalog order
    pub const ALL: [MeasurementUnit; 8] = [
        MeasurementUnit::Milliliters,
        MeasurementUnit::Liters,
        MeasurementUnit::Grams,
        MeasurementUnit::Cups,
        MeasurementUnit::Teaspoons,
        MeasurementUnit::Tablespoons,
        MeasurementUnit::Ounces,
        MeasurementUnit::Pounds,
    ];

    /// Identity name of the unit (e.g. "MILLILITERS")
    pub fn id(&self) -> &'static str {
        match self {
            MeasurementUnit::Milliliters => "MILLILITERS",
            MeasurementUnit::Liters => "LITERS",
            MeasurementUnit::Grams => "GRAMS",
            MeasurementUnit::Cups => "CUPS",
            MeasurementUnit::Teaspoons => "TEASPOONS",
            MeasurementUnit::Tablespoons => "TABLESPOONS",
            MeasurementUnit::Ounces => "OUNCES",
            MeasurementUnit::Pounds => "POUNDS",
        }
    }

    /// Short symbol used when rendering quantities
    pub fn symbol(&self) -> &'static str {
        match self {
            MeasurementUnit::Milliliters => "ml",
            MeasurementUnit::Liters => "l",
            MeasurementUnit::Grams => "g",
            MeasurementUnit::Cups => "cup",
            MeasurementUnit::Teaspoons => "tea spoon",
            MeasurementUnit::Tablespoons => "table spoon",
            MeasurementUnit::Ounces => "oz",
            MeasurementUnit::Pounds => "lb",
        }
    }

    /// Human-readable name of the unit
    pub fn display_name(&self) -> &'static str {
        match self {
            MeasurementUnit::Milliliters => "Milliliter",
            MeasurementUnit::Liters => "Liter",
            MeasurementUnit::Grams => "Gram",
            MeasurementUnit::Cups => "Cup",
            MeasurementUnit::Teaspoons => "Tea Spoon",
            MeasurementUnit::Tablespoons => "Table Spoon",
            MeasurementUnit::Ounces => "Ounce",
            MeasurementUnit::Pounds => "Pound",
        }
    }

    /// Measurement system this unit belongs to
    pub fn system(&self) -> MeasurementSystem {
        match self {
            MeasurementUnit::Milliliters | MeasurementUnit::Liters | MeasurementUnit::Grams => {
                MeasurementSystem::Metric
            }
            MeasurementUnit::Cups
            | MeasurementUnit::Teaspoons
            | MeasurementUnit::Tablespoons
            | MeasurementUnit::Ounces
            | MeasurementUnit::Pounds => MeasurementSystem::Imperial,
        }
    }

    /// Whether quantities in this unit are conventionally shown as fractions
    pub fn is_fractional(&self) -> bool {
        matches!(
            self,
            MeasurementUnit::Cups | MeasurementUnit::Teaspoons | MeasurementUnit::Tablespoons
        )
    }

    /// Case-insensitive lookup by identity name ("cups", "CUPS").
    ///
    /// Short symbols are not accepted here; use a
    /// [`UnitDictionary`](crate::unit_dictionary::UnitDictionary) for free text.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_uppercase();
        Self::ALL.iter().copied().find(|unit| unit.id() == id)
    }

    /// All units belonging to the given system, in catalog order
    pub fn by_system(system: MeasurementSystem) -> Vec<MeasurementUnit> {
        Self::ALL
            .iter()
            .copied()
            .filter(|unit| unit.system() == system)
            .collect()
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
