//! # Unit Conversion
//!
//! Sparse table of conversion factors keyed by ordered unit pairs. The table is
//! neither symmetric nor transitive: every supported direction is registered
//! on its own, and a missing pair means the conversion is unsupported.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_units::conversion::ConversionService;
//! use recipe_units::measurement_unit::MeasurementUnit;
//! use recipe_units::quantity::{Quantity, QuantityFormat};
//!
//! let conversions = ConversionService::default();
//! let cups = conversions
//!     .convert(Quantity::of(8.0), MeasurementUnit::Tablespoons, MeasurementUnit::Cups)
//!     .unwrap();
//!
//! assert_eq!(cups.format(), QuantityFormat::Fraction);
//! assert_eq!(cups.formatted_value(), "1/2");
//! ```

use crate::measurement_unit::MeasurementUnit;
use crate::quantity::{Quantity, QuantityFormat};
use log::{debug, trace};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// Ordered (source, target) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitPair {
    pub from: MeasurementUnit,
    pub to: MeasurementUnit,
}

impl UnitPair {
    pub fn new(from: MeasurementUnit, to: MeasurementUnit) -> Self {
        Self { from, to }
    }
}

/// Built-in factors, US customary measures
static DEFAULT_FACTORS: LazyLock<Arc<HashMap<UnitPair, f64>>> = LazyLock::new(|| {
    use MeasurementUnit::*;

    let mut map = HashMap::new();

    // Metric volume
    map.insert(UnitPair::new(Milliliters, Liters), 0.001);
    map.insert(UnitPair::new(Liters, Milliliters), 1000.0);

    // Imperial volume
    map.insert(UnitPair::new(Teaspoons, Tablespoons), 0.333);
    map.insert(UnitPair::new(Tablespoons, Teaspoons), 3.0);
    map.insert(UnitPair::new(Tablespoons, Cups), 0.0625);
    map.insert(UnitPair::new(Cups, Tablespoons), 16.0);
    map.insert(UnitPair::new(Cups, Teaspoons), 48.0);

    // Imperial weight
    map.insert(UnitPair::new(Ounces, Pounds), 0.0625);
    map.insert(UnitPair::new(Pounds, Ounces), 16.0);

    // Volume across systems
    map.insert(UnitPair::new(Milliliters, Cups), 0.00423);
    map.insert(UnitPair::new(Cups, Milliliters), 236.59);
    map.insert(UnitPair::new(Milliliters, Tablespoons), 0.0676);
    map.insert(UnitPair::new(Tablespoons, Milliliters), 14.79);
    map.insert(UnitPair::new(Milliliters, Teaspoons), 0.202);
    map.insert(UnitPair::new(Teaspoons, Milliliters), 4.93);

    // Weight across systems
    map.insert(UnitPair::new(Grams, Ounces), 0.03527);
    map.insert(UnitPair::new(Ounces, Grams), 28.35);
    map.insert(UnitPair::new(Grams, Pounds), 0.00220);
    map.insert(UnitPair::new(Pounds, Grams), 453.59);

    Arc::new(map)
});

/// Conversion failures
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// No factor registered for the pair
    Unsupported {
        from: MeasurementUnit,
        to: MeasurementUnit,
    },
    /// Factor rejected while building a table
    InvalidFactor {
        from: MeasurementUnit,
        to: MeasurementUnit,
        factor: f64,
    },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::Unsupported { from, to } => write!(
                f,
                "Conversion from {} to {} is not supported",
                from.display_name(),
                to.display_name()
            ),
            ConversionError::InvalidFactor { from, to, factor } => write!(
                f,
                "Invalid conversion factor {} from {} to {}: factors must be positive and finite",
                factor,
                from.display_name(),
                to.display_name()
            ),
        }
    }
}

impl std::error::Error for ConversionError {}

/// Converts quantities between units using a read-only factor table
#[derive(Debug, Clone)]
pub struct ConversionService {
    factors: Arc<HashMap<UnitPair, f64>>,
}

impl Default for ConversionService {
    fn default() -> Self {
        Self {
            factors: Arc::clone(&*DEFAULT_FACTORS),
        }
    }
}

impl ConversionService {
    /// Start an empty custom table
    pub fn builder() -> ConversionServiceBuilder {
        ConversionServiceBuilder::default()
    }

    /// Convert a quantity from one unit to another.
    ///
    /// Same-unit conversions return the input untouched. The result uses the
    /// FRACTION format when the target unit is displayed in fractions, else the
    /// source format.
    pub fn convert(
        &self,
        quantity: Quantity,
        from: MeasurementUnit,
        to: MeasurementUnit,
    ) -> Result<Quantity, ConversionError> {
        if from == to {
            return Ok(quantity);
        }

        let factor = self
            .factor(from, to)
            .ok_or(ConversionError::Unsupported { from, to })?;

        let value = quantity.value() * factor;
        let format = if to.is_fractional() {
            QuantityFormat::Fraction
        } else {
            quantity.format()
        };

        trace!(
            "Converted {} {} -> {} {} (factor {})",
            quantity.value(),
            from,
            value,
            to,
            factor
        );
        Ok(Quantity::new(value, format))
    }

    /// Whether a factor is registered for the pair (always true for `from == to`)
    pub fn can_convert(&self, from: MeasurementUnit, to: MeasurementUnit) -> bool {
        from == to || self.factors.contains_key(&UnitPair::new(from, to))
    }

    /// Registered factor for a pair
    pub fn factor(&self, from: MeasurementUnit, to: MeasurementUnit) -> Option<f64> {
        self.factors.get(&UnitPair::new(from, to)).copied()
    }

    /// Units reachable from `from` in one step, `from` included, in catalog order
    pub fn compatible_units(&self, from: MeasurementUnit) -> Vec<MeasurementUnit> {
        MeasurementUnit::ALL
            .into_iter()
            .filter(|to| self.can_convert(from, *to))
            .collect()
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Builder for custom conversion tables
#[derive(Debug, Clone, Default)]
pub struct ConversionServiceBuilder {
    factors: HashMap<UnitPair, f64>,
}

impl ConversionServiceBuilder {
    /// Start from the built-in table
    pub fn with_defaults(mut self) -> Self {
        self.factors
            .extend(DEFAULT_FACTORS.iter().map(|(pair, factor)| (*pair, *factor)));
        self
    }

    /// Register a factor for one direction
    pub fn with_factor(
        mut self,
        from: MeasurementUnit,
        to: MeasurementUnit,
        factor: f64,
    ) -> Result<Self, ConversionError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConversionError::InvalidFactor { from, to, factor });
        }
        if from == to {
            debug!("Ignoring identity factor for {}", from);
            return Ok(self);
        }
        self.factors.insert(UnitPair::new(from, to), factor);
        Ok(self)
    }

    pub fn build(self) -> ConversionService {
        ConversionService {
            factors: Arc::new(self.factors),
        }
    }
}
