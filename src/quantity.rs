//! # Quantity and Quantity Formats
//!
//! A [`Quantity`] pairs a numeric amount with the [`QuantityFormat`] used to
//! display it. Formats are pure strategies: integer, decimal (at most two
//! fraction digits) or common cooking fractions.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_units::quantity::{Quantity, QuantityFormat};
//!
//! assert_eq!(Quantity::of(2.0).format(), QuantityFormat::Integer);
//! assert_eq!(Quantity::of(1.25).formatted_value(), "1.25");
//! assert_eq!(Quantity::new(1.5, QuantityFormat::Fraction).formatted_value(), "1 1/2");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance from an integer under which a value counts as whole
const WHOLE_NUMBER_EPSILON: f64 = 0.000001;

/// Fractional parts below this are dropped by the fraction format
const FRACTION_ZERO_THRESHOLD: f64 = 0.001;

/// Tolerance when matching a fractional part against a cooking fraction
const FRACTION_TOLERANCE: f64 = 0.01;

/// Cooking fractions recognised by [`QuantityFormat::Fraction`]
const COMMON_FRACTIONS: [(f64, &str); 5] = [
    (0.25, "1/4"),
    (0.33, "1/3"),
    (0.5, "1/2"),
    (0.66, "2/3"),
    (0.75, "3/4"),
];

/// Display strategy for a quantity value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuantityFormat {
    /// Whole numbers ("2")
    Integer,
    /// Up to two fraction digits, trailing zeros trimmed ("1.5", "2.33")
    Decimal,
    /// Common cooking fractions ("1 1/2", "3/4"), decimal fallback
    Fraction,
}

impl QuantityFormat {
    /// Render a value using this format
    pub fn format(&self, value: f64) -> String {
        match self {
            QuantityFormat::Integer => format_integer(value),
            QuantityFormat::Decimal => format_decimal(value),
            QuantityFormat::Fraction => format_fraction(value),
        }
    }

    /// Identity name of the format ("INTEGER", "DECIMAL", "FRACTION")
    pub fn name(&self) -> &'static str {
        match self {
            QuantityFormat::Integer => "INTEGER",
            QuantityFormat::Decimal => "DECIMAL",
            QuantityFormat::Fraction => "FRACTION",
        }
    }

    /// Case-insensitive lookup by identity name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "INTEGER" => Some(QuantityFormat::Integer),
            "DECIMAL" => Some(QuantityFormat::Decimal),
            "FRACTION" => Some(QuantityFormat::Fraction),
            _ => None,
        }
    }
}

/// Drops the fractional part. Values within `WHOLE_NUMBER_EPSILON` of an
/// integer snap to it first, so float noise (2.9999999) does not lose a unit.
fn format_integer(value: f64) -> String {
    let nearest = value.round();
    let whole = if (value - nearest).abs() < WHOLE_NUMBER_EPSILON {
        nearest
    } else {
        value.trunc()
    };
    format!("{}", whole as i64)
}

/// Two fraction digits at most, trailing zeros and dot trimmed. Values below
/// one keep their leading zero ("0.5", not ".5").
fn format_decimal(value: f64) -> String {
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Best-effort fraction rendering.
///
/// Only the fractions in `COMMON_FRACTIONS` are recognised, each within a
/// ±0.01 band, so the output is lossy: 0.34 renders as "1/3". Anything else
/// falls back to the decimal format of the whole value.
fn format_fraction(value: f64) -> String {
    let floor = value.floor();
    let fractional = value - floor;
    let whole = floor as i64;

    if fractional.abs() < FRACTION_ZERO_THRESHOLD {
        return whole.to_string();
    }

    for (target, label) in COMMON_FRACTIONS {
        if (fractional - target).abs() < FRACTION_TOLERANCE {
            return if whole > 0 {
                format!("{} {}", whole, label)
            } else {
                label.to_string()
            };
        }
    }

    format_decimal(value)
}

/// Immutable numeric amount with its display format
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuantityRepr")]
pub struct Quantity {
    value: f64,
    format: QuantityFormat,
}

/// Wire shape accepted on input; `format` is optional
#[derive(Deserialize)]
struct QuantityRepr {
    value: f64,
    #[serde(default)]
    format: Option<QuantityFormat>,
}

impl From<QuantityRepr> for Quantity {
    fn from(repr: QuantityRepr) -> Self {
        Quantity::with_format(repr.value, repr.format)
    }
}

impl Quantity {
    /// Create a quantity, picking INTEGER for whole values and DECIMAL otherwise
    pub fn of(value: f64) -> Self {
        Self {
            value,
            format: Self::default_format(value),
        }
    }

    /// Create a quantity with an explicit format
    pub fn new(value: f64, format: QuantityFormat) -> Self {
        Self { value, format }
    }

    /// Create a quantity, applying the default-format rule when `format` is absent
    pub fn with_format(value: f64, format: Option<QuantityFormat>) -> Self {
        match format {
            Some(format) => Self::new(value, format),
            None => Self::of(value),
        }
    }

    /// Default format for a value
    pub fn default_format(value: f64) -> QuantityFormat {
        if (value - value.round()).abs() < WHOLE_NUMBER_EPSILON {
            QuantityFormat::Integer
        } else {
            QuantityFormat::Decimal
        }
    }

    /// Numeric amount
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Display format
    pub fn format(&self) -> QuantityFormat {
        self.format
    }

    /// Value rendered with the held format
    pub fn formatted_value(&self) -> String {
        self.format.format(self.value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_format() {
        let fraction = QuantityFormat::Fraction;

        assert_eq!(fraction.format(1.5), "1 1/2");
        assert_eq!(fraction.format(0.5), "1/2");
        assert_eq!(fraction.format(0.333), "1/3");
        assert_eq!(fraction.format(2.0), "2");
        assert_eq!(fraction.format(0.25), "1/4");
        assert_eq!(fraction.format(2.0 / 3.0), "2/3");
        assert_eq!(fraction.format(3.75), "3 3/4");
        assert_eq!(fraction.format(1.0 / 3.0 + 1.0), "1 1/3");
    }

    #[test]
    fn test_fraction_format_falls_back_to_decimal() {
        let fraction = QuantityFormat::Fraction;

        assert_eq!(fraction.format(0.1), "0.1");
        assert_eq!(fraction.format(2.4), "2.4");
        assert_eq!(fraction.format(1.1), "1.1");
    }

    #[test]
    fn test_fraction_format_drops_tiny_remainders() {
        assert_eq!(QuantityFormat::Fraction.format(3.0004), "3");
        assert_eq!(QuantityFormat::Fraction.format(0.0), "0");
    }

    #[test]
    fn test_decimal_format() {
        let decimal = QuantityFormat::Decimal;

        assert_eq!(decimal.format(2.0), "2");
        assert_eq!(decimal.format(1.5), "1.5");
        assert_eq!(decimal.format(2.333), "2.33");
        assert_eq!(decimal.format(0.5), "0.5");
        assert_eq!(decimal.format(100.0), "100");
        assert_eq!(decimal.format(0.004), "0");
    }

    #[test]
    fn test_integer_format() {
        assert_eq!(QuantityFormat::Integer.format(3.0), "3");
        assert_eq!(QuantityFormat::Integer.format(2.9999999), "3");
        assert_eq!(QuantityFormat::Integer.format(250.0), "250");
    }

    #[test]
    fn test_integer_format_truncates() {
        assert_eq!(QuantityFormat::Integer.format(236.59), "236");
        assert_eq!(QuantityFormat::Integer.format(8.8175), "8");
        assert_eq!(QuantityFormat::Integer.format(0.9), "0");
        assert_eq!(QuantityFormat::Integer.format(-1.5), "-1");
    }

    #[test]
    fn test_default_format_rule() {
        assert_eq!(Quantity::of(3.0).format(), QuantityFormat::Integer);
        assert_eq!(Quantity::of(3.0000001).format(), QuantityFormat::Integer);
        assert_eq!(Quantity::of(3.001).format(), QuantityFormat::Decimal);
        assert_eq!(Quantity::of(0.75).format(), QuantityFormat::Decimal);
        assert_eq!(
            Quantity::with_format(0.75, None),
            Quantity::new(0.75, QuantityFormat::Decimal)
        );
    }

    #[test]
    fn test_quantity_equality_is_by_value_and_format() {
        assert_eq!(Quantity::of(1.5), Quantity::new(1.5, QuantityFormat::Decimal));
        assert_ne!(Quantity::of(1.5), Quantity::new(1.5, QuantityFormat::Fraction));
    }

    #[test]
    fn test_display_uses_formatted_value() {
        let qty = Quantity::new(0.75, QuantityFormat::Fraction);
        assert_eq!(qty.to_string(), "3/4");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(QuantityFormat::from_name("fraction"), Some(QuantityFormat::Fraction));
        assert_eq!(QuantityFormat::from_name("DECIMAL"), Some(QuantityFormat::Decimal));
        assert_eq!(QuantityFormat::from_name("roman"), None);
        assert_eq!(QuantityFormat::Integer.name(), "INTEGER");
    }

    #[test]
    fn test_deserialize_without_format_applies_default() {
        let qty: Quantity = serde_json::from_str(r#"{"value": 2.0}"#).unwrap();
        assert_eq!(qty.format(), QuantityFormat::Integer);

        let qty: Quantity = serde_json::from_str(r#"{"value": 0.5, "format": "FRACTION"}"#).unwrap();
        assert_eq!(qty.formatted_value(), "1/2");
    }
}
