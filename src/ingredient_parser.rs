//! # Ingredient Parser
//!
//! This module turns one free-text ingredient line, as scraped from a recipe
//! page, into a structured [`RecipeIngredient`]: quantity, optional unit and
//! ingredient name.
//!
//! ## Features
//!
//! - Decimal quantities with dot or comma separators ("1.5", "1,5")
//! - Simple fractions ("3/4") and mixed numbers ("1 1/2") in [`parse_quantity`]
//! - Localized unit tokens resolved through a [`UnitDictionary`](crate::unit_dictionary::UnitDictionary)
//! - Unknown unit tokens folded back into the ingredient name
//!
//! ## Limitations
//!
//! The line grammar allows a single whitespace boundary between quantity and
//! unit, so a mixed number such as "1 1/2 cup sugar" is only partially
//! matched: "1" becomes the quantity and "1/2 cup sugar" the name.
//!
//! ## Usage
//!
//! ```rust
//! use recipe_units::ingredient_parser::IngredientParser;
//! use recipe_units::measurement_unit::MeasurementUnit;
//!
//! let parser = IngredientParser::default();
//! let flour = parser.parse("3/4 cup flour").unwrap();
//!
//! assert_eq!(flour.ingredient_name, "flour");
//! assert_eq!(flour.unit, Some(MeasurementUnit::Cups));
//! assert_eq!(flour.quantity.value(), 0.75);
//! ```

use crate::ingredient_model::{IngredientList, RecipeIngredient};
use crate::measurement_patterns::{INGREDIENT_LINE_REGEX, SIGNED_QUANTITY_REGEX};
use crate::parser_config::{ParserConfig, UnmatchedLinePolicy};
use crate::quantity::Quantity;
use crate::unit_dictionary::UnitDictionaryService;
use log::{debug, trace, warn};
use std::sync::Arc;

/// Errors raised while reading a quantity string
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityParseError {
    /// A part of the quantity is not a number
    InvalidNumber(String),
    /// Wrong number of '/' or ' ' separated parts
    MalformedFraction(String),
    /// Fraction with a zero denominator
    DivisionByZero(String),
    /// The quantity evaluates to infinity or NaN
    NotFinite(String),
}

impl QuantityParseError {
    /// The offending quantity string
    pub fn input(&self) -> &str {
        match self {
            QuantityParseError::InvalidNumber(input)
            | QuantityParseError::MalformedFraction(input)
            | QuantityParseError::DivisionByZero(input)
            | QuantityParseError::NotFinite(input) => input,
        }
    }
}

impl std::fmt::Display for QuantityParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            QuantityParseError::InvalidNumber(_) => "invalid number",
            QuantityParseError::MalformedFraction(_) => "malformed fraction",
            QuantityParseError::DivisionByZero(_) => "division by zero",
            QuantityParseError::NotFinite(_) => "not a finite number",
        };
        write!(
            f,
            "Could not parse quantity from input: '{}' ({})",
            self.input(),
            reason
        )
    }
}

impl std::error::Error for QuantityParseError {}

/// Parse a quantity string.
///
/// Accepted shapes: plain decimal or integer ("2", "1.5"), simple fraction
/// ("3/4") and mixed number with a single space ("1 1/2"). Commas must already
/// be normalized to dots.
pub fn parse_quantity(input: &str) -> Result<f64, QuantityParseError> {
    let input = input.trim();

    let value = if input.contains('/') {
        let parts: Vec<&str> = input.split(' ').collect();
        match parts.as_slice() {
            [whole, fraction] => parse_number(whole, input)? + parse_fraction(fraction, input)?,
            [fraction] => parse_fraction(fraction, input)?,
            _ => return Err(QuantityParseError::MalformedFraction(input.to_string())),
        }
    } else {
        parse_number(input, input)?
    };

    if !value.is_finite() {
        return Err(QuantityParseError::NotFinite(input.to_string()));
    }

    Ok(value)
}

fn parse_number(part: &str, input: &str) -> Result<f64, QuantityParseError> {
    part.parse::<f64>()
        .map_err(|_| QuantityParseError::InvalidNumber(input.to_string()))
}

fn parse_fraction(part: &str, input: &str) -> Result<f64, QuantityParseError> {
    let pieces: Vec<&str> = part.split('/').collect();
    let [numerator, denominator] = pieces.as_slice() else {
        return Err(QuantityParseError::MalformedFraction(input.to_string()));
    };

    let numerator = parse_number(numerator, input)?;
    let denominator = parse_number(denominator, input)?;
    if denominator == 0.0 {
        return Err(QuantityParseError::DivisionByZero(input.to_string()));
    }

    Ok(numerator / denominator)
}

/// Regex-based ingredient line parser.
///
/// Stateless apart from the shared dictionary; safe to use from many threads.
#[derive(Debug, Clone, Default)]
pub struct IngredientParser {
    dictionary: UnitDictionaryService,
    line_policy: UnmatchedLinePolicy,
}

impl IngredientParser {
    /// Create a parser backed by the given dictionary, using the lenient policy
    pub fn new(dictionary: UnitDictionaryService) -> Self {
        Self {
            dictionary,
            line_policy: UnmatchedLinePolicy::default(),
        }
    }

    /// Set the policy for lines that do not start with a quantity
    pub fn with_policy(mut self, line_policy: UnmatchedLinePolicy) -> Self {
        self.line_policy = line_policy;
        self
    }

    /// Create a parser from configuration, building its dictionary
    pub fn from_config(config: &ParserConfig) -> anyhow::Result<Self> {
        let dictionary = config.build_dictionary()?;
        debug!(
            "Creating IngredientParser: locale={}, policy={}, aliases={}",
            dictionary.locale(),
            config.line_policy,
            dictionary.len()
        );
        Ok(Self::new(UnitDictionaryService::new(Arc::new(dictionary))).with_policy(config.line_policy))
    }

    /// Active policy for unmatched lines
    pub fn line_policy(&self) -> UnmatchedLinePolicy {
        self.line_policy
    }

    /// Parse a single ingredient line.
    ///
    /// Returns `None` when the line has to be skipped: invalid, signed or
    /// non-positive quantity, blank name, or (under the strict policy) no
    /// leading quantity.
    pub fn parse(&self, line: &str) -> Option<RecipeIngredient> {
        let line = line.trim();

        let Some(captures) = INGREDIENT_LINE_REGEX.captures(line) else {
            return self.parse_unmatched(line);
        };

        let quantity_str = captures
            .name("qty")
            .map(|m| m.as_str().replace(',', ".").trim().to_string())
            .unwrap_or_default();

        let quantity = match parse_quantity(&quantity_str) {
            Ok(quantity) => quantity,
            Err(e) => {
                warn!(
                    "Failed to parse quantity in ingredient line: '{}'. Error: {}",
                    line, e
                );
                return None;
            }
        };

        if quantity <= 0.0 {
            warn!("Quantity must be positive. Line: '{}'", line);
            return None;
        }

        let unit_token = captures.name("unit").map(|m| m.as_str().trim());
        let unit = unit_token.and_then(|token| self.dictionary.resolve_unit(&token.to_lowercase()));

        let mut ingredient_name = captures
            .name("name")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        if let (None, Some(token)) = (unit, unit_token) {
            debug!("Unknown unit '{}' folded into ingredient name", token);
            ingredient_name = format!("{} {}", token, ingredient_name);
        }

        match RecipeIngredient::of(&ingredient_name, unit, Quantity::of(quantity)) {
            Some(ingredient) => {
                trace!("Parsed ingredient line '{}' -> {:?}", line, ingredient);
                Some(ingredient)
            }
            None => {
                warn!("Missing ingredient name after parsing: '{}'", line);
                None
            }
        }
    }

    fn parse_unmatched(&self, line: &str) -> Option<RecipeIngredient> {
        // Signed quantities are rejected under every policy
        if SIGNED_QUANTITY_REGEX.is_match(line) {
            warn!("Quantity must be positive. Line: '{}'", line);
            return None;
        }

        warn!("Ingredient line did not match pattern: '{}'", line);
        match self.line_policy {
            UnmatchedLinePolicy::Lenient => RecipeIngredient::of(line, None, Quantity::of(1.0)),
            UnmatchedLinePolicy::Strict => None,
        }
    }

    /// Parse a batch of lines, skipping the ones that fail.
    ///
    /// Blank lines are ignored; every other rejected line is logged and kept
    /// in [`IngredientList::skipped_lines`].
    pub fn parse_lines<I, S>(&self, lines: I) -> IngredientList
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = IngredientList::new();

        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            match self.parse(line) {
                Some(ingredient) => list.add_ingredient(ingredient),
                None => {
                    warn!("Could not parse ingredient line: '{}'", line);
                    list.add_skipped_line(line.to_string());
                }
            }
        }

        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement_unit::MeasurementUnit;

    #[test]
    fn test_parse_quantity_shapes() {
        assert_eq!(parse_quantity("2"), Ok(2.0));
        assert_eq!(parse_quantity("1.5"), Ok(1.5));
        assert_eq!(parse_quantity("3/4"), Ok(0.75));
        assert_eq!(parse_quantity("1 1/2"), Ok(1.5));
        assert_eq!(parse_quantity(" 2 1/4 "), Ok(2.25));
    }

    #[test]
    fn test_parse_quantity_errors() {
        assert_eq!(
            parse_quantity("1..2"),
            Err(QuantityParseError::InvalidNumber("1..2".to_string()))
        );
        assert_eq!(
            parse_quantity("1/2/3"),
            Err(QuantityParseError::MalformedFraction("1/2/3".to_string()))
        );
        assert_eq!(
            parse_quantity("1 2 3/4"),
            Err(QuantityParseError::MalformedFraction("1 2 3/4".to_string()))
        );
        assert_eq!(
            parse_quantity("1/0"),
            Err(QuantityParseError::DivisionByZero("1/0".to_string()))
        );
        assert_eq!(
            parse_quantity("/"),
            Err(QuantityParseError::InvalidNumber("/".to_string()))
        );
        assert!(matches!(parse_quantity("nan"), Err(QuantityParseError::NotFinite(_))));
    }

    #[test]
    fn test_error_message_carries_input() {
        let err = parse_quantity("1,2.3").unwrap_err();
        assert_eq!(err.input(), "1,2.3");
        assert!(err.to_string().contains("'1,2.3'"));
    }

    #[test]
    fn test_parse_simple_ingredient() {
        let parser = IngredientParser::default();

        let result = parser.parse("200 g mąki").unwrap();
        assert_eq!(result.ingredient_name, "mąki");
        assert_eq!(result.unit, Some(MeasurementUnit::Grams));
        assert_eq!(result.quantity, Quantity::of(200.0));
    }

    #[test]
    fn test_comma_decimal_separator() {
        let parser = IngredientParser::default();

        let result = parser.parse("1,5 tablespoons sugar").unwrap();
        assert_eq!(result.quantity.value(), 1.5);
        assert_eq!(result.unit, Some(MeasurementUnit::Tablespoons));
        assert_eq!(result.ingredient_name, "sugar");
    }

    #[test]
    fn test_strict_policy_rejects_unmatched_lines() {
        let parser = IngredientParser::default().with_policy(UnmatchedLinePolicy::Strict);

        assert!(parser.parse("sugar").is_none());
        assert!(parser.parse("2 cups flour").is_some());
    }

    #[test]
    fn test_signed_quantity_is_never_kept_as_name() {
        for policy in [UnmatchedLinePolicy::Lenient, UnmatchedLinePolicy::Strict] {
            let parser = IngredientParser::default().with_policy(policy);
            assert!(parser.parse("-2 g salt").is_none());
            assert!(parser.parse("-0.5 cup milk").is_none());
        }
    }
}
