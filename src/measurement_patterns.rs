//! # Measurement Patterns Module
//!
//! This module contains the regex used to split an ingredient line into
//! quantity, unit and name.

use lazy_static::lazy_static;
use regex::Regex;

// Quantity (digits, comma, dot, slash), optional letter-only unit, then the name.
// `\p{L}` keeps diacritics ("łyżka") in the unit capture.
pub const INGREDIENT_LINE_PATTERN: &str =
    r"^(?P<qty>[\d,./]+)\s*(?P<unit>\p{L}+)?\s+(?P<name>.+)$";

// A quantity preceded by a sign ("-2 g salt", "+0.5 cup milk")
pub const SIGNED_QUANTITY_PATTERN: &str = r"^[+-][\d,./]*\d";

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref INGREDIENT_LINE_REGEX: Regex = Regex::new(INGREDIENT_LINE_PATTERN)
        .expect("Ingredient line pattern should be valid");
    pub static ref SIGNED_QUANTITY_REGEX: Regex = Regex::new(SIGNED_QUANTITY_PATTERN)
        .expect("Signed quantity pattern should be valid");
}
