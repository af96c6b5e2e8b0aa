//! # Recipe Units
//!
//! Ingredient-line parsing, quantity formatting and unit conversion for
//! recipe imports. Raw text lines scraped from recipe pages are split into
//! quantity, unit and name; quantities render as integers, decimals or common
//! cooking fractions; a sparse factor table converts between metric and
//! imperial units.

pub mod conversion;
pub mod conversion_api;
pub mod ingredient_integration;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod logging;
pub mod measurement_patterns;
pub mod measurement_unit;
pub mod parser_config;
pub mod quantity;
pub mod unit_dictionary;

pub use conversion::{ConversionError, ConversionService};
pub use ingredient_model::{IngredientList, RecipeIngredient};
pub use ingredient_parser::{parse_quantity, IngredientParser, QuantityParseError};
pub use measurement_unit::{MeasurementSystem, MeasurementUnit};
pub use quantity::{Quantity, QuantityFormat};
