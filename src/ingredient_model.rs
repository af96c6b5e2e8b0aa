//! # Ingredient Data Model
//!
//! This module defines the structures produced by the ingredient parser and
//! consumed by DTO-mapping and presentation code.
//!
//! ## Core Concepts
//!
//! - **RecipeIngredient**: a named ingredient with an optional unit and a quantity
//! - **IngredientList**: the result of parsing a batch of lines, including the
//!   lines that had to be skipped
//! - **RecipeIngredientResponse**: response shape carrying the formatted quantity
//!
//! ## Usage
//!
//! ```rust
//! use recipe_units::ingredient_model::RecipeIngredient;
//! use recipe_units::measurement_unit::MeasurementUnit;
//! use recipe_units::quantity::Quantity;
//!
//! let flour = RecipeIngredient::of(" Flour ", Some(MeasurementUnit::Grams), Quantity::of(250.0)).unwrap();
//! assert_eq!(flour.ingredient_name, "flour");
//! assert_eq!(flour.to_string(), "250 g flour");
//! ```

use crate::measurement_unit::MeasurementUnit;
use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    /// The name of the ingredient (e.g., "flour", "cukru", "glass sugar")
    pub ingredient_name: String,

    /// Resolved measurement unit, absent for unit-less lines ("2 eggs")
    pub unit: Option<MeasurementUnit>,

    /// Quantity with its display format
    pub quantity: Quantity,
}

impl RecipeIngredient {
    /// Canonical factory: trims and lower-cases the name.
    ///
    /// Returns `None` when the name is blank.
    pub fn of(name: &str, unit: Option<MeasurementUnit>, quantity: Quantity) -> Option<Self> {
        let ingredient_name = name.trim().to_lowercase();
        if ingredient_name.is_empty() {
            return None;
        }

        Some(Self {
            ingredient_name,
            unit,
            quantity,
        })
    }

    /// Copy of this ingredient with a different unit and quantity
    pub fn with_measure(&self, unit: Option<MeasurementUnit>, quantity: Quantity) -> Self {
        Self {
            ingredient_name: self.ingredient_name.clone(),
            unit,
            quantity,
        }
    }

    /// Markdown bullet in the recipe export layout ("* 2 cup flour")
    pub fn to_markdown_line(&self) -> String {
        format!("* {}", self)
    }
}

impl fmt::Display for RecipeIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quantity)?;
        if let Some(unit) = &self.unit {
            write!(f, " {}", unit.symbol())?;
        }
        write!(f, " {}", self.ingredient_name)
    }
}

/// Ingredient as returned to API clients, with the quantity pre-formatted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientResponse {
    pub ingredient_name: String,
    pub unit: Option<MeasurementUnit>,
    pub quantity: f64,
    pub formatted_quantity: String,
}

impl From<&RecipeIngredient> for RecipeIngredientResponse {
    fn from(ingredient: &RecipeIngredient) -> Self {
        Self {
            ingredient_name: ingredient.ingredient_name.clone(),
            unit: ingredient.unit,
            quantity: ingredient.quantity.value(),
            formatted_quantity: ingredient.quantity.formatted_value(),
        }
    }
}

/// Result of parsing a batch of ingredient lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientList {
    /// Parsed ingredients, in input order
    pub ingredients: Vec<RecipeIngredient>,

    /// Raw lines the parser rejected
    pub skipped_lines: Vec<String>,
}

impl IngredientList {
    /// Create a new empty ingredient list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parsed ingredient
    pub fn add_ingredient(&mut self, ingredient: RecipeIngredient) {
        self.ingredients.push(ingredient);
    }

    /// Record a rejected line
    pub fn add_skipped_line(&mut self, line: String) {
        self.skipped_lines.push(line);
    }

    /// Number of successfully parsed ingredients
    pub fn parsed_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Number of rejected lines
    pub fn skipped_count(&self) -> usize {
        self.skipped_lines.len()
    }

    /// Share of lines that parsed
    pub fn success_rate(&self) -> f32 {
        let total_lines = self.parsed_count() + self.skipped_count();
        if total_lines == 0 {
            return 1.0;
        }
        self.parsed_count() as f32 / total_lines as f32
    }

    /// Response shapes for every parsed ingredient
    pub fn to_responses(&self) -> Vec<RecipeIngredientResponse> {
        self.ingredients.iter().map(RecipeIngredientResponse::from).collect()
    }
}

impl fmt::Display for IngredientList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ingredient List ({} parsed, {} skipped):",
            self.parsed_count(),
            self.skipped_count()
        )?;

        for ingredient in &self.ingredients {
            writeln!(f, "  • {}", ingredient)?;
        }

        if !self.skipped_lines.is_empty() {
            writeln!(f, "Skipped:")?;
            for line in &self.skipped_lines {
                writeln!(f, "  ? {}", line)?;
            }
        }

        Ok(())
    }
}
