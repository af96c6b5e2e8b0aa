//! # Ingredient Import Integration
//!
//! This module wires the parser and the conversion service into the recipe
//! import flow: scraped lines go in, an [`IngredientList`] comes out, and the
//! list can be re-displayed in another measurement system or exported as
//! markdown.

use crate::conversion::ConversionService;
use crate::ingredient_model::{IngredientList, RecipeIngredient};
use crate::ingredient_parser::IngredientParser;
use crate::measurement_unit::{MeasurementSystem, MeasurementUnit};
use std::fmt;
use tracing::{debug, info, warn};

/// Parse the ingredient lines scraped from one recipe page
pub fn import_ingredient_lines<I, S>(parser: &IngredientParser, lines: I) -> IngredientList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ingredient_list = parser.parse_lines(lines);

    info!(
        parsed_count = ingredient_list.parsed_count(),
        skipped_count = ingredient_list.skipped_count(),
        success_rate = ingredient_list.success_rate(),
        "Imported ingredient lines"
    );

    if ingredient_list.parsed_count() == 0 && ingredient_list.skipped_count() > 0 {
        warn!(
            skipped_count = ingredient_list.skipped_count(),
            "No ingredient line could be parsed"
        );
    }

    ingredient_list
}

/// Ingredient names grouped by the measurement system of their unit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientSummary {
    pub metric: Vec<String>,
    pub imperial: Vec<String>,
    pub unitless: Vec<String>,
}

impl IngredientSummary {
    pub fn from_list(ingredient_list: &IngredientList) -> Self {
        let mut summary = Self::default();

        for ingredient in &ingredient_list.ingredients {
            let name = ingredient.ingredient_name.clone();
            match ingredient.unit.map(|unit| unit.system()) {
                Some(MeasurementSystem::Metric) => summary.metric.push(name),
                Some(MeasurementSystem::Imperial) => summary.imperial.push(name),
                None => summary.unitless.push(name),
            }
        }

        summary
    }
}

impl fmt::Display for IngredientSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ingredient Summary")?;
        if !self.metric.is_empty() {
            writeln!(f, "Metric: {}", self.metric.join(", "))?;
        }
        if !self.imperial.is_empty() {
            writeln!(f, "Imperial: {}", self.imperial.join(", "))?;
        }
        if !self.unitless.is_empty() {
            writeln!(f, "Without unit: {}", self.unitless.join(", "))?;
        }
        Ok(())
    }
}

/// Re-display an ingredient in the given measurement system.
///
/// The ingredient is converted to the first unit of `system` (catalog order)
/// that has a registered factor. Unit-less ingredients, ingredients already in
/// `system` and ingredients with no reachable unit are returned unchanged.
pub fn redisplay_in_system(
    ingredient: &RecipeIngredient,
    system: MeasurementSystem,
    conversions: &ConversionService,
) -> RecipeIngredient {
    let Some(from) = ingredient.unit else {
        return ingredient.clone();
    };
    if from.system() == system {
        return ingredient.clone();
    }

    let target = MeasurementUnit::by_system(system)
        .into_iter()
        .find(|to| conversions.can_convert(from, *to));

    let Some(to) = target else {
        debug!(
            ingredient = %ingredient.ingredient_name,
            unit = %from,
            system = %system,
            "No conversion target for ingredient"
        );
        return ingredient.clone();
    };

    match conversions.convert(ingredient.quantity, from, to) {
        Ok(quantity) => ingredient.with_measure(Some(to), quantity),
        Err(e) => {
            warn!(ingredient = %ingredient.ingredient_name, error = %e, "Conversion failed");
            ingredient.clone()
        }
    }
}

/// Re-display a whole list in the given measurement system
pub fn redisplay_list_in_system(
    ingredient_list: &IngredientList,
    system: MeasurementSystem,
    conversions: &ConversionService,
) -> IngredientList {
    IngredientList {
        ingredients: ingredient_list
            .ingredients
            .iter()
            .map(|ingredient| redisplay_in_system(ingredient, system, conversions))
            .collect(),
        skipped_lines: ingredient_list.skipped_lines.clone(),
    }
}

/// Markdown "Ingredients" section of the recipe export.
///
/// Ends with a blank line so the next section can be appended directly.
pub fn to_markdown(ingredient_list: &IngredientList) -> String {
    let mut output = String::from("## Ingredients\n\n");
    for ingredient in &ingredient_list.ingredients {
        output.push_str(&ingredient.to_markdown_line());
        output.push('\n');
    }
    output.push('\n');
    output
}
