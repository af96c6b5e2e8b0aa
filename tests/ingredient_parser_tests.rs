//! # Ingredient Parser Tests
//!
//! End-to-end behaviour of the line parser on scraped recipe lines.

use recipe_units::ingredient_parser::IngredientParser;
use recipe_units::measurement_unit::MeasurementUnit;
use recipe_units::parser_config::UnmatchedLinePolicy;
use recipe_units::quantity::{Quantity, QuantityFormat};

#[test]
fn test_simple_fraction_with_unit() {
    let parser = IngredientParser::default();

    let flour = parser.parse("3/4 cup flour").unwrap();
    assert_eq!(flour.quantity.value(), 0.75);
    assert_eq!(flour.quantity.format(), QuantityFormat::Decimal);
    assert_eq!(flour.unit, Some(MeasurementUnit::Cups));
    assert_eq!(flour.ingredient_name, "flour");
}

#[test]
fn test_mixed_number_is_only_partially_matched() {
    let parser = IngredientParser::default();

    let sugar = parser.parse("1 1/2 cup sugar").unwrap();
    assert_eq!(sugar.quantity, Quantity::of(1.0));
    assert_eq!(sugar.unit, None);
    assert_eq!(sugar.ingredient_name, "1/2 cup sugar");
}

#[test]
fn test_unmatched_line_policies() {
    let lenient = IngredientParser::default();
    let sugar = lenient.parse("sugar").unwrap();
    assert_eq!(sugar.quantity, Quantity::of(1.0));
    assert_eq!(sugar.unit, None);
    assert_eq!(sugar.ingredient_name, "sugar");

    let salt = lenient.parse("  Sól do smaku ").unwrap();
    assert_eq!(salt.ingredient_name, "sól do smaku");

    // A leading dash without a number is still just text
    let dashed = lenient.parse("- pepper").unwrap();
    assert_eq!(dashed.ingredient_name, "- pepper");

    let strict = IngredientParser::default().with_policy(UnmatchedLinePolicy::Strict);
    assert_eq!(strict.line_policy(), UnmatchedLinePolicy::Strict);
    assert!(strict.parse("sugar").is_none());
}

#[test]
fn test_non_positive_and_invalid_quantities_are_rejected() {
    let parser = IngredientParser::default();

    assert!(parser.parse("0 g salt").is_none());
    assert!(parser.parse("0,0 ml water").is_none());
    assert!(parser.parse("1/0 g salt").is_none());
    assert!(parser.parse("1/2/3 cup milk").is_none());
    assert!(parser.parse("1.2.3 g yeast").is_none());
    assert!(parser.parse("-2 g salt").is_none());
    assert!(parser.parse("-0,5 cup milk").is_none());
    assert!(parser.parse("+1 tablespoon oil").is_none());
    // Matched lines with a bad quantity never fall back to the lenient path
    assert!(parser.parse("./ cup milk").is_none());
}

#[test]
fn test_unknown_unit_is_folded_into_name() {
    let parser = IngredientParser::default();

    let sugar = parser.parse("2 glass sugar").unwrap();
    assert_eq!(sugar.quantity, Quantity::of(2.0));
    assert_eq!(sugar.unit, None);
    assert_eq!(sugar.ingredient_name, "glass sugar");

    let flour = parser.parse("1 Szklanka mąki").unwrap();
    assert_eq!(flour.ingredient_name, "szklanka mąki");
}

#[test]
fn test_polish_lines() {
    let parser = IngredientParser::default();

    let sugar = parser.parse("1,5 łyżki cukru").unwrap();
    assert_eq!(sugar.quantity, Quantity::of(1.5));
    assert_eq!(sugar.unit, Some(MeasurementUnit::Tablespoons));
    assert_eq!(sugar.ingredient_name, "cukru");

    let milk = parser.parse("250ml mleka").unwrap();
    assert_eq!(milk.quantity, Quantity::of(250.0));
    assert_eq!(milk.unit, Some(MeasurementUnit::Milliliters));
    assert_eq!(milk.ingredient_name, "mleka");

    let vanilla = parser.parse("2 ŁYŻECZKI Cukru Waniliowego").unwrap();
    assert_eq!(vanilla.unit, Some(MeasurementUnit::Teaspoons));
    assert_eq!(vanilla.ingredient_name, "cukru waniliowego");
}

#[test]
fn test_unitless_line() {
    let parser = IngredientParser::default();

    let eggs = parser.parse("2 eggs").unwrap();
    assert_eq!(eggs.quantity, Quantity::of(2.0));
    assert_eq!(eggs.unit, None);
    assert_eq!(eggs.ingredient_name, "eggs");
    assert_eq!(eggs.to_string(), "2 eggs");
}

#[test]
fn test_parse_lines_collects_skipped_lines() {
    let parser = IngredientParser::default().with_policy(UnmatchedLinePolicy::Strict);
    let text = "200 g mąki\n\n0 g soli\nsalt to taste\n3 jajka\n-1 łyżka oleju\n";

    let list = parser.parse_lines(text.lines());

    assert_eq!(list.parsed_count(), 2);
    assert_eq!(
        list.skipped_lines,
        vec!["0 g soli", "salt to taste", "-1 łyżka oleju"]
    );
    assert_eq!(list.ingredients[0].ingredient_name, "mąki");
    assert_eq!(list.ingredients[1].ingredient_name, "jajka");
    assert!((list.success_rate() - 0.4).abs() < 1e-6);
}

#[test]
fn test_parsed_ingredient_serializes_in_camel_case() {
    let parser = IngredientParser::default();
    let flour = parser.parse("3/4 cup flour").unwrap();

    let json = serde_json::to_value(&flour).unwrap();
    assert_eq!(json["ingredientName"], "flour");
    assert_eq!(json["unit"], "CUPS");
    assert_eq!(json["quantity"]["value"], 0.75);
    assert_eq!(json["quantity"]["format"], "DECIMAL");
}
