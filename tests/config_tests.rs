//! # Configuration Tests
//!
//! Environment-driven parser configuration and external alias files.

use recipe_units::ingredient_parser::IngredientParser;
use recipe_units::measurement_unit::MeasurementUnit;
use recipe_units::parser_config::{
    ParserConfig, UnmatchedLinePolicy, ALIASES_VAR, LINE_POLICY_VAR, LOCALE_VAR,
};
use recipe_units::unit_dictionary::{StaticUnitDictionary, UnitDictionary};
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

fn alias_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_alias_file_extends_dictionary() {
    let file = alias_file(r#"{ "szklanka": "CUPS", "Szklanki": "cups", "szczypta": "TEASPOONS" }"#);

    let dictionary = StaticUnitDictionary::polish()
        .load_aliases_file(file.path())
        .unwrap();

    assert_eq!(dictionary.resolve("szklanka"), Some(MeasurementUnit::Cups));
    assert_eq!(dictionary.resolve("SZKLANKI"), Some(MeasurementUnit::Cups));
    assert_eq!(dictionary.resolve("szczypta"), Some(MeasurementUnit::Teaspoons));
    assert_eq!(dictionary.len(), StaticUnitDictionary::polish().len() + 3);
}

#[test]
fn test_alias_file_errors() {
    let bad_unit = alias_file(r#"{ "szklanka": "GLASSES" }"#);
    let err = StaticUnitDictionary::polish()
        .load_aliases_file(bad_unit.path())
        .unwrap_err();
    assert!(err.to_string().contains("GLASSES"));

    let bad_json = alias_file("szklanka = CUPS");
    assert!(StaticUnitDictionary::polish()
        .load_aliases_file(bad_json.path())
        .is_err());

    let missing = std::path::Path::new("/nonexistent/recipe-units/aliases.json");
    assert!(StaticUnitDictionary::polish().load_aliases_file(missing).is_err());
}

#[test]
fn test_parser_from_config_uses_aliases() {
    let file = alias_file(r#"{ "szklanka": "CUPS" }"#);
    let config = ParserConfig {
        aliases_path: Some(file.path().to_path_buf()),
        ..ParserConfig::default()
    };

    let parser = IngredientParser::from_config(&config).unwrap();
    let flour = parser.parse("1 szklanka mąki").unwrap();
    assert_eq!(flour.unit, Some(MeasurementUnit::Cups));
    assert_eq!(flour.ingredient_name, "mąki");
}

// Environment variables are process-wide, so every env case lives in this one test
#[test]
fn test_config_from_env() {
    env::remove_var(LINE_POLICY_VAR);
    env::remove_var(LOCALE_VAR);
    env::remove_var(ALIASES_VAR);

    let config = ParserConfig::from_env().unwrap();
    assert_eq!(config.line_policy, UnmatchedLinePolicy::Lenient);
    assert_eq!(config.locale.to_string(), "pl");
    assert!(config.aliases_path.is_none());

    env::set_var(LINE_POLICY_VAR, "strict");
    env::set_var(LOCALE_VAR, "en-US");
    env::set_var(ALIASES_VAR, "/tmp/aliases.json");

    let config = ParserConfig::from_env().unwrap();
    assert_eq!(config.line_policy, UnmatchedLinePolicy::Strict);
    assert_eq!(config.locale.to_string(), "en-US");
    assert_eq!(
        config.aliases_path.as_deref(),
        Some(std::path::Path::new("/tmp/aliases.json"))
    );

    env::set_var(LINE_POLICY_VAR, "sometimes");
    assert!(ParserConfig::from_env().is_err());

    env::set_var(LINE_POLICY_VAR, "lenient");
    env::set_var(LOCALE_VAR, "not a locale!");
    assert!(ParserConfig::from_env().is_err());

    env::remove_var(LINE_POLICY_VAR);
    env::remove_var(LOCALE_VAR);
    env::remove_var(ALIASES_VAR);
}

#[test]
fn test_english_locale_parser() {
    let config = ParserConfig {
        locale: "en-GB".parse().unwrap(),
        line_policy: UnmatchedLinePolicy::Strict,
        aliases_path: None,
    };

    let parser = IngredientParser::from_config(&config).unwrap();
    let butter = parser.parse("2 tbsp butter").unwrap();
    assert_eq!(butter.unit, Some(MeasurementUnit::Tablespoons));

    // Polish aliases are not part of the English table
    let sugar = parser.parse("2 łyżki cukru").unwrap();
    assert_eq!(sugar.unit, None);
    assert_eq!(sugar.ingredient_name, "łyżki cukru");

    assert!(parser.parse("pepper").is_none());
}
