//! Command-line front end: parse ingredient lines and convert quantities,
//! printing JSON to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use recipe_units::conversion::ConversionService;
use recipe_units::conversion_api::{ApiError, ConversionApi, ConversionRequest};
use recipe_units::ingredient_integration::{
    import_ingredient_lines, redisplay_list_in_system, to_markdown,
};
use recipe_units::ingredient_parser::IngredientParser;
use recipe_units::logging;
use recipe_units::measurement_unit::MeasurementSystem;
use recipe_units::parser_config::{ParserConfig, UnmatchedLinePolicy};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "recipe-units")]
#[command(about = "Parse recipe ingredient lines and convert measurement units", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse ingredient lines, one per line
    Parse {
        /// Input file (stdin when absent)
        file: Option<PathBuf>,

        /// Reject lines without a leading quantity
        #[arg(long)]
        strict: bool,

        /// Re-display quantities in this measurement system
        #[arg(long, value_enum)]
        system: Option<SystemArg>,

        /// Print a markdown ingredients section instead of JSON
        #[arg(long)]
        markdown: bool,
    },

    /// Convert a value between two units
    Convert {
        value: f64,
        from: String,
        to: String,

        /// Display format of the source value (integer, decimal, fraction)
        #[arg(long)]
        format: Option<String>,
    },

    /// Check whether a conversion is supported
    CanConvert { from: String, to: String },

    /// List units reachable from a unit
    Compatible { unit: String },

    /// List the unit catalog
    Units {
        #[arg(long, value_enum)]
        system: Option<SystemArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SystemArg {
    Metric,
    Imperial,
}

impl From<SystemArg> for MeasurementSystem {
    fn from(system: SystemArg) -> Self {
        match system {
            SystemArg::Metric => MeasurementSystem::Metric,
            SystemArg::Imperial => MeasurementSystem::Imperial,
        }
    }
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {e}");
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<ApiError>() {
            Some(api_error) => {
                eprintln!("{api_error}");
                ExitCode::from(2)
            }
            None => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let api = ConversionApi::default();

    match cli.command {
        Commands::Parse {
            file,
            strict,
            system,
            markdown,
        } => cmd_parse(file, strict, system, markdown),
        Commands::Convert {
            value,
            from,
            to,
            format,
        } => {
            let mut request = ConversionRequest::new(value, &from, &to);
            request.format = format;
            print_json(&api.convert(&request)?)
        }
        Commands::CanConvert { from, to } => print_json(&api.can_convert(&from, &to)?),
        Commands::Compatible { unit } => print_json(&api.compatible_units(&unit)?),
        Commands::Units { system } => {
            let units = match system.map(MeasurementSystem::from) {
                Some(MeasurementSystem::Metric) => ConversionApi::metric_units(),
                Some(MeasurementSystem::Imperial) => ConversionApi::imperial_units(),
                None => ConversionApi::all_units(),
            };
            print_json(&units)
        }
    }
}

fn cmd_parse(
    file: Option<PathBuf>,
    strict: bool,
    system: Option<SystemArg>,
    markdown: bool,
) -> Result<()> {
    let mut config = ParserConfig::from_env()?;
    if strict {
        config.line_policy = UnmatchedLinePolicy::Strict;
    }

    let parser = IngredientParser::from_config(&config)?;
    info!(
        "Parsing ingredients: locale={}, policy={}",
        config.locale, config.line_policy
    );

    let input = match file {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    let mut ingredient_list = import_ingredient_lines(&parser, input.lines());
    if let Some(system) = system {
        ingredient_list = redisplay_list_in_system(
            &ingredient_list,
            system.into(),
            &ConversionService::default(),
        );
    }

    if markdown {
        print!("{}", to_markdown(&ingredient_list));
        Ok(())
    } else {
        print_json(&ingredient_list)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
