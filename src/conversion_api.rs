//! # Conversion API
//!
//! Request and response shapes of the unit-conversion endpoints, plus the
//! handlers that map them onto [`ConversionService`]. Routing is left to the
//! host application; every failure is a client error (HTTP 400).
//!
//! ```rust
//! use recipe_units::conversion_api::{ConversionApi, ConversionRequest};
//!
//! let api = ConversionApi::default();
//! let request: ConversionRequest =
//!     serde_json::from_str(r#"{"value": 2, "fromUnit": "cups", "toUnit": "TABLESPOONS"}"#).unwrap();
//!
//! let response = api.convert(&request).unwrap();
//! assert_eq!(response.converted_value, 32.0);
//! assert_eq!(response.converted_unit_name, "Table Spoon");
//! ```

use crate::conversion::{ConversionError, ConversionService};
use crate::measurement_unit::{MeasurementSystem, MeasurementUnit};
use crate::quantity::{Quantity, QuantityFormat};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of a conversion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    /// Optional display format of the source value ("FRACTION", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ConversionRequest {
    pub fn new(value: f64, from_unit: &str, to_unit: &str) -> Self {
        Self {
            value,
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

/// Body of a successful conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub original_value: f64,
    pub original_unit: String,
    pub original_unit_name: String,
    pub converted_value: f64,
    pub converted_unit: String,
    pub converted_unit_name: String,
    pub formatted_original_value: String,
    pub formatted_converted_value: String,
}

/// Catalog entry as listed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDto {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub system: MeasurementSystem,
}

impl From<MeasurementUnit> for UnitDto {
    fn from(unit: MeasurementUnit) -> Self {
        Self {
            id: unit.id().to_string(),
            symbol: unit.symbol().to_string(),
            name: unit.display_name().to_string(),
            system: unit.system(),
        }
    }
}

/// Client errors of the conversion endpoints
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Missing or invalid request field
    Validation(String),
    /// Unit id not in the catalog
    UnknownUnit(String),
    /// Format name not recognised
    UnknownFormat(String),
    /// Pair has no registered factor
    Unsupported(ConversionError),
}

impl ApiError {
    /// HTTP status the error maps to
    pub fn status_code(&self) -> u16 {
        400
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "{msg}"),
            ApiError::UnknownUnit(symbol) => write!(f, "Unknown measurement unit: {symbol}"),
            ApiError::UnknownFormat(name) => write!(f, "Invalid unit or format: {name}"),
            ApiError::Unsupported(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Unsupported(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError::Unsupported(err)
    }
}

/// Resolve a unit id sent by a client (case-insensitive identity name)
pub fn parse_unit(id: &str) -> Result<MeasurementUnit, ApiError> {
    MeasurementUnit::from_id(id).ok_or_else(|| ApiError::UnknownUnit(id.to_string()))
}

/// Resolve a format name sent by a client
pub fn parse_format(name: &str) -> Result<QuantityFormat, ApiError> {
    QuantityFormat::from_name(name).ok_or_else(|| ApiError::UnknownFormat(name.to_string()))
}

/// Handlers for the conversion endpoints
#[derive(Debug, Clone, Default)]
pub struct ConversionApi {
    conversions: ConversionService,
}

impl ConversionApi {
    pub fn new(conversions: ConversionService) -> Self {
        Self { conversions }
    }

    /// Convert the requested value between two units
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResponse, ApiError> {
        validate(request)?;

        let from = parse_unit(&request.from_unit)?;
        let to = parse_unit(&request.to_unit)?;
        let format = request.format.as_deref().map(parse_format).transpose()?;

        let source = Quantity::with_format(request.value, format);
        let converted = self.conversions.convert(source, from, to)?;

        debug!(
            "Conversion request {} {} -> {} {}",
            request.value, from, converted.value(), to
        );

        Ok(ConversionResponse {
            original_value: request.value,
            original_unit: from.id().to_string(),
            original_unit_name: from.display_name().to_string(),
            converted_value: converted.value(),
            converted_unit: to.id().to_string(),
            converted_unit_name: to.display_name().to_string(),
            formatted_original_value: source.formatted_value(),
            formatted_converted_value: converted.formatted_value(),
        })
    }

    /// Whether a conversion between the two units is registered
    pub fn can_convert(&self, from_unit: &str, to_unit: &str) -> Result<bool, ApiError> {
        let from = parse_unit(from_unit)?;
        let to = parse_unit(to_unit)?;
        Ok(self.conversions.can_convert(from, to))
    }

    /// Units reachable from the given unit, itself included
    pub fn compatible_units(&self, unit: &str) -> Result<Vec<UnitDto>, ApiError> {
        let from = parse_unit(unit)?;
        Ok(self
            .conversions
            .compatible_units(from)
            .into_iter()
            .map(UnitDto::from)
            .collect())
    }

    /// Full unit catalog
    pub fn all_units() -> Vec<UnitDto> {
        MeasurementUnit::ALL.into_iter().map(UnitDto::from).collect()
    }

    pub fn metric_units() -> Vec<UnitDto> {
        Self::units_in(MeasurementSystem::Metric)
    }

    pub fn imperial_units() -> Vec<UnitDto> {
        Self::units_in(MeasurementSystem::Imperial)
    }

    fn units_in(system: MeasurementSystem) -> Vec<UnitDto> {
        MeasurementUnit::by_system(system)
            .into_iter()
            .map(UnitDto::from)
            .collect()
    }
}

fn validate(request: &ConversionRequest) -> Result<(), ApiError> {
    if !request.value.is_finite() {
        return Err(ApiError::Validation("Value is required.".to_string()));
    }
    if request.from_unit.trim().is_empty() {
        return Err(ApiError::Validation("Source unit is required.".to_string()));
    }
    if request.to_unit.trim().is_empty() {
        return Err(ApiError::Validation("Target unit is required.".to_string()));
    }
    Ok(())
}
