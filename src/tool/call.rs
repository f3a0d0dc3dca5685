// ABOUTME: Typed tool calls - one argument struct per tool, built only after the
// ABOUTME: raw argument map has been validated against the tool's definition.

use serde::Deserialize;
use serde_json::Value;

use super::{Catalog, FORECAST_TRAFFIC, LIVE_TRAFFIC, TRAFFIC_COMPARISON};
use crate::directions::TravelMode;
use crate::error::ToolError;

/// Arguments for `get_live_traffic`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiveTrafficArgs {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
}

/// Arguments for `get_forecast_traffic`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastTrafficArgs {
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub mode: TravelMode,
}

/// Arguments for `get_traffic_comparison`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrafficComparisonArgs {
    pub origin: String,
    pub destination: String,
    pub forecast_hours: u32,
    pub mode: TravelMode,
}

/// A validated call to one of the catalog's tools.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    LiveTraffic(LiveTrafficArgs),
    ForecastTraffic(ForecastTrafficArgs),
    TrafficComparison(TrafficComparisonArgs),
}

impl ToolCall {
    /// Resolve `name` in the catalog and validate `arguments` against it.
    pub fn from_request(
        catalog: &Catalog,
        name: &str,
        arguments: Option<&Value>,
    ) -> Result<Self, ToolError> {
        let definition = catalog
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let args = Value::Object(definition.validate(arguments)?);

        match definition.name {
            LIVE_TRAFFIC => Ok(ToolCall::LiveTraffic(typed(args)?)),
            FORECAST_TRAFFIC => Ok(ToolCall::ForecastTraffic(typed(args)?)),
            TRAFFIC_COMPARISON => Ok(ToolCall::TrafficComparison(typed(args)?)),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// The catalog name of the called tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::LiveTraffic(_) => LIVE_TRAFFIC,
            ToolCall::ForecastTraffic(_) => FORECAST_TRAFFIC,
            ToolCall::TrafficComparison(_) => TRAFFIC_COMPARISON,
        }
    }
}

fn typed<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}
