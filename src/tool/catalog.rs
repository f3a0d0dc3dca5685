// ABOUTME: Implements the Catalog - the fixed, read-only set of traffic tools
// ABOUTME: and their parameter schemas, shared by every transport.

use std::sync::Arc;

use super::{ParameterSpec, ToolDefinition};
use crate::directions::TravelMode;
use crate::mcp::McpToolInfo;

pub const LIVE_TRAFFIC: &str = "get_live_traffic";
pub const FORECAST_TRAFFIC: &str = "get_forecast_traffic";
pub const TRAFFIC_COMPARISON: &str = "get_traffic_comparison";

/// An immutable list of tool definitions. Cloning shares the same list.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Arc<Vec<ToolDefinition>>,
}

impl Catalog {
    /// Create a catalog from explicit definitions.
    pub fn new(tools: Vec<ToolDefinition>) -> Self {
        Self {
            tools: Arc::new(tools),
        }
    }

    /// The three traffic tools.
    pub fn traffic() -> Self {
        Self::new(vec![
            ToolDefinition {
                name: LIVE_TRAFFIC,
                description: "Get real-time traffic conditions, travel time and turn-by-turn steps between two locations.",
                parameters: vec![origin(), destination(), mode()],
            },
            ToolDefinition {
                name: FORECAST_TRAFFIC,
                description: "Get forecasted traffic conditions for a specific departure time using a pessimistic traffic model.",
                parameters: vec![
                    origin(),
                    destination(),
                    ParameterSpec::string(
                        "departure_time",
                        "Departure time as an ISO 8601 timestamp (e.g. 2025-06-01T08:00:00Z), Unix seconds, or 'now'",
                    ),
                    mode(),
                ],
            },
            ToolDefinition {
                name: TRAFFIC_COMPARISON,
                description: "Compare current traffic with forecasted traffic a number of hours ahead and recommend when to leave.",
                parameters: vec![
                    origin(),
                    destination(),
                    ParameterSpec::integer("forecast_hours", "Hours ahead to forecast (1-24)")
                        .with_default(1)
                        .range(1, 24),
                    mode(),
                ],
            },
        ])
    }

    /// Get a definition by name.
    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// List all tool names, in catalog order.
    pub fn list(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name).collect()
    }

    /// Get all definitions.
    pub fn all(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Get the number of tools.
    pub fn count(&self) -> usize {
        self.tools.len()
    }

    /// Convert all definitions to MCP tool descriptors.
    pub fn to_tool_infos(&self) -> Vec<McpToolInfo> {
        self.tools
            .iter()
            .map(|t| McpToolInfo {
                name: t.name.to_string(),
                description: t.description.to_string(),
                input_schema: t.input_schema(),
            })
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::traffic()
    }
}

fn origin() -> ParameterSpec {
    ParameterSpec::string(
        "origin",
        "Starting location: an address or 'lat,lng' coordinates",
    )
}

fn destination() -> ParameterSpec {
    ParameterSpec::string(
        "destination",
        "Destination: an address or 'lat,lng' coordinates",
    )
}

fn mode() -> ParameterSpec {
    let modes: Vec<&'static str> = TravelMode::ALL.iter().map(|m| m.as_str()).collect();
    ParameterSpec::string("mode", "Travel mode")
        .one_of(&modes)
        .with_default(TravelMode::default().as_str())
}
