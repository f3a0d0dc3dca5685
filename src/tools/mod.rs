// ABOUTME: Traffic tool handlers - live, forecast, and comparison lookups.
// ABOUTME: Each implements ToolExecute for its typed argument struct.

mod comparison;
mod forecast;
mod live;

pub use comparison::{ComparisonResult, ComparisonSummary, CurrentTraffic, ForecastTraffic};
pub use forecast::{CONFIDENCE_LEVEL, ForecastResult};
pub use live::{StepSummary, TrafficResult};

/// Informational text returned when the provider finds no route.
pub(crate) fn no_route_message(origin: &str, destination: &str) -> String {
    format!(
        "No route found from {} to {}. Check that both locations are valid and reachable by the selected travel mode.",
        origin, destination
    )
}
