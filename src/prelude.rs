// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use traffic_mcp::prelude::*;` to get started quickly.

pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::config::Config;
pub use crate::directions::{
    DepartureTime, DirectionsGateway, DirectionsRequest, GoogleDirectionsClient, Route, RouteLeg,
    RouteStep, TextValue, TrafficModel, TravelMode,
};
pub use crate::error::{ConfigError, GatewayError, McpError, ToolError, TrafficError};
pub use crate::mcp::{
    HttpServer, McpRequest, McpResponse, McpRpcError, McpServer, McpToolInfo, StdioServer,
    Transport,
};
pub use crate::tool::{
    Catalog, Dispatcher, FailureKind, ToolCall, ToolDefinition, ToolOutcome, ToolPayload,
    TrafficDispatcher,
};
pub use crate::tools::{ComparisonResult, ForecastResult, TrafficResult};
