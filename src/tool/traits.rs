// ABOUTME: Defines ToolExecute - typed execution of validated tool arguments -
// ABOUTME: and the ToolContext of collaborators every handler receives.

use std::sync::Arc;

use async_trait::async_trait;

use super::{ToolCall, ToolPayload};
use crate::clock::Clock;
use crate::directions::DirectionsGateway;

/// Collaborators available to tool handlers.
#[derive(Clone)]
pub struct ToolContext {
    pub gateway: Arc<dyn DirectionsGateway>,
    pub clock: Arc<dyn Clock>,
}

impl ToolContext {
    pub fn new(gateway: Arc<dyn DirectionsGateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }
}

/// Trait for typed tool execution.
#[async_trait]
pub trait ToolExecute: Send + Sync {
    /// Execute the tool with typed parameters (struct fields).
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolPayload, anyhow::Error>;
}

#[async_trait]
impl ToolExecute for ToolCall {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolPayload, anyhow::Error> {
        match self {
            ToolCall::LiveTraffic(args) => args.execute(ctx).await,
            ToolCall::ForecastTraffic(args) => args.execute(ctx).await,
            ToolCall::TrafficComparison(args) => args.execute(ctx).await,
        }
    }
}
