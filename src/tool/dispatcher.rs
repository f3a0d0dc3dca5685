// ABOUTME: Defines the Dispatcher trait consumed by both transports and the
// ABOUTME: TrafficDispatcher that validates, routes, and packages tool calls.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;

use super::{Catalog, ToolCall, ToolContext, ToolExecute, ToolOutcome};
use crate::clock::{Clock, SystemClock};
use crate::directions::DirectionsGateway;
use crate::error::ToolError;

/// Routes tool calls by name. Never returns an unstructured error.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// The tools this dispatcher serves.
    fn catalog(&self) -> &Catalog;

    /// Validate and execute a call, packaging any failure into the outcome.
    async fn dispatch(&self, name: &str, arguments: Option<Value>) -> ToolOutcome;
}

/// Dispatcher for the traffic tool catalog.
#[derive(Clone)]
pub struct TrafficDispatcher {
    catalog: Catalog,
    context: ToolContext,
}

impl TrafficDispatcher {
    /// Create a dispatcher reading the system wall clock.
    pub fn new(gateway: Arc<dyn DirectionsGateway>) -> Self {
        Self::with_clock(gateway, Arc::new(SystemClock))
    }

    /// Create a dispatcher with an explicit clock.
    pub fn with_clock(gateway: Arc<dyn DirectionsGateway>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: Catalog::traffic(),
            context: ToolContext::new(gateway, clock),
        }
    }
}

#[async_trait]
impl Dispatcher for TrafficDispatcher {
    fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    async fn dispatch(&self, name: &str, arguments: Option<Value>) -> ToolOutcome {
        let started = Instant::now();

        let call = match ToolCall::from_request(&self.catalog, name, arguments.as_ref()) {
            Ok(call) => call,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "rejected tool call");
                return e.into();
            }
        };

        let outcome = match call.execute(&self.context).await {
            Ok(payload) => ToolOutcome::Success(payload),
            Err(e) => {
                tracing::warn!(tool = name, error = %format!("{:#}", e), "tool execution failed");
                ToolError::Execution(e).into()
            }
        };

        tracing::debug!(
            tool = name,
            success = outcome.is_success(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dispatched tool call"
        );
        outcome
    }
}
