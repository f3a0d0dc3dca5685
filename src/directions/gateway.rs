// ABOUTME: Defines the DirectionsGateway trait - the seam between tool handlers
// ABOUTME: and the external directions provider.

use async_trait::async_trait;

use super::{DirectionsRequest, Route};
use crate::error::GatewayError;

/// A single-shot directions lookup.
///
/// Implementations perform exactly one upstream call per invocation and
/// never retry or cache. `Ok(None)` means the provider found no route.
#[async_trait]
pub trait DirectionsGateway: Send + Sync {
    async fn route(&self, request: &DirectionsRequest) -> Result<Option<Route>, GatewayError>;
}
