// ABOUTME: get_live_traffic - current conditions, travel time, and plain-text
// ABOUTME: step-by-step directions for a single departure "now".

use async_trait::async_trait;
use serde::Serialize;

use super::no_route_message;
use crate::analysis::{strip_markup, summarize_conditions};
use crate::directions::{DepartureTime, DirectionsRequest, Route, TrafficModel, normalize_location};
use crate::tool::{LiveTrafficArgs, ToolContext, ToolExecute, ToolPayload};

/// Live traffic lookup result.
#[derive(Debug, Clone, Serialize)]
pub struct TrafficResult {
    pub origin: String,
    pub destination: String,
    pub route_summary: String,
    pub distance: String,
    pub duration: String,
    pub duration_in_traffic: String,
    pub traffic_summary: String,
    pub steps: Vec<StepSummary>,
}

/// One plain-text direction.
#[derive(Debug, Clone, Serialize)]
pub struct StepSummary {
    pub instruction: String,
    pub distance: String,
    pub duration: String,
    pub has_traffic_data: bool,
}

impl From<&Route> for TrafficResult {
    fn from(route: &Route) -> Self {
        let leg = &route.leg;
        TrafficResult {
            origin: leg.start_address.clone(),
            destination: leg.end_address.clone(),
            route_summary: route.summary.clone(),
            distance: leg.distance.text.clone(),
            duration: leg.duration.text.clone(),
            duration_in_traffic: leg.duration_in_traffic_text(),
            traffic_summary: summarize_conditions(route),
            steps: leg
                .steps
                .iter()
                .map(|s| StepSummary {
                    instruction: strip_markup(&s.instruction),
                    distance: s.distance.text.clone(),
                    duration: s.duration.text.clone(),
                    has_traffic_data: s.has_traffic_data,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl ToolExecute for LiveTrafficArgs {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolPayload, anyhow::Error> {
        let request = DirectionsRequest {
            origin: normalize_location(&self.origin),
            destination: normalize_location(&self.destination),
            mode: self.mode,
            departure_time: DepartureTime::Now,
            traffic_model: TrafficModel::BestGuess,
        };

        let Some(route) = ctx.gateway.route(&request).await? else {
            return Ok(ToolPayload::text(no_route_message(
                &self.origin,
                &self.destination,
            )));
        };

        Ok(ToolPayload::json(TrafficResult::from(&route))?)
    }
}
