// ABOUTME: get_forecast_traffic - predicted conditions for a caller-chosen
// ABOUTME: departure time, always using the pessimistic traffic model.

use async_trait::async_trait;
use serde::Serialize;

use super::no_route_message;
use crate::directions::{DepartureTime, DirectionsRequest, TrafficModel, normalize_location};
use crate::tool::{ForecastTrafficArgs, ToolContext, ToolExecute, ToolPayload};

/// Confidence label attached to every forecast.
pub const CONFIDENCE_LEVEL: &str = "moderate (historical traffic patterns)";

/// Forecast lookup result.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    pub departure_time_requested: String,
    pub origin: String,
    pub destination: String,
    pub forecast_distance: String,
    pub forecast_duration: String,
    pub forecast_duration_in_traffic: String,
    pub traffic_model_used: String,
    pub confidence_level: String,
}

#[async_trait]
impl ToolExecute for ForecastTrafficArgs {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolPayload, anyhow::Error> {
        let request = DirectionsRequest {
            origin: normalize_location(&self.origin),
            destination: normalize_location(&self.destination),
            mode: self.mode,
            departure_time: DepartureTime::parse(&self.departure_time),
            traffic_model: TrafficModel::Pessimistic,
        };

        let Some(route) = ctx.gateway.route(&request).await? else {
            return Ok(ToolPayload::text(no_route_message(
                &self.origin,
                &self.destination,
            )));
        };

        let leg = &route.leg;
        Ok(ToolPayload::json(ForecastResult {
            departure_time_requested: self.departure_time.clone(),
            origin: leg.start_address.clone(),
            destination: leg.end_address.clone(),
            forecast_distance: leg.distance.text.clone(),
            forecast_duration: leg.duration.text.clone(),
            forecast_duration_in_traffic: leg.duration_in_traffic_text(),
            traffic_model_used: request.traffic_model.to_string(),
            confidence_level: CONFIDENCE_LEVEL.to_string(),
        })?)
    }
}
