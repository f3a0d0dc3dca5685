// ABOUTME: get_traffic_comparison - looks up "now" and "now + N hours" in
// ABOUTME: parallel and recommends whether to leave now or later.

use async_trait::async_trait;
use chrono::Duration;
use serde::Serialize;

use super::no_route_message;
use crate::analysis::{recommend, summarize_conditions, time_difference_seconds};
use crate::directions::{DepartureTime, DirectionsRequest, Route, TrafficModel, normalize_location};
use crate::tool::{ToolContext, ToolExecute, ToolPayload, TrafficComparisonArgs};

/// Comparison lookup result.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub origin: String,
    pub destination: String,
    pub current_traffic: CurrentTraffic,
    pub forecast_traffic: ForecastTraffic,
    pub comparison: ComparisonSummary,
}

/// Conditions for leaving now.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentTraffic {
    pub departure_time: String,
    pub distance: String,
    pub duration: String,
    pub duration_in_traffic: String,
    pub traffic_summary: String,
}

/// Conditions for leaving at the forecast time.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastTraffic {
    pub hours_ahead: u32,
    pub departure_time: String,
    pub distance: String,
    pub duration: String,
    pub duration_in_traffic: String,
    pub traffic_summary: String,
}

/// The derived difference and advice.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub time_difference_seconds: i64,
    pub recommendation: String,
}

#[async_trait]
impl ToolExecute for TrafficComparisonArgs {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolPayload, anyhow::Error> {
        let departure = ctx.clock.now() + Duration::hours(i64::from(self.forecast_hours));
        let origin = normalize_location(&self.origin);
        let destination = normalize_location(&self.destination);

        let current_request = DirectionsRequest {
            origin: origin.clone(),
            destination: destination.clone(),
            mode: self.mode,
            departure_time: DepartureTime::Now,
            traffic_model: TrafficModel::BestGuess,
        };
        let forecast_request = DirectionsRequest {
            origin,
            destination,
            mode: self.mode,
            departure_time: DepartureTime::At(departure),
            traffic_model: TrafficModel::Pessimistic,
        };

        let (current, forecast) = futures::try_join!(
            ctx.gateway.route(&current_request),
            ctx.gateway.route(&forecast_request)
        )?;

        let (Some(current), Some(forecast)) = (current, forecast) else {
            return Ok(ToolPayload::text(format!(
                "Unable to compare traffic: {}",
                no_route_message(&self.origin, &self.destination)
            )));
        };

        Ok(ToolPayload::json(ComparisonResult {
            origin: current.leg.start_address.clone(),
            destination: current.leg.end_address.clone(),
            current_traffic: CurrentTraffic {
                departure_time: DepartureTime::Now.to_string(),
                distance: current.leg.distance.text.clone(),
                duration: current.leg.duration.text.clone(),
                duration_in_traffic: current.leg.duration_in_traffic_text(),
                traffic_summary: summarize_conditions(&current),
            },
            forecast_traffic: forecast_traffic(
                &forecast,
                self.forecast_hours,
                departure.to_rfc3339(),
            ),
            comparison: ComparisonSummary {
                time_difference_seconds: time_difference_seconds(&current.leg, &forecast.leg),
                recommendation: recommend(&current.leg, &forecast.leg, self.forecast_hours),
            },
        })?)
    }
}

fn forecast_traffic(route: &Route, hours_ahead: u32, departure_time: String) -> ForecastTraffic {
    ForecastTraffic {
        hours_ahead,
        departure_time,
        distance: route.leg.distance.text.clone(),
        duration: route.leg.duration.text.clone(),
        duration_in_traffic: route.leg.duration_in_traffic_text(),
        traffic_summary: summarize_conditions(route),
    }
}
