// ABOUTME: Google Directions API client implementation.
// ABOUTME: Implements DirectionsGateway over the JSON directions endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use super::{DirectionsGateway, DirectionsRequest, Route, RouteLeg, RouteStep, TextValue};
use crate::config::{Config, DEFAULT_DIRECTIONS_URL};
use crate::error::GatewayError;

/// Directions API response format.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<ApiRoute>,
}

/// A route in the API response.
#[derive(Debug, Deserialize)]
pub struct ApiRoute {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub legs: Vec<ApiLeg>,
}

/// A leg in the API response.
#[derive(Debug, Deserialize)]
pub struct ApiLeg {
    #[serde(default)]
    pub start_address: String,
    #[serde(default)]
    pub end_address: String,
    pub distance: TextValue,
    pub duration: TextValue,
    #[serde(default)]
    pub duration_in_traffic: Option<TextValue>,
    #[serde(default)]
    pub steps: Vec<ApiStep>,
}

/// A step in the API response.
#[derive(Debug, Deserialize)]
pub struct ApiStep {
    #[serde(default)]
    pub html_instructions: String,
    pub distance: TextValue,
    pub duration: TextValue,
}

impl From<ApiLeg> for RouteLeg {
    fn from(leg: ApiLeg) -> Self {
        // Steps carry no traffic figures of their own; they inherit the leg's.
        let has_traffic_data = leg.duration_in_traffic.is_some();
        RouteLeg {
            start_address: leg.start_address,
            end_address: leg.end_address,
            distance: leg.distance,
            duration: leg.duration,
            duration_in_traffic: leg.duration_in_traffic,
            steps: leg
                .steps
                .into_iter()
                .map(|s| RouteStep {
                    instruction: s.html_instructions,
                    distance: s.distance,
                    duration: s.duration,
                    has_traffic_data,
                })
                .collect(),
        }
    }
}

impl DirectionsResponse {
    /// Reduce the response to its first route's first leg.
    pub fn into_first_route(self) -> Result<Option<Route>, GatewayError> {
        match self.status.as_str() {
            "OK" | "ZERO_RESULTS" | "NOT_FOUND" => {}
            _ => {
                return Err(GatewayError::Upstream {
                    message: self
                        .error_message
                        .unwrap_or_else(|| "Directions request failed".to_string()),
                    status: self.status,
                });
            }
        }

        let Some(route) = self.routes.into_iter().next() else {
            return Ok(None);
        };
        let Some(leg) = route.legs.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(Route {
            summary: route.summary,
            warnings: route.warnings,
            leg: leg.into(),
        }))
    }
}

/// Client for the Google Directions API.
#[derive(Debug, Clone)]
pub struct GoogleDirectionsClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl GoogleDirectionsClient {
    /// Create a client for the public Directions endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_DIRECTIONS_URL)
    }

    /// Create a client against a custom endpoint.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from validated configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_base_url(&config.api_key, &config.directions_url)
    }

    fn query_pairs(&self, request: &DirectionsRequest) -> Vec<(&'static str, String)> {
        vec![
            ("origin", request.origin.clone()),
            ("destination", request.destination.clone()),
            ("mode", request.mode.as_str().to_string()),
            ("departure_time", request.departure_time.to_query_value()),
            ("traffic_model", request.traffic_model.as_str().to_string()),
            ("key", self.api_key.clone()),
        ]
    }
}

#[async_trait]
impl DirectionsGateway for GoogleDirectionsClient {
    async fn route(&self, request: &DirectionsRequest) -> Result<Option<Route>, GatewayError> {
        tracing::debug!(
            mode = %request.mode,
            traffic_model = %request.traffic_model,
            departure_time = %request.departure_time,
            "requesting directions"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&self.query_pairs(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<DirectionsResponse>(&body)
                .ok()
                .and_then(|r| r.error_message)
                .unwrap_or(body);
            return Err(GatewayError::Upstream {
                status: status.as_u16().to_string(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: DirectionsResponse = serde_json::from_str(&body)?;
        parsed.into_first_route()
    }
}
