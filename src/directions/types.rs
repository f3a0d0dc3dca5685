// ABOUTME: Directions domain types - travel modes, traffic models, departure
// ABOUTME: times, gateway requests, and the route/leg structures returned upstream.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// How the traveller moves between origin and destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    /// Every supported mode, in catalog order.
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Bicycling,
        TravelMode::Transit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelMode::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unsupported travel mode '{}'", s))
    }
}

/// Upstream estimation strategy for traffic-adjusted durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficModel {
    BestGuess,
    Pessimistic,
}

impl TrafficModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficModel::BestGuess => "best_guess",
            TrafficModel::Pessimistic => "pessimistic",
        }
    }
}

impl fmt::Display for TrafficModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When the trip starts.
///
/// Strings that do not parse as a timestamp are kept verbatim in
/// [`DepartureTime::Unparsed`] and forwarded upstream as-is, so the
/// provider decides how to reject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartureTime {
    Now,
    At(DateTime<Utc>),
    Unparsed(String),
}

impl DepartureTime {
    /// Interpret a caller-supplied departure time.
    ///
    /// Accepts the exact literal `now`, RFC 3339, `YYYY-MM-DDTHH:MM:SS` or
    /// `YYYY-MM-DD HH:MM:SS` (read as UTC), and integer Unix seconds.
    pub fn parse(raw: &str) -> Self {
        if raw == "now" {
            return DepartureTime::Now;
        }

        let trimmed = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return DepartureTime::At(dt.with_timezone(&Utc));
        }

        for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return DepartureTime::At(Utc.from_utc_datetime(&naive));
            }
        }

        if let Ok(secs) = trimmed.parse::<i64>() {
            if let Some(dt) = DateTime::from_timestamp(secs, 0) {
                return DepartureTime::At(dt);
            }
        }

        DepartureTime::Unparsed(raw.to_string())
    }

    /// The value sent as the provider's `departure_time` parameter.
    pub fn to_query_value(&self) -> String {
        match self {
            DepartureTime::Now => "now".to_string(),
            DepartureTime::At(dt) => dt.timestamp().to_string(),
            DepartureTime::Unparsed(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepartureTime::Now => f.write_str("now"),
            DepartureTime::At(dt) => f.write_str(&dt.to_rfc3339()),
            DepartureTime::Unparsed(raw) => f.write_str(raw),
        }
    }
}

/// A single lookup sent to the directions gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
    pub departure_time: DepartureTime,
    pub traffic_model: TrafficModel,
}

/// A human-readable label paired with its numeric value (metres or seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: i64,
}

/// One instruction inside a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    /// Instruction text as provided upstream (may contain markup).
    pub instruction: String,
    pub distance: TextValue,
    pub duration: TextValue,
    pub has_traffic_data: bool,
}

/// One origin-to-destination segment of a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub start_address: String,
    pub end_address: String,
    pub distance: TextValue,
    pub duration: TextValue,
    pub duration_in_traffic: Option<TextValue>,
    pub steps: Vec<RouteStep>,
}

impl RouteLeg {
    /// Traffic-adjusted duration in seconds, falling back to the plain duration.
    pub fn effective_duration_seconds(&self) -> i64 {
        self.duration_in_traffic
            .as_ref()
            .map(|d| d.value)
            .unwrap_or(self.duration.value)
    }

    /// Traffic-adjusted duration label, or "N/A" when the provider gave none.
    pub fn duration_in_traffic_text(&self) -> String {
        self.duration_in_traffic
            .as_ref()
            .map(|d| d.text.clone())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

/// The first route returned upstream, reduced to its first leg.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub summary: String,
    pub warnings: Vec<String>,
    pub leg: RouteLeg,
}
