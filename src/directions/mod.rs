// ABOUTME: Directions module - location normalization, the gateway seam, and
// ABOUTME: the Google Directions client that sits behind it.

mod gateway;
mod google;
mod location;
mod types;

pub use gateway::DirectionsGateway;
pub use google::GoogleDirectionsClient;
pub use location::normalize_location;
pub use types::*;
