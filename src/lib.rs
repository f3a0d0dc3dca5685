// ABOUTME: Root module for traffic-mcp - traffic lookup tools served over MCP.
// ABOUTME: Re-exports all public types from submodules.

pub mod analysis;
pub mod clock;
pub mod config;
pub mod directions;
pub mod error;
pub mod mcp;
pub mod prelude;
pub mod tool;
pub mod tools;

pub use error::TrafficError;
