// ABOUTME: Transport abstraction for serving MCP.
// ABOUTME: Re-exports the stdio and HTTP front ends.

mod http;
mod stdio;

pub use http::{HttpServer, router};
pub use stdio::StdioServer;

use async_trait::async_trait;

use crate::error::McpError;

/// A front end that serves the MCP methods until its input ends.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Serve requests until end of input or shutdown.
    async fn run(&self) -> Result<(), McpError>;
}
