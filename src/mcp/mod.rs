// ABOUTME: MCP module - Model Context Protocol server implementation.
// ABOUTME: Serves the traffic tool catalog over stdio or HTTP.

mod server;
mod transport;
mod types;

pub use server::*;
pub use transport::{HttpServer, StdioServer, Transport, router};
pub use types::*;
