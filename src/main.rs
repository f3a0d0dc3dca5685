// ABOUTME: Binary entry point for traffic-mcp.
// ABOUTME: Parses the CLI, loads configuration, and runs the chosen transport.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use traffic_mcp::config::Config;
use traffic_mcp::directions::GoogleDirectionsClient;
use traffic_mcp::mcp::{HttpServer, McpServer, StdioServer, Transport};
use traffic_mcp::tool::TrafficDispatcher;

#[derive(Parser, Debug)]
#[command(name = "traffic-mcp")]
#[command(version)]
#[command(about = "Live and forecast traffic tools served over MCP")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Log level (debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve newline-delimited JSON-RPC on stdin/stdout.
    Stdio,

    /// Serve JSON-RPC over HTTP.
    Http {
        /// Port to listen on.
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Address to bind.
        #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
        host: IpAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the stdio transport.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let gateway = Arc::new(GoogleDirectionsClient::from_config(&config));
    let server = McpServer::new(Arc::new(TrafficDispatcher::new(gateway)));

    let transport: Box<dyn Transport> = match cli.command.unwrap_or(Command::Stdio) {
        Command::Stdio => Box::new(StdioServer::new(server)),
        Command::Http { port, host } => {
            Box::new(HttpServer::new(server, SocketAddr::new(host, port)))
        }
    };

    transport.run().await.context("Transport failed")?;
    Ok(())
}
