// ABOUTME: HTTP transport for serving MCP with axum.
// ABOUTME: POST /mcp carries JSON-RPC; GET /health reports liveness.

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

use super::Transport;
use crate::error::McpError;
use crate::mcp::{
    JSONRPC_VERSION, McpRequest, McpResponse, McpRpcError, McpServer, MethodReply,
    tool_result_value,
};
use crate::tool::ToolOutcome;

const HEALTH_MESSAGE: &str = "Traffic MCP server is running";
const GET_NOT_ALLOWED: &str =
    "Method not allowed: use POST for JSON-RPC requests. Streaming (SSE) is not supported.";

/// Build the HTTP router.
pub fn router(server: McpServer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/mcp", get(mcp_get).post(mcp_post))
        .with_state(server)
}

/// Serves MCP over HTTP until Ctrl-C.
pub struct HttpServer {
    server: McpServer,
    addr: SocketAddr,
}

impl HttpServer {
    pub fn new(server: McpServer, addr: SocketAddr) -> Self {
        Self { server, addr }
    }
}

#[async_trait]
impl Transport for HttpServer {
    async fn run(&self) -> Result<(), McpError> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!(
            addr = %self.addr,
            tools = self.server.tool_count(),
            "Traffic MCP server listening on http"
        );

        axum::serve(listener, router(self.server.clone()))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("http server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "message": HEALTH_MESSAGE}))
}

async fn mcp_get() -> Response {
    let error = McpRpcError::new(McpRpcError::SERVER_ERROR, GET_NOT_ALLOWED);
    rpc(StatusCode::BAD_REQUEST, McpResponse::error(Value::Null, error))
}

async fn mcp_post(State(server): State<McpServer>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable http body");
            return rpc(
                StatusCode::BAD_REQUEST,
                McpResponse::error(Value::Null, McpRpcError::parse_error(e)),
            );
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: McpRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "malformed http envelope");
            return rpc(
                StatusCode::BAD_REQUEST,
                McpResponse::error(id, McpRpcError::invalid_request(e)),
            );
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return rpc(
            StatusCode::BAD_REQUEST,
            McpResponse::error(
                id,
                McpRpcError::invalid_request(format!(
                    "unsupported jsonrpc version {}",
                    request.jsonrpc
                )),
            ),
        );
    }

    let reply = server.handle(&request.method, request.params.clone()).await;
    if request.is_notification() {
        return StatusCode::ACCEPTED.into_response();
    }

    let id = request.reply_id();
    let response = match reply {
        MethodReply::Result(result) => McpResponse::success(id, result),
        MethodReply::Tool(outcome) => outcome_to_response(id, outcome),
        MethodReply::Error(error) => McpResponse::error(id, error),
    };
    rpc(StatusCode::OK, response)
}

fn rpc(status: StatusCode, response: McpResponse) -> Response {
    (status, Json(response)).into_response()
}

/// HTTP envelope for a tool outcome: every failure is an internal error
/// tagged with its kind.
fn outcome_to_response(id: Value, outcome: ToolOutcome) -> McpResponse {
    match outcome {
        ToolOutcome::Success(payload) => match tool_result_value(&payload) {
            Ok(result) => McpResponse::success(id, result),
            Err(error) => McpResponse::error(id, error),
        },
        ToolOutcome::Failure { kind, message } => McpResponse::error(
            id,
            McpRpcError::new(McpRpcError::INTERNAL_ERROR, message)
                .with_data(json!({"kind": kind.as_str()})),
        ),
    }
}
