// ABOUTME: Stdio transport for serving MCP.
// ABOUTME: Reads newline-delimited JSON-RPC from stdin and writes replies to stdout.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tokio::task::{JoinError, JoinSet};

use super::Transport;
use crate::error::McpError;
use crate::mcp::{
    JSONRPC_VERSION, McpRequest, McpResponse, McpRpcError, McpServer, MethodReply,
    tool_result_value,
};
use crate::tool::{FailureKind, ToolOutcome};

/// Serves MCP over a line-oriented byte stream pair.
///
/// Each line is handled on its own task, so replies may be written out of
/// request order. Callers correlate by id.
pub struct StdioServer {
    server: McpServer,
}

impl StdioServer {
    pub fn new(server: McpServer) -> Self {
        Self { server }
    }

    /// Serve until `reader` reaches end of input, then wait for in-flight calls.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<(), McpError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        tracing::info!(
            tools = self.server.tool_count(),
            "Traffic MCP server running on stdio"
        );

        let writer = Arc::new(Mutex::new(writer));
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut tasks: JoinSet<Result<(), McpError>> = JoinSet::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            while let Some(done) = tasks.try_join_next() {
                reap(done)?;
            }

            let line = match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "stdio frame is not valid UTF-8");
                    let response = McpResponse::error(Value::Null, McpRpcError::parse_error(e));
                    write_frame(&writer, &response).await?;
                    continue;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let server = self.server.clone();
            let writer = writer.clone();
            let line = line.to_string();
            tasks.spawn(async move {
                match handle_line(&server, &line).await {
                    Some(response) => write_frame(&writer, &response).await,
                    None => Ok(()),
                }
            });
        }

        tracing::info!(in_flight = tasks.len(), "stdin closed");
        while let Some(done) = tasks.join_next().await {
            reap(done)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for StdioServer {
    async fn run(&self) -> Result<(), McpError> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

fn reap(done: Result<Result<(), McpError>, JoinError>) -> Result<(), McpError> {
    match done {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "request task failed");
            Ok(())
        }
    }
}

async fn write_frame<W>(writer: &Mutex<W>, response: &McpResponse) -> Result<(), McpError>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    let mut writer = writer.lock().await;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Handle one frame. Returns `None` for notifications.
async fn handle_line(server: &McpServer, line: &str) -> Option<McpResponse> {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable stdio frame");
            return Some(McpResponse::error(Value::Null, McpRpcError::parse_error(e)));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: McpRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "malformed stdio envelope");
            return Some(McpResponse::error(id, McpRpcError::invalid_request(e)));
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return Some(McpResponse::error(
            id,
            McpRpcError::invalid_request(format!("unsupported jsonrpc version {}", request.jsonrpc)),
        ));
    }

    let reply = server.handle(&request.method, request.params.clone()).await;
    if request.is_notification() {
        tracing::debug!(method = %request.method, "notification handled");
        return None;
    }

    let id = request.reply_id();
    Some(match reply {
        MethodReply::Result(result) => McpResponse::success(id, result),
        MethodReply::Tool(outcome) => outcome_to_response(id, outcome),
        MethodReply::Error(error) => McpResponse::error(id, error),
    })
}

fn failure_code(kind: FailureKind) -> i32 {
    match kind {
        FailureKind::UnknownTool => McpRpcError::METHOD_NOT_FOUND,
        FailureKind::InvalidArguments => McpRpcError::INVALID_PARAMS,
        FailureKind::ToolExecutionFailed => McpRpcError::INTERNAL_ERROR,
    }
}

/// Stdio envelope for a tool outcome: each failure kind gets its own code.
fn outcome_to_response(id: Value, outcome: ToolOutcome) -> McpResponse {
    match outcome {
        ToolOutcome::Success(payload) => match tool_result_value(&payload) {
            Ok(result) => McpResponse::success(id, result),
            Err(error) => McpResponse::error(id, error),
        },
        ToolOutcome::Failure { kind, message } => {
            McpResponse::error(id, McpRpcError::new(failure_code(kind), message))
        }
    }
}
