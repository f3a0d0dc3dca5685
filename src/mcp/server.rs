// ABOUTME: Transport-neutral MCP method handling shared by stdio and HTTP.
// ABOUTME: Answers initialize, ping, tools/list and hands tools/call to the Dispatcher.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{
    McpContentBlock, McpInitializeResult, McpPingResult, McpRpcError, McpServerCapabilities,
    McpServerInfo, McpToolCallParams, McpToolResult, McpToolsListResult, PROTOCOL_VERSION,
};
use crate::clock::{Clock, SystemClock};
use crate::tool::{Dispatcher, ToolOutcome, ToolPayload};

/// Methods the server understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum McpMethod {
    Initialize,
    Ping,
    ToolsList,
    ToolsCall,
    Other(String),
}

impl McpMethod {
    pub fn from_name(name: &str) -> Self {
        match name {
            "initialize" => Self::Initialize,
            "ping" => Self::Ping,
            "tools/list" => Self::ToolsList,
            "tools/call" => Self::ToolsCall,
            other => Self::Other(other.to_string()),
        }
    }
}

/// What a method produced, before a transport wraps it in an envelope.
#[derive(Debug)]
pub enum MethodReply {
    /// A protocol result, sent as-is.
    Result(Value),
    /// A tool outcome, encoded by the transport's own rules.
    Tool(ToolOutcome),
    /// A protocol-level error.
    Error(McpRpcError),
}

/// Shared server state. Cheap to clone; every request handler gets its own copy.
#[derive(Clone)]
pub struct McpServer {
    dispatcher: Arc<dyn Dispatcher>,
    clock: Arc<dyn Clock>,
}

impl McpServer {
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self::with_clock(dispatcher, Arc::new(SystemClock))
    }

    pub fn with_clock(dispatcher: Arc<dyn Dispatcher>, clock: Arc<dyn Clock>) -> Self {
        Self { dispatcher, clock }
    }

    /// Number of tools advertised.
    pub fn tool_count(&self) -> usize {
        self.dispatcher.catalog().count()
    }

    pub fn initialize_result(&self) -> McpInitializeResult {
        McpInitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: McpServerCapabilities::default(),
            server_info: McpServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn ping_result(&self) -> McpPingResult {
        McpPingResult {
            ok: true,
            now: self.clock.now().to_rfc3339(),
        }
    }

    pub fn tools_list_result(&self) -> McpToolsListResult {
        McpToolsListResult {
            tools: self.dispatcher.catalog().to_tool_infos(),
        }
    }

    /// Run one method. Unknown methods yield a method-not-found error.
    pub async fn handle(&self, method: &str, params: Option<Value>) -> MethodReply {
        match McpMethod::from_name(method) {
            McpMethod::Initialize => encode(&self.initialize_result()),
            McpMethod::Ping => encode(&self.ping_result()),
            McpMethod::ToolsList => encode(&self.tools_list_result()),
            McpMethod::ToolsCall => {
                let call = match decode_call_params(params) {
                    Ok(call) => call,
                    Err(e) => return MethodReply::Error(e),
                };
                tracing::debug!(tool = %call.name, "tools/call");
                MethodReply::Tool(self.dispatcher.dispatch(&call.name, call.arguments).await)
            }
            McpMethod::Other(name) => MethodReply::Error(McpRpcError::method_not_found(&name)),
        }
    }
}

fn decode_call_params(params: Option<Value>) -> Result<McpToolCallParams, McpRpcError> {
    let params = params.ok_or_else(|| McpRpcError::invalid_params("missing tool name"))?;
    serde_json::from_value(params).map_err(McpRpcError::invalid_params)
}

fn encode<T: Serialize>(value: &T) -> MethodReply {
    match serde_json::to_value(value) {
        Ok(v) => MethodReply::Result(v),
        Err(e) => MethodReply::Error(McpRpcError::new(
            McpRpcError::INTERNAL_ERROR,
            e.to_string(),
        )),
    }
}

/// Render a successful tool payload as an MCP tool result.
pub fn tool_result(payload: &ToolPayload) -> McpToolResult {
    McpToolResult {
        content: vec![McpContentBlock::text(payload.to_text())],
        is_error: false,
    }
}

/// Encode a tool result, falling back to an internal error.
pub fn tool_result_value(payload: &ToolPayload) -> Result<Value, McpRpcError> {
    serde_json::to_value(tool_result(payload))
        .map_err(|e| McpRpcError::new(McpRpcError::INTERNAL_ERROR, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::tool::{Catalog, FailureKind};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    struct EchoDispatcher {
        catalog: Catalog,
    }

    #[async_trait]
    impl Dispatcher for EchoDispatcher {
        fn catalog(&self) -> &Catalog {
            &self.catalog
        }

        async fn dispatch(&self, name: &str, arguments: Option<Value>) -> ToolOutcome {
            if self.catalog.get(name).is_none() {
                return ToolOutcome::failure(
                    FailureKind::UnknownTool,
                    format!("Unknown tool: {}", name),
                );
            }
            ToolOutcome::Success(ToolPayload::Json(arguments.unwrap_or(Value::Null)))
        }
    }

    fn server() -> McpServer {
        let clock = FixedClock(Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap());
        McpServer::with_clock(
            Arc::new(EchoDispatcher {
                catalog: Catalog::traffic(),
            }),
            Arc::new(clock),
        )
    }

    fn result(reply: MethodReply) -> Value {
        match reply {
            MethodReply::Result(v) => v,
            other => panic!("Expected result, got {:?}", other),
        }
    }

    #[test]
    fn test_method_names() {
        assert_eq!(McpMethod::from_name("tools/call"), McpMethod::ToolsCall);
        assert_eq!(
            McpMethod::from_name("resources/list"),
            McpMethod::Other("resources/list".into())
        );
    }

    #[tokio::test]
    async fn test_initialize() {
        let value = result(server().handle("initialize", None).await);
        assert_eq!(value["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(value["capabilities"], json!({}));
        assert_eq!(value["serverInfo"]["name"], "traffic-mcp");
    }

    #[tokio::test]
    async fn test_ping_reports_clock() {
        let value = result(server().handle("ping", None).await);
        assert_eq!(value["ok"], true);
        assert_eq!(value["now"], "2025-03-14T08:00:00+00:00");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let value = result(server().handle("tools/list", None).await);
        let names: Vec<_> = value["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "get_live_traffic",
                "get_forecast_traffic",
                "get_traffic_comparison"
            ]
        );
    }

    #[tokio::test]
    async fn test_tools_call_routes_to_dispatcher() {
        let reply = server()
            .handle(
                "tools/call",
                Some(json!({"name": "get_live_traffic", "arguments": {"origin": "A"}})),
            )
            .await;
        match reply {
            MethodReply::Tool(ToolOutcome::Success(ToolPayload::Json(args))) => {
                assert_eq!(args, json!({"origin": "A"}))
            }
            other => panic!("Expected tool outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        match server().handle("tools/call", None).await {
            MethodReply::Error(e) => assert_eq!(e.code, McpRpcError::INVALID_PARAMS),
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tools_call_with_bad_params() {
        match server().handle("tools/call", Some(json!({"arguments": {}}))).await {
            MethodReply::Error(e) => assert_eq!(e.code, McpRpcError::INVALID_PARAMS),
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_method() {
        match server().handle("resources/list", None).await {
            MethodReply::Error(e) => {
                assert_eq!(e.code, McpRpcError::METHOD_NOT_FOUND);
                assert!(e.message.contains("resources/list"));
            }
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_tool_result_wraps_text() {
        let value = tool_result_value(&ToolPayload::text("No route found")).unwrap();
        assert_eq!(value["content"][0]["text"], "No route found");
        assert_eq!(value["isError"], false);
    }
}
