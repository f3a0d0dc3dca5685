// ABOUTME: Integration tests verifying modules work together.
// ABOUTME: Drives both transports end to end against a mock directions upstream.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::io::AsyncReadExt;
use tower::ServiceExt;
use traffic_mcp::mcp::router;
use traffic_mcp::prelude::*;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn clock_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 8, 0, 0).unwrap()
}

fn server_for(upstream: &MockServer) -> McpServer {
    let gateway = Arc::new(GoogleDirectionsClient::with_base_url(
        "test-key",
        upstream.uri(),
    ));
    let clock = Arc::new(FixedClock(clock_time()));
    let dispatcher = TrafficDispatcher::with_clock(gateway, clock.clone());
    McpServer::with_clock(Arc::new(dispatcher), clock)
}

fn directions_body(in_traffic_seconds: i64, warnings: &[&str]) -> Value {
    json!({
        "status": "OK",
        "routes": [{
            "summary": "I-95 N",
            "warnings": warnings,
            "legs": [{
                "start_address": "New York, NY, USA",
                "end_address": "Boston, MA, USA",
                "distance": {"text": "215 mi", "value": 346000},
                "duration": {"text": "3 hours 45 mins", "value": 13500},
                "duration_in_traffic": {"text": "in traffic", "value": in_traffic_seconds},
                "steps": [{
                    "html_instructions": "Merge onto <b>I-95 N</b>&nbsp;toward <div>Boston</div>",
                    "distance": {"text": "200 mi", "value": 321000},
                    "duration": {"text": "3 hours", "value": 10800}
                }]
            }]
        }]
    })
}

async fn http_call(server: McpServer, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = router(server).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn stdio_call(server: McpServer, frames: &[Value]) -> Vec<Value> {
    let input: String = frames.iter().map(|f| format!("{}\n", f)).collect();
    let (mut client, writer) = tokio::io::duplex(256 * 1024);
    StdioServer::new(server)
        .serve(input.as_bytes(), writer)
        .await
        .unwrap();

    let mut output = String::new();
    client.read_to_string(&mut output).await.unwrap();
    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn tool_call(id: i64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

/// Parse the JSON document carried in a tool result's text block.
fn content_json(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn test_both_transports_serve_identical_catalogs() {
    let upstream = MockServer::start().await;
    let list = json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"});

    let (status, over_http) = http_call(server_for(&upstream), list.clone()).await;
    let over_stdio = stdio_call(server_for(&upstream), &[list]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(over_stdio.len(), 1);
    assert_eq!(over_http["result"], over_stdio[0]["result"]);

    let tools = over_http["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "get_live_traffic",
            "get_forecast_traffic",
            "get_traffic_comparison"
        ]
    );
    assert_eq!(
        tools[2]["inputSchema"]["required"],
        json!(["origin", "destination"])
    );
}

#[tokio::test]
async fn test_live_traffic_over_http() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("origin", "40.7128,-74.0060"))
        .and(query_param("destination", "Boston, MA"))
        .and(query_param("mode", "driving"))
        .and(query_param("departure_time", "now"))
        .and(query_param("traffic_model", "best_guess"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(directions_body(14_700, &["Toll road"])),
        )
        .expect(1)
        .mount(&upstream)
        .await;

    let (status, response) = http_call(
        server_for(&upstream),
        tool_call(
            1,
            "get_live_traffic",
            json!({"origin": "40.7128, -74.0060", "destination": "Boston, MA"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = content_json(&response);
    assert_eq!(result["origin"], "New York, NY, USA");
    assert_eq!(result["route_summary"], "I-95 N");
    assert_eq!(result["duration_in_traffic"], "in traffic");
    assert_eq!(result["traffic_summary"], "Traffic alerts: Toll road");
    assert_eq!(
        result["steps"][0]["instruction"],
        "Merge onto I-95 N toward Boston"
    );
}

#[tokio::test]
async fn test_comparison_over_stdio_uses_clock() {
    let upstream = MockServer::start().await;
    let departure = (clock_time() + Duration::hours(2)).timestamp().to_string();

    Mock::given(method("GET"))
        .and(query_param("departure_time", "now"))
        .and(query_param("traffic_model", "best_guess"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body(14_000, &[])))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(query_param("departure_time", departure.as_str()))
        .and(query_param("traffic_model", "pessimistic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body(13_000, &[])))
        .expect(1)
        .mount(&upstream)
        .await;

    let frames = stdio_call(
        server_for(&upstream),
        &[tool_call(
            7,
            "get_traffic_comparison",
            json!({"origin": "New York, NY", "destination": "Boston, MA", "forecast_hours": 2}),
        )],
    )
    .await;

    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0]["id"], 7);
    let result = content_json(&frames[0]);
    assert_eq!(result["forecast_traffic"]["hours_ahead"], 2);
    assert_eq!(
        result["forecast_traffic"]["departure_time"],
        "2025-03-14T10:00:00+00:00"
    );
    assert_eq!(result["comparison"]["time_difference_seconds"], -1000);
    assert_eq!(
        result["comparison"]["recommendation"],
        "Traffic is expected to be better by 17 minutes in 2 hours. Waiting to leave could save time."
    );
}

#[tokio::test]
async fn test_forecast_over_stdio() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("departure_time", "1741975200"))
        .and(query_param("traffic_model", "pessimistic"))
        .and(query_param("mode", "transit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body(15_000, &[])))
        .expect(1)
        .mount(&upstream)
        .await;

    let frames = stdio_call(
        server_for(&upstream),
        &[tool_call(
            1,
            "get_forecast_traffic",
            json!({
                "origin": "A",
                "destination": "B",
                "departure_time": "2025-03-14T18:00:00Z",
                "mode": "transit"
            }),
        )],
    )
    .await;

    let result = content_json(&frames[0]);
    assert_eq!(result["departure_time_requested"], "2025-03-14T18:00:00Z");
    assert_eq!(result["traffic_model_used"], "pessimistic");
    assert_eq!(result["forecast_duration_in_traffic"], "in traffic");
}

#[tokio::test]
async fn test_zero_route_comparison_is_text() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ZERO_RESULTS", "routes": []})),
        )
        .mount(&upstream)
        .await;

    let (status, response) = http_call(
        server_for(&upstream),
        tool_call(
            1,
            "get_traffic_comparison",
            json!({"origin": "Honolulu, HI", "destination": "Tokyo, Japan"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.get("error").is_none());
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Unable to compare traffic"));
    assert!(text.contains("Honolulu, HI"));
}

#[tokio::test]
async fn test_upstream_failure_reported_on_both_transports() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&upstream)
        .await;
    let call = tool_call(
        3,
        "get_live_traffic",
        json!({"origin": "A", "destination": "B"}),
    );

    let (_, over_http) = http_call(server_for(&upstream), call.clone()).await;
    assert_eq!(over_http["error"]["code"], -32603);
    assert_eq!(over_http["error"]["data"]["kind"], "tool_execution_failed");
    let message = over_http["error"]["message"].as_str().unwrap();
    assert!(message.starts_with("Tool execution failed: "));
    assert!(message.contains("The provided API key is invalid."));

    let over_stdio = stdio_call(server_for(&upstream), &[call]).await;
    assert_eq!(over_stdio[0]["error"]["code"], -32603);
    assert_eq!(over_stdio[0]["error"]["message"], over_http["error"]["message"]);
}

#[tokio::test]
async fn test_unknown_tool_on_both_transports() {
    let upstream = MockServer::start().await;
    let call = tool_call(9, "unknown_tool", json!({}));

    let (_, over_http) = http_call(server_for(&upstream), call.clone()).await;
    assert_eq!(over_http["error"]["message"], "Unknown tool: unknown_tool");
    assert_eq!(over_http["error"]["data"]["kind"], "unknown_tool");

    let over_stdio = stdio_call(server_for(&upstream), &[call]).await;
    assert_eq!(over_stdio[0]["error"]["code"], -32601);
    assert_eq!(over_stdio[0]["error"]["message"], "Unknown tool: unknown_tool");
}

#[tokio::test]
async fn test_missing_arguments_never_reach_upstream() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directions_body(1, &[])))
        .expect(0)
        .mount(&upstream)
        .await;

    let frames = stdio_call(
        server_for(&upstream),
        &[tool_call(2, "get_forecast_traffic", json!({"origin": "A"}))],
    )
    .await;

    assert_eq!(frames[0]["error"]["code"], -32602);
    let message = frames[0]["error"]["message"].as_str().unwrap();
    assert!(message.contains("destination"));
    assert!(message.contains("departure_time"));
}

#[tokio::test]
async fn test_get_mcp_rejected_regardless_of_query() {
    let upstream = MockServer::start().await;
    for uri in ["/mcp", "/mcp?transport=sse", "/mcp?a=1&b=2"] {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = router(server_for(&upstream)).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_initialize_then_ping_over_stdio() {
    let upstream = MockServer::start().await;
    let frames = stdio_call(
        server_for(&upstream),
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "ping"}),
        ],
    )
    .await;

    assert_eq!(frames.len(), 2);
    let ping = frames.iter().find(|f| f["id"] == 2).unwrap();
    assert_eq!(ping["result"]["now"], "2025-03-14T08:00:00+00:00");
}
