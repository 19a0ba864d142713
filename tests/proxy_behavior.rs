//! Behavior tests for the chart proxy and the generic relay.
//!
//! Routers are driven in-process with `tower::ServiceExt::oneshot`; upstream
//! calls go to a canned HTTP client.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use candlewick_core::{DashboardConfig, HttpMethod, HttpResponse, StaticHttpClient};
use candlewick_proxy::{chart_router, relay_router, AppState};

const TWO_DAY_CHART: &str = r#"{"chart":{"result":[{"timestamp":[1700000000,1700086400],"indicators":{"quote":[{"open":[100,102],"high":[105,107],"low":[99,101],"close":[103,104],"volume":[1000,1200]}]}}],"error":null}}"#;

fn chart_app(client: Arc<StaticHttpClient>) -> Router {
    chart_router(AppState::new(DashboardConfig::default(), client))
}

fn relay_app(client: Arc<StaticHttpClient>) -> Router {
    let config = DashboardConfig {
        relay_upstream_url: String::from("https://upstream.example.test"),
        ..DashboardConfig::default()
    };
    relay_router(AppState::new(config, client))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("json body")
}

// =============================================================================
// Chart proxy
// =============================================================================

#[tokio::test]
async fn when_symbol_is_missing_chart_proxy_answers_400() {
    // Given: a chart proxy with a healthy upstream
    let client = Arc::new(StaticHttpClient::ok_json(TWO_DAY_CHART));
    let app = chart_app(client.clone());

    // When: no symbol is passed
    let (status, body) = send(app, get("/api/yahoo-finance?interval=1d")).await;

    // Then: 400 with the documented body and no upstream call
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body), serde_json::json!({ "error": "Stock symbol is required" }));
    assert!(client.recorded_requests().is_empty());
}

#[tokio::test]
async fn when_symbol_is_blank_chart_proxy_answers_400() {
    let client = Arc::new(StaticHttpClient::ok_json(TWO_DAY_CHART));

    let (status, body) = send(chart_app(client), get("/api/yahoo-finance?symbol=")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"], "Stock symbol is required");
}

#[tokio::test]
async fn when_interval_is_unknown_chart_proxy_answers_400() {
    let client = Arc::new(StaticHttpClient::ok_json(TWO_DAY_CHART));

    let (status, body) = send(
        chart_app(client),
        get("/api/yahoo-finance?symbol=AAPL&interval=5m"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("5m")));
}

#[tokio::test]
async fn when_upstream_succeeds_chart_proxy_returns_candles() {
    // Given: a two-period upstream chart
    let client = Arc::new(StaticHttpClient::ok_json(TWO_DAY_CHART));

    // When: only the symbol is given
    let (status, body) = send(
        chart_app(client.clone()),
        get("/api/yahoo-finance?symbol=aapl"),
    )
    .await;

    // Then: candles with ISO dates, defaults applied upstream
    assert_eq!(status, StatusCode::OK);
    let candles = json(&body);
    assert_eq!(candles.as_array().map(Vec::len), Some(2));
    assert_eq!(candles[0]["date"], "2023-11-14T22:13:20.000Z");
    assert_eq!(candles[0]["open"], 100.0);
    assert_eq!(candles[1]["volume"], 1200);
    assert!(client.recorded_requests()[0]
        .url
        .ends_with("/v8/finance/chart/AAPL?range=1y&interval=1d&includePrePost=false"));
}

#[tokio::test]
async fn when_upstream_returns_404_chart_proxy_answers_500() {
    // Given: the chart API does not know the symbol
    let client = Arc::new(StaticHttpClient::status(404, "Not Found"));

    // When
    let (status, body) = send(chart_app(client), get("/api/yahoo-finance?symbol=NOPE")).await;

    // Then: 500 with an error field and the upstream detail
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = json(&body);
    assert_eq!(body["error"], "Failed to fetch data from Yahoo Finance");
    assert_eq!(body["details"], "Yahoo Finance API error: Not Found");
}

#[tokio::test]
async fn when_upstream_payload_is_malformed_details_stay_generic() {
    // Given: a chart response without results
    let client = Arc::new(StaticHttpClient::ok_json(r#"{"chart":{"result":[]}}"#));

    // When
    let (status, body) = send(chart_app(client), get("/api/yahoo-finance?symbol=AAPL")).await;

    // Then
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["details"], "Invalid data format from Yahoo Finance");
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let client = Arc::new(StaticHttpClient::ok_json("{}"));

    let (status, body) = send(chart_app(client), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "ok");
}

#[tokio::test]
async fn when_symbol_is_repeated_chart_proxy_answers_json_400() {
    // Given: a chart proxy with a healthy upstream
    let client = Arc::new(StaticHttpClient::ok_json(TWO_DAY_CHART));

    // When: the query string carries two symbols
    let (status, body) = send(
        chart_app(client.clone()),
        get("/api/yahoo-finance?symbol=AAPL&symbol=MSFT"),
    )
    .await;

    // Then: the rejection uses the same JSON error body as other 400s
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["error"].is_string());
    assert!(client.recorded_requests().is_empty());
}

#[tokio::test]
async fn when_symbol_is_an_option_contract_it_reaches_upstream() {
    // Given: a chart proxy with a healthy upstream
    let client = Arc::new(StaticHttpClient::ok_json(TWO_DAY_CHART));

    // When: a 19-character option symbol and a spaced ticker are requested
    let (option_status, _) = send(
        chart_app(client.clone()),
        get("/api/yahoo-finance?symbol=aapl250117c00150000"),
    )
    .await;
    let (spaced_status, _) = send(
        chart_app(client.clone()),
        get("/api/yahoo-finance?symbol=VOD%20L"),
    )
    .await;

    // Then: both are passed through, upper-cased and percent-encoded
    assert_eq!(option_status, StatusCode::OK);
    assert_eq!(spaced_status, StatusCode::OK);
    let requests = client.recorded_requests();
    assert!(requests[0]
        .url
        .contains("/v8/finance/chart/AAPL250117C00150000?"));
    assert!(requests[1].url.contains("/v8/finance/chart/VOD%20L?"));
}

// =============================================================================
// Relay
// =============================================================================

#[tokio::test]
async fn when_relaying_prefix_is_stripped_and_query_kept() {
    // Given: an upstream that answers 200 with a content type
    let client = Arc::new(StaticHttpClient::new(Ok(HttpResponse::new(
        200,
        r#"{"ok":true}"#,
    )
    .with_header("content-type", "application/json")
    .with_header("transfer-encoding", "chunked"))));
    let app = relay_app(client.clone());

    // When: a chart path is requested through the relay
    let request = Request::builder()
        .uri("/proxy/v8/finance/chart/AAPL?range=1mo&interval=1d")
        .header("accept", "application/json")
        .header("host", "localhost:3000")
        .body(Body::empty())
        .expect("valid request");
    let response = app.oneshot(request).await.expect("router is infallible");

    // Then: status, content type and body are relayed verbatim
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    assert!(response.headers().get("transfer-encoding").is_none());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(&body[..], br#"{"ok":true}"#);

    // And: the upstream saw the stripped path, the query and the accept header only
    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url,
        "https://upstream.example.test/v8/finance/chart/AAPL?range=1mo&interval=1d"
    );
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[0].headers.get("accept").map(String::as_str), Some("application/json"));
    assert!(!requests[0].headers.contains_key("host"));
}

#[tokio::test]
async fn when_relaying_post_body_and_upstream_status_pass_through() {
    // Given: an upstream that rejects the request
    let client = Arc::new(StaticHttpClient::status(422, "bad input"));
    let app = relay_app(client.clone());

    // When: a POST with a body is relayed
    let request = Request::builder()
        .method(Method::POST)
        .uri("/proxy/v1/finance/search")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"q":"AAPL"}"#))
        .expect("valid request");
    let (status, body) = send(app, request).await;

    // Then
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, b"bad input");
    let requests = client.recorded_requests();
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].body.as_deref(), Some(br#"{"q":"AAPL"}"#.as_slice()));
}

#[tokio::test]
async fn when_relay_upstream_is_unreachable_relay_answers_500() {
    // Given: a transport that cannot connect
    let client = Arc::new(StaticHttpClient::failing("connection failed: dns error"));

    // When
    let (status, body) = send(relay_app(client.clone()), get("/proxy/v8/finance/chart/AAPL")).await;

    // Then: a plain 500 and exactly one attempt
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, b"Proxy server error");
    assert_eq!(client.recorded_requests().len(), 1);
}
