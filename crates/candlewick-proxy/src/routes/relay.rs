use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use std::sync::Arc;

use candlewick_core::{HttpMethod, HttpRequest, HttpResponse};

use crate::error::ProxyError;
use crate::state::AppState;

pub const PREFIX: &str = "/proxy";

// Connection-scoped headers that must not cross the relay, plus the ones the
// relay recomputes itself.
const SKIPPED_HEADERS: &[&str] = &[
    "connection",
    "content-length",
    "host",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_skipped(name: &str) -> bool {
    SKIPPED_HEADERS
        .iter()
        .any(|skipped| skipped.eq_ignore_ascii_case(name))
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/proxy/*path", any(relay))
}

/// Target URL for an incoming `/proxy/...` URI: prefix stripped, query kept.
pub fn target_url(upstream: &str, uri: &Uri) -> String {
    let path = uri.path();
    let rest = path.strip_prefix(PREFIX).unwrap_or(path);
    let mut url = format!("{}{rest}", upstream.trim_end_matches('/'));
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }
    url
}

async fn relay(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let target = target_url(&state.config.relay_upstream_url, &uri);
    let method = method.as_str().parse::<HttpMethod>().map_err(|e| {
        tracing::warn!("relay rejected {method} {target}: {e}");
        ProxyError::Relay(e.to_string())
    })?;

    let mut request = HttpRequest::new(method, target.clone())
        .with_timeout_ms(state.config.timeout_ms);
    for (name, value) in &headers {
        if is_skipped(name.as_str()) {
            continue;
        }
        let Ok(value) = value.to_str() else {
            tracing::debug!("dropping non-ascii header {name}");
            continue;
        };
        let merged = match request.headers.get(name.as_str()) {
            Some(existing) => format!("{existing}, {value}"),
            None => value.to_owned(),
        };
        request = request.with_header(name.as_str(), merged);
    }
    if !body.is_empty() {
        request = request.with_body(body.to_vec());
    }

    tracing::debug!("relaying {} {target}", method.as_str());

    let upstream = state.http.execute(request).await.map_err(|e| {
        tracing::error!("relay to {target} failed: {e}");
        ProxyError::Relay(e.to_string())
    })?;

    Ok(into_response(upstream))
}

fn into_response(upstream: HttpResponse) -> Response {
    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() =
        StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);

    let out = response.headers_mut();
    for (name, value) in &upstream.headers {
        if is_skipped(name) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            out.append(name, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_strips_prefix_and_keeps_query() {
        let uri: Uri = "/proxy/v8/finance/chart/AAPL?range=1y&interval=1d"
            .parse()
            .expect("valid uri");
        assert_eq!(
            target_url("https://query1.finance.yahoo.com/", &uri),
            "https://query1.finance.yahoo.com/v8/finance/chart/AAPL?range=1y&interval=1d"
        );
    }

    #[test]
    fn hop_by_hop_headers_are_skipped() {
        assert!(is_skipped("Host"));
        assert!(is_skipped("transfer-encoding"));
        assert!(!is_skipped("accept"));
    }

    #[test]
    fn upstream_headers_and_status_are_relayed() {
        let upstream = HttpResponse::new(404, "nope")
            .with_header("content-type", "text/plain")
            .with_header("connection", "close");

        let response = into_response(upstream);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("text/plain")
        );
        assert!(response.headers().get("connection").is_none());
    }
}
