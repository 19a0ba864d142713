use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data_source::{ChartRequest, ChartSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::normalize::{ChartColumns, RawChartPayload};
use crate::ProviderId;

/// Upstream client for the Yahoo `v8/finance/chart` endpoint.
///
/// The base URL comes from config, so the same adapter talks to Yahoo directly
/// or through the relay proxy.
#[derive(Clone)]
pub struct YahooChartAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl YahooChartAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &DashboardConfig) -> Self {
        Self {
            http_client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_owned(),
            timeout_ms: config.timeout_ms,
        }
    }

    pub fn chart_url(&self, req: &ChartRequest) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            self.base_url,
            urlencoding::encode(req.symbol.as_str()),
            req.range.as_str(),
            req.interval.as_str(),
        )
    }

    pub async fn fetch_chart(&self, req: &ChartRequest) -> Result<RawChartPayload, SourceError> {
        self.fetch_columns(req).await.map(RawChartPayload::Columnar)
    }

    /// Fetch the parallel-array chart payload for `req`.
    ///
    /// Non-success statuses fail as `Upstream` carrying the status text; a body
    /// without `chart.result[0].timestamp` / `indicators.quote[0]` fails as
    /// `MalformedPayload`. Nothing is retried.
    pub async fn fetch_columns(&self, req: &ChartRequest) -> Result<ChartColumns, SourceError> {
        self.try_fetch_columns(req).await.inspect_err(|error| {
            tracing::warn!(
                symbol = %req.symbol,
                interval = %req.interval,
                range = %req.range,
                code = error.code(),
                "yahoo chart fetch failed: {}",
                error.message()
            );
        })
    }

    async fn try_fetch_columns(&self, req: &ChartRequest) -> Result<ChartColumns, SourceError> {
        let request = HttpRequest::get(self.chart_url(req))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| SourceError::upstream(format!("yahoo transport error: {}", e.message())))?;

        if !response.is_success() {
            return Err(SourceError::upstream(format!(
                "Yahoo Finance API error: {}",
                response.status_text()
            )));
        }

        ChartColumns::from_yahoo_body(&response.body)
    }
}

impl ChartSource for YahooChartAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn chart<'a>(
        &'a self,
        req: &'a ChartRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RawChartPayload, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_chart(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::http_client::StaticHttpClient;
    use crate::{Interval, Range, Symbol};

    fn adapter(client: Arc<StaticHttpClient>) -> YahooChartAdapter {
        let config = DashboardConfig {
            yahoo_base_url: String::from("http://localhost:3000/proxy/"),
            ..DashboardConfig::default()
        };
        YahooChartAdapter::new(client, &config)
    }

    #[test]
    fn chart_url_carries_symbol_range_and_interval() {
        let adapter = adapter(Arc::new(StaticHttpClient::ok_json("{}")));
        let request = ChartRequest::new(
            Symbol::parse("^gspc").expect("valid symbol"),
            Interval::Weekly,
            Range::FiveYears,
        );

        assert_eq!(
            adapter.chart_url(&request),
            "http://localhost:3000/proxy/v8/finance/chart/%5EGSPC?range=5y&interval=1wk&includePrePost=false"
        );
    }

    #[tokio::test]
    async fn transport_failure_is_upstream_error() {
        let client = Arc::new(StaticHttpClient::failing("connection refused"));
        let adapter = adapter(Arc::clone(&client));

        let error = adapter
            .fetch_columns(&ChartRequest::default())
            .await
            .expect_err("must fail");

        assert_eq!(error.kind(), SourceErrorKind::Upstream);
        assert!(error.message().contains("connection refused"));
        assert_eq!(client.recorded_requests().len(), 1, "no retry");
    }
}
