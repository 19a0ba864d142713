use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::DashboardConfig;
use crate::data_source::{ChartRequest, ChartSource, SourceError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::normalize::{self, DateKeyedSeries, RawChartPayload};
use crate::{Interval, NewsItem, ProviderId, Symbol, SymbolMatch};

/// Upstream client for the Alpha Vantage `query` endpoint: date-keyed time
/// series, news sentiment, and symbol search.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    api_key: String,
    news_topics: String,
    timeout_ms: u64,
}

impl AlphaVantageAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &DashboardConfig) -> Self {
        Self {
            http_client,
            base_url: config.alphavantage_base_url.trim_end_matches('/').to_owned(),
            api_key: config.alphavantage_api_key.clone(),
            news_topics: config.news_topics.clone(),
            timeout_ms: config.timeout_ms,
        }
    }

    /// Fetch the daily/weekly/monthly series for `symbol`.
    pub async fn fetch_time_series(
        &self,
        symbol: &Symbol,
        interval: Interval,
    ) -> Result<RawChartPayload, SourceError> {
        let function = interval.alphavantage_function();
        let body = self
            .query(function, &[("symbol", symbol.as_str())])
            .await?;
        DateKeyedSeries::from_alphavantage_body(&body, interval)
            .map(RawChartPayload::DateKeyed)
            .inspect_err(|error| log_failure(function, error))
    }

    /// Fetch the news feed for the configured topics.
    pub async fn fetch_news(&self) -> Result<Vec<NewsItem>, SourceError> {
        let body = self
            .query("NEWS_SENTIMENT", &[("topics", self.news_topics.as_str())])
            .await?;
        normalize::news_items(&body).inspect_err(|error| log_failure("NEWS_SENTIMENT", error))
    }

    /// Search instruments by keyword.
    pub async fn search_symbol(&self, keywords: &str) -> Result<Vec<SymbolMatch>, SourceError> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Err(SourceError::invalid_request(
                "symbol search keywords must not be empty",
            ));
        }

        let body = self
            .query("SYMBOL_SEARCH", &[("keywords", keywords)])
            .await?;
        normalize::symbol_matches(&body).inspect_err(|error| log_failure("SYMBOL_SEARCH", error))
    }

    fn query_url(&self, function: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/query?function={function}", self.base_url);
        for (name, value) in params {
            url.push('&');
            url.push_str(name);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url.push_str("&apikey=");
        url.push_str(&urlencoding::encode(&self.api_key));
        url
    }

    // The URL carries the API key, so failures are logged by function name only.
    async fn query(&self, function: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, SourceError> {
        let request = HttpRequest::get(self.query_url(function, params))
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let result = async {
            let response = self.http_client.execute(request).await.map_err(|e| {
                SourceError::upstream(format!("alphavantage transport error: {}", e.message()))
            })?;

            if !response.is_success() {
                return Err(SourceError::upstream(format!(
                    "alphavantage returned status {} {}",
                    response.status,
                    response.status_text()
                )));
            }

            check_notice(&response.body)?;
            Ok(response.body)
        }
        .await;

        result.inspect_err(|error| log_failure(function, error))
    }
}

impl ChartSource for AlphaVantageAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::AlphaVantage
    }

    fn chart<'a>(
        &'a self,
        req: &'a ChartRequest,
    ) -> Pin<Box<dyn Future<Output = Result<RawChartPayload, SourceError>> + Send + 'a>> {
        Box::pin(self.fetch_time_series(&req.symbol, req.interval))
    }
}

/// Alpha Vantage reports bad symbols, rate limits and key problems with HTTP 200
/// and one of these top-level fields.
#[derive(Debug, Default, Deserialize)]
struct AlphaVantageNotice {
    #[serde(rename = "Error Message", default)]
    error_message: Option<String>,
    #[serde(rename = "Note", default)]
    note: Option<String>,
    #[serde(rename = "Information", default)]
    information: Option<String>,
}

fn check_notice(body: &[u8]) -> Result<(), SourceError> {
    let notice = serde_json::from_slice::<AlphaVantageNotice>(body).unwrap_or_default();
    match notice.error_message.or(notice.note).or(notice.information) {
        Some(message) => Err(SourceError::upstream(format!("alphavantage: {message}"))),
        None => Ok(()),
    }
}

fn log_failure(function: &str, error: &SourceError) {
    tracing::warn!(
        function,
        code = error.code(),
        "alphavantage request failed: {}",
        error.message()
    );
}
