use std::sync::Arc;

use crate::adapters::{AlphaVantageAdapter, YahooChartAdapter};
use crate::config::DashboardConfig;
use crate::data_source::{ChartRequest, ChartSource, SourceError};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::normalize::{self, RawChartPayload};
use crate::{Candle, DateStyle, NewsItem, Point, ProviderId, SymbolMatch};

/// Entry point used by the CLI and the chart proxy: one adapter per provider,
/// sharing a single HTTP client.
#[derive(Clone)]
pub struct MarketData {
    yahoo: YahooChartAdapter,
    alphavantage: AlphaVantageAdapter,
}

impl MarketData {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &DashboardConfig) -> Self {
        Self {
            yahoo: YahooChartAdapter::new(Arc::clone(&http_client), config),
            alphavantage: AlphaVantageAdapter::new(http_client, config),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn yahoo(&self) -> &YahooChartAdapter {
        &self.yahoo
    }

    pub fn alphavantage(&self) -> &AlphaVantageAdapter {
        &self.alphavantage
    }

    pub fn source(&self, provider: ProviderId) -> &dyn ChartSource {
        match provider {
            ProviderId::Yahoo => &self.yahoo,
            ProviderId::AlphaVantage => &self.alphavantage,
        }
    }

    /// Raw payload from `provider`, still in its own schema.
    pub async fn chart(
        &self,
        provider: ProviderId,
        req: &ChartRequest,
    ) -> Result<RawChartPayload, SourceError> {
        self.source(provider).chart(req).await
    }

    pub async fn candles(
        &self,
        provider: ProviderId,
        req: &ChartRequest,
        style: DateStyle,
    ) -> Result<Vec<Candle>, SourceError> {
        let payload = self.chart(provider, req).await?;
        let candles = normalize::candles(&payload, style)?;
        tracing::debug!(
            provider = %provider,
            symbol = %req.symbol,
            periods = payload.len(),
            candles = candles.len(),
            "chart normalized"
        );
        Ok(candles)
    }

    pub async fn points(
        &self,
        provider: ProviderId,
        req: &ChartRequest,
        style: DateStyle,
    ) -> Result<Vec<Point>, SourceError> {
        Ok(self
            .candles(provider, req, style)
            .await?
            .into_iter()
            .map(Point::from)
            .collect())
    }

    pub async fn news(&self) -> Result<Vec<NewsItem>, SourceError> {
        self.alphavantage.fetch_news().await
    }

    pub async fn search(&self, keywords: &str) -> Result<Vec<SymbolMatch>, SourceError> {
        self.alphavantage.search_symbol(keywords).await
    }
}
