use serde::Deserialize;

use crate::data_source::SourceError;
use crate::{Candle, DateStyle};

/// Parallel-array chart payload: one timestamp column plus OHLCV columns
/// indexed identically. Yahoo reports periods without trades as `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartColumns {
    /// Period starts, seconds since the Unix epoch.
    pub timestamps: Vec<i64>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub volume: Vec<Option<f64>>,
}

impl ChartColumns {
    /// Extract the columns from a Yahoo `v8/finance/chart` response body.
    pub fn from_yahoo_body(body: &[u8]) -> Result<Self, SourceError> {
        let response: YahooChartResponse = serde_json::from_slice(body)
            .map_err(|e| SourceError::malformed(format!("failed to parse yahoo chart: {e}")))?;

        if let Some(error) = response.chart.error {
            return Err(SourceError::upstream(format!(
                "yahoo chart API error: {}",
                error.description.unwrap_or(error.code)
            )));
        }

        let result = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| SourceError::malformed("no chart result in response"))?;
        let timestamps = result
            .timestamp
            .ok_or_else(|| SourceError::malformed("no timestamp data in chart result"))?;
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::malformed("no quote data in chart result"))?;

        Ok(Self {
            timestamps,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Every value column must be as long as the timestamp column.
    pub fn validate(&self) -> Result<(), SourceError> {
        let expected = self.timestamps.len();
        let columns = [
            ("open", self.open.len()),
            ("high", self.high.len()),
            ("low", self.low.len()),
            ("close", self.close.len()),
            ("volume", self.volume.len()),
        ];
        for (name, len) in columns {
            if len != expected {
                return Err(SourceError::malformed(format!(
                    "column '{name}' has {len} values for {expected} timestamps"
                )));
            }
        }
        Ok(())
    }

    /// One candle per index, ascending by timestamp.
    ///
    /// Rows missing any price are dropped; a missing volume counts as zero.
    pub fn to_candles(&self, style: DateStyle) -> Result<Vec<Candle>, SourceError> {
        self.validate()?;

        let mut order = (0..self.len()).collect::<Vec<_>>();
        order.sort_by_key(|&index| self.timestamps[index]);

        let mut candles = Vec::with_capacity(order.len());
        let mut skipped = 0_usize;
        for index in order {
            let (Some(open), Some(high), Some(low), Some(close)) = (
                self.open[index],
                self.high[index],
                self.low[index],
                self.close[index],
            ) else {
                skipped += 1;
                continue;
            };

            let ts = self.timestamps[index];
            let date = style
                .format_unix(ts)
                .map_err(|e| SourceError::malformed(format!("invalid timestamp {ts}: {e}")))?;

            candles.push(Candle {
                date,
                open,
                high,
                low,
                close,
                volume: self.volume[index].map(volume_from_f64).unwrap_or(0),
            });
        }

        if skipped > 0 {
            tracing::debug!(skipped, "dropped chart periods without prices");
        }

        Ok(candles)
    }
}

fn volume_from_f64(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: YahooChartIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
