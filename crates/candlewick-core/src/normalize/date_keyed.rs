use serde::Deserialize;
use serde_json::{Map, Value};

use crate::data_source::SourceError;
use crate::{parse_calendar_date, Candle, DateStyle, Interval};

/// Date-keyed chart payload: `date -> {"1. open": "..", ...}` with every number
/// encoded as a string. Entry order is whatever the provider sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateKeyedSeries {
    pub entries: Vec<(String, DateKeyedBar)>,
}

/// One period of a date-keyed series, still string-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateKeyedBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume", default)]
    pub volume: Option<String>,
}

impl DateKeyedSeries {
    /// Extract the series for `interval` from an Alpha Vantage `TIME_SERIES_*` body.
    ///
    /// The series key depends on the function (`Time Series (Daily)`,
    /// `Weekly Time Series`, ...); any key mentioning `Time Series` is accepted
    /// when the expected one is absent.
    pub fn from_alphavantage_body(body: &[u8], interval: Interval) -> Result<Self, SourceError> {
        let mut root: Map<String, Value> = serde_json::from_slice(body).map_err(|e| {
            SourceError::malformed(format!("failed to parse alphavantage series: {e}"))
        })?;

        let key = if root.contains_key(interval.alphavantage_series_key()) {
            Some(interval.alphavantage_series_key().to_owned())
        } else {
            root.keys().find(|key| key.contains("Time Series")).cloned()
        };
        let series = key
            .and_then(|key| root.remove(&key))
            .ok_or_else(|| SourceError::malformed("no time series data in response"))?;

        let Value::Object(series) = series else {
            return Err(SourceError::malformed("time series is not an object"));
        };

        let entries = series
            .into_iter()
            .map(|(date, bar)| {
                serde_json::from_value::<DateKeyedBar>(bar)
                    .map(|bar| (date.clone(), bar))
                    .map_err(|e| SourceError::malformed(format!("invalid bar for {date}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One candle per date key, ascending by date regardless of input order.
    pub fn to_candles(&self, style: DateStyle) -> Result<Vec<Candle>, SourceError> {
        let mut dated = Vec::with_capacity(self.entries.len());
        for (key, bar) in &self.entries {
            let day = parse_calendar_date(key)
                .map_err(|e| SourceError::malformed(format!("invalid date key '{key}': {e}")))?;
            let date = style
                .format_date(day)
                .map_err(|e| SourceError::malformed(format!("invalid date key '{key}': {e}")))?;

            let candle = Candle {
                date,
                open: parse_price(key, "open", &bar.open)?,
                high: parse_price(key, "high", &bar.high)?,
                low: parse_price(key, "low", &bar.low)?,
                close: parse_price(key, "close", &bar.close)?,
                volume: bar
                    .volume
                    .as_deref()
                    .map(|raw| parse_volume(key, raw))
                    .transpose()?
                    .unwrap_or(0),
            };
            dated.push((day, key.as_str(), candle));
        }

        dated.sort_by(|(left_day, left_key, _), (right_day, right_key, _)| {
            left_day.cmp(right_day).then_with(|| left_key.cmp(right_key))
        });
        Ok(dated.into_iter().map(|(_, _, candle)| candle).collect())
    }
}

fn parse_price(date: &str, field: &'static str, raw: &str) -> Result<f64, SourceError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            SourceError::malformed(format!("field '{field}' for {date} is not a number: '{raw}'"))
        })
}

fn parse_volume(date: &str, raw: &str) -> Result<u64, SourceError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u64>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .map(|value| value.round() as u64)
        })
        .ok_or_else(|| {
            SourceError::malformed(format!("field 'volume' for {date} is not a number: '{raw}'"))
        })
}
