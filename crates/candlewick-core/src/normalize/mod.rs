//! # Normalizers
//!
//! Provider payloads in, canonical records out.
//!
//! | Provider | Payload | Shape |
//! |----------|---------|-------|
//! | Yahoo | [`ChartColumns`] | parallel arrays indexed by period |
//! | Alpha Vantage | [`DateKeyedSeries`] | object keyed by date string, string-encoded numbers |
//!
//! Both produce [`Candle`]s (or [`Point`]s) in ascending date order. A payload
//! that does not match its schema fails with
//! [`SourceErrorKind::MalformedPayload`](crate::SourceErrorKind::MalformedPayload);
//! nothing is returned partially.

mod columnar;
mod date_keyed;
mod news;

pub use columnar::ChartColumns;
pub use date_keyed::{DateKeyedBar, DateKeyedSeries};
pub use news::{news_items, symbol_matches};

use crate::data_source::SourceError;
use crate::{Candle, DateStyle, Point, ProviderId};

/// Raw chart payload, tagged by the provider schema it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RawChartPayload {
    Columnar(ChartColumns),
    DateKeyed(DateKeyedSeries),
}

impl RawChartPayload {
    pub const fn provider(&self) -> ProviderId {
        match self {
            Self::Columnar(_) => ProviderId::Yahoo,
            Self::DateKeyed(_) => ProviderId::AlphaVantage,
        }
    }

    /// Number of periods in the payload, before rows without prices are dropped.
    pub fn len(&self) -> usize {
        match self {
            Self::Columnar(columns) => columns.len(),
            Self::DateKeyed(series) => series.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Full OHLCV records, ascending by date.
pub fn candles(payload: &RawChartPayload, style: DateStyle) -> Result<Vec<Candle>, SourceError> {
    match payload {
        RawChartPayload::Columnar(columns) => columns.to_candles(style),
        RawChartPayload::DateKeyed(series) => series.to_candles(style),
    }
}

/// Close-price points for line charts, ascending by date.
pub fn points(payload: &RawChartPayload, style: DateStyle) -> Result<Vec<Point>, SourceError> {
    Ok(candles(payload, style)?
        .into_iter()
        .map(Point::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_variant_names_its_provider() {
        let columnar = RawChartPayload::Columnar(ChartColumns::default());
        let keyed = RawChartPayload::DateKeyed(DateKeyedSeries::default());
        assert_eq!(columnar.provider(), ProviderId::Yahoo);
        assert_eq!(keyed.provider(), ProviderId::AlphaVantage);
        assert!(columnar.is_empty());
    }
}
