use serde::Deserialize;
use serde_json::Value;

use crate::data_source::SourceError;
use crate::{NewsItem, SymbolMatch};

#[derive(Debug, Deserialize)]
struct NewsFeed {
    #[serde(default)]
    feed: Option<Vec<Value>>,
}

/// Article summaries from a `NEWS_SENTIMENT` body, in provider order.
///
/// A body without a `feed` (or with `feed: null`) yields an empty list. An
/// article without a title, url or publish time is skipped; the rest are kept.
pub fn news_items(body: &[u8]) -> Result<Vec<NewsItem>, SourceError> {
    let feed: NewsFeed = serde_json::from_slice(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse news feed: {e}")))?;

    let mut items = Vec::new();
    for (index, article) in feed.feed.unwrap_or_default().into_iter().enumerate() {
        match serde_json::from_value::<NewsItem>(article) {
            Ok(item) => items.push(item),
            Err(error) => tracing::debug!(index, %error, "skipping unusable news article"),
        }
    }
    Ok(items)
}

#[derive(Debug, Deserialize)]
struct SymbolSearch {
    #[serde(rename = "bestMatches", default)]
    best_matches: Vec<SymbolSearchMatch>,
}

#[derive(Debug, Deserialize)]
struct SymbolSearchMatch {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
    #[serde(rename = "3. type")]
    kind: String,
    #[serde(rename = "4. region", default)]
    region: Option<String>,
    #[serde(rename = "8. currency", default)]
    currency: Option<String>,
}

/// Instruments from a `SYMBOL_SEARCH` body, best match first.
pub fn symbol_matches(body: &[u8]) -> Result<Vec<SymbolMatch>, SourceError> {
    let search: SymbolSearch = serde_json::from_slice(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse symbol search: {e}")))?;

    Ok(search
        .best_matches
        .into_iter()
        .map(|hit| SymbolMatch {
            symbol: hit.symbol,
            name: hit.name,
            kind: hit.kind,
            region: hit.region,
            currency: hit.currency,
        })
        .collect())
}
