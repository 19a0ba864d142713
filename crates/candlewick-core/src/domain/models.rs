use serde::{Deserialize, Deserializer, Serialize};

/// One trading period. `low <= open, close <= high` is expected but not enforced;
/// upstream data is trusted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Single value of a line chart: the close of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub date: String,
    pub value: f64,
}

impl From<Candle> for Point {
    fn from(candle: Candle) -> Self {
        Self {
            date: candle.date,
            value: candle.close,
        }
    }
}

/// Article summary from a sentiment/news feed, in provider order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub time_published: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
}

// Feeds send `null` for fields they have no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Instrument returned by a symbol search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    pub kind: String,
    pub region: Option<String>,
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_projects_close() {
        let candle = Candle {
            date: String::from("2024-01-02"),
            open: 10.0,
            high: 12.0,
            low: 9.5,
            close: 11.25,
            volume: 300,
        };
        assert_eq!(
            Point::from(candle),
            Point {
                date: String::from("2024-01-02"),
                value: 11.25,
            }
        );
    }

    #[test]
    fn news_item_tolerates_missing_optional_fields() {
        let item: NewsItem = serde_json::from_str(
            r#"{"title":"t","url":"https://example.test/a","time_published":"20240105T133000","banner_image":null}"#,
        )
        .expect("must deserialize");
        assert!(item.authors.is_empty());
        assert!(item.summary.is_empty());
    }

    #[test]
    fn news_item_treats_null_optional_fields_as_empty() {
        let item: NewsItem = serde_json::from_str(
            r#"{"title":"t","url":"https://example.test/a","time_published":"20240105T133000","authors":null,"summary":null}"#,
        )
        .expect("must deserialize");
        assert!(item.authors.is_empty());
        assert!(item.summary.is_empty());
    }
}
