//! # Candlewick Core
//!
//! Market data plumbing for the candlewick stock dashboard.
//!
//! ## Overview
//!
//! - **Canonical records** ([`Candle`], [`Point`], [`NewsItem`]) every provider is normalized into
//! - **Upstream adapters** for the Yahoo chart API and Alpha Vantage
//! - **Schema normalizers** for columnar and date-keyed chart payloads
//! - **Fetch sessions** so only the newest request per component is shown
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Yahoo and Alpha Vantage clients |
//! | [`client`] | [`MarketData`] facade dispatching on [`ProviderId`] |
//! | [`config`] | [`DashboardConfig`], read once from the environment |
//! | [`data_source`] | Chart request, source trait and source errors |
//! | [`domain`] | Domain models and parameter types |
//! | [`error`] | Validation errors |
//! | [`http_client`] | HTTP transport seam (reqwest or canned) |
//! | [`normalize`] | Payload to candle/point/news conversion |
//! | [`session`] | Latest-request-wins fetch state |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use candlewick_core::{ChartRequest, DashboardConfig, DateStyle, MarketData, ProviderId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let market = MarketData::from_config(&DashboardConfig::from_env());
//!     let request = ChartRequest::from_params(Some("msft"), Some("1wk"), Some("6mo"))?;
//!     let candles = market.candles(ProviderId::Yahoo, &request, DateStyle::Iso).await?;
//!     println!("{} weekly candles", candles.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │ CLI / proxies   │────▶│ MarketData       │
//! └─────────────────┘     └────────┬─────────┘
//!                                  │ ProviderId
//!                  ┌───────────────┴───────────────┐
//!                  ▼                               ▼
//!         ┌─────────────────┐             ┌─────────────────┐
//!         │YahooChartAdapter│             │ AlphaVantage    │
//!         └────────┬────────┘             └────────┬────────┘
//!                  │ RawChartPayload::Columnar     │ ::DateKeyed
//!                  └───────────────┬───────────────┘
//!                                  ▼
//!                         ┌─────────────────┐
//!                         │ normalize       │──▶ Vec<Candle> / Vec<Point>
//!                         └─────────────────┘
//! ```

pub mod adapters;
pub mod client;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod session;
pub mod source;

pub use adapters::{AlphaVantageAdapter, YahooChartAdapter};
pub use client::MarketData;
pub use config::DashboardConfig;
pub use data_source::{ChartRequest, ChartSource, SourceError, SourceErrorKind};
pub use domain::{
    parse_calendar_date, Candle, DateStyle, Interval, NewsItem, Point, Range, Symbol, SymbolMatch,
    DEFAULT_SYMBOL,
};
pub use error::ValidationError;
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    StaticHttpClient,
};
pub use normalize::{ChartColumns, DateKeyedSeries, RawChartPayload};
pub use session::{Completion, FetchError, FetchSession, FetchState, FetchTicket};
pub use source::ProviderId;
