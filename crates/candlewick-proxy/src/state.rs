use std::sync::Arc;

use candlewick_core::{DashboardConfig, HttpClient, MarketData};

/// Shared application state, passed to all route handlers via `axum::extract::State`.
///
/// Immutable after startup; handlers keep no per-request state here.
pub struct AppState {
    pub config: DashboardConfig,
    pub http: Arc<dyn HttpClient>,
    pub market: MarketData,
}

impl AppState {
    pub fn new(config: DashboardConfig, http: Arc<dyn HttpClient>) -> Arc<Self> {
        let market = MarketData::new(Arc::clone(&http), &config);
        Arc::new(Self {
            config,
            http,
            market,
        })
    }
}
