use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use candlewick_core::{Candle, ChartRequest, DateStyle, ProviderId};

use crate::error::ProxyError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    interval: Option<String>,
    #[serde(default)]
    range: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/yahoo-finance", get(yahoo_finance))
}

async fn yahoo_finance(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<Vec<Candle>>, ProxyError> {
    let Query(q) = query.map_err(|rejection| ProxyError::BadRequest(rejection.body_text()))?;
    let request = ChartRequest::from_params(
        q.symbol.as_deref(),
        q.interval.as_deref(),
        q.range.as_deref(),
    )?;

    tracing::info!(
        symbol = %request.symbol,
        interval = %request.interval,
        range = %request.range,
        "fetching chart"
    );

    let candles = state
        .market
        .candles(ProviderId::Yahoo, &request, DateStyle::Iso)
        .await
        .map_err(ProxyError::chart)?;

    Ok(Json(candles))
}
