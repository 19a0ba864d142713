use candlewick_core::{ChartRequest, DateStyle, MarketData, ProviderId};
use serde_json::Value;

use crate::cli::{ChartArgs, Shape};
use crate::error::CliError;

pub async fn run(args: &ChartArgs, market: &MarketData) -> Result<Value, CliError> {
    let request = ChartRequest::from_params(
        Some(args.symbol.as_str()),
        Some(args.interval.as_str()),
        Some(args.range.as_str()),
    )?;
    let provider = args.provider.parse::<ProviderId>()?;
    let style = args.dates.parse::<DateStyle>()?;

    let data = match args.shape {
        Shape::Candles => serde_json::to_value(market.candles(provider, &request, style).await?)?,
        Shape::Points => serde_json::to_value(market.points(provider, &request, style).await?)?,
    };
    Ok(data)
}
