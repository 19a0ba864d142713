use candlewick_core::MarketData;
use serde_json::Value;

use crate::cli::NewsArgs;
use crate::error::CliError;

pub async fn run(args: &NewsArgs, market: &MarketData) -> Result<Value, CliError> {
    if args.limit == Some(0) {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }

    let mut items = market.news().await?;
    if let Some(limit) = args.limit {
        items.truncate(limit);
    }
    Ok(serde_json::to_value(items)?)
}
