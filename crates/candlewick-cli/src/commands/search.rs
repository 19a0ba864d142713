use serde::Serialize;

use candlewick_core::{MarketData, SymbolMatch};
use serde_json::Value;

use crate::cli::SearchArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SearchResponseData {
    query: String,
    results: Vec<SymbolMatch>,
}

pub async fn run(args: &SearchArgs, market: &MarketData) -> Result<Value, CliError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Command(String::from("query must not be empty")));
    }

    let results = market.search(query).await?;
    Ok(serde_json::to_value(SearchResponseData {
        query: query.to_owned(),
        results,
    })?)
}
