mod chart;
mod news;
mod search;

use candlewick_core::{DashboardConfig, MarketData};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let mut config = DashboardConfig::from_env();
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    tracing::debug!(?config, "resolved configuration");

    let market = MarketData::from_config(&config);

    match &cli.command {
        Command::Chart(args) => chart::run(args, &market).await,
        Command::News(args) => news::run(args, &market).await,
        Command::Search(args) => search::run(args, &market).await,
    }
}
