//! CLI argument definitions for candlewick.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Fetch normalized price history |
//! | `news` | Fetch the market news feed |
//! | `search` | Search instruments by keyword |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | `CANDLEWICK_TIMEOUT_MS` or `10000` | Upstream request timeout |
//!
//! # Examples
//!
//! ```bash
//! candlewick chart MSFT --interval 1wk --range 5y --pretty
//! candlewick chart IBM --provider alphavantage --shape points --dates calendar
//! candlewick news --limit 5
//! candlewick search "tesco"
//! ```

use candlewick_core::DEFAULT_SYMBOL;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "candlewick",
    author,
    version,
    about = "Stock dashboard data from the command line"
)]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Upstream request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch price history as candles or close-price points.
    Chart(ChartArgs),
    /// Fetch market news headlines.
    News(NewsArgs),
    /// Search for symbols matching a keyword.
    Search(SearchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ChartArgs {
    #[arg(default_value = DEFAULT_SYMBOL)]
    pub symbol: String,

    /// Sampling interval: 1d, 1wk or 1mo.
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// Span: 1mo, 3mo, 6mo, 1y or 5y.
    #[arg(long, default_value = "1y")]
    pub range: String,

    /// Upstream provider: yahoo or alphavantage.
    #[arg(long, default_value = "yahoo")]
    pub provider: String,

    #[arg(long, value_enum, default_value_t = Shape::Candles)]
    pub shape: Shape,

    /// Date rendering: iso or calendar.
    #[arg(long, default_value = "iso")]
    pub dates: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Full OHLCV records.
    Candles,
    /// Close price per period.
    Points,
}

#[derive(Debug, Clone, Args)]
pub struct NewsArgs {
    /// Keep only the first N articles.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    pub query: String,
}
