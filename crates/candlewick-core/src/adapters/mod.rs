pub mod alphavantage;
pub mod yahoo;

pub use alphavantage::AlphaVantageAdapter;
pub use yahoo::YahooChartAdapter;
