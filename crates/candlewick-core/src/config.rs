use std::env;

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_ALPHAVANTAGE_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_NEWS_TOPICS: &str = "financial_markets";
pub const DEFAULT_CHART_PORT: u16 = 5000;
pub const DEFAULT_RELAY_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Process-wide configuration, built once and handed to each collaborator.
///
/// Nothing below this struct reads the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub bind: String,
    /// Port of the chart proxy process.
    pub chart_port: u16,
    /// Port of the generic relay process.
    pub relay_port: u16,

    /// Base URL of the chart API. May point at the relay (`http://host:3000/proxy`).
    pub yahoo_base_url: String,
    /// Host the relay forwards `/proxy/...` to.
    pub relay_upstream_url: String,
    pub alphavantage_base_url: String,
    pub alphavantage_api_key: String,
    pub news_topics: String,

    pub timeout_ms: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: String::from("127.0.0.1"),
            chart_port: DEFAULT_CHART_PORT,
            relay_port: DEFAULT_RELAY_PORT,
            yahoo_base_url: String::from(DEFAULT_YAHOO_BASE_URL),
            relay_upstream_url: String::from(DEFAULT_YAHOO_BASE_URL),
            alphavantage_base_url: String::from(DEFAULT_ALPHAVANTAGE_BASE_URL),
            alphavantage_api_key: String::from("demo"),
            news_topics: String::from(DEFAULT_NEWS_TOPICS),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

// The API key is a secret; keep it out of `{:?}` output and logs.
impl std::fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("bind", &self.bind)
            .field("chart_port", &self.chart_port)
            .field("relay_port", &self.relay_port)
            .field("yahoo_base_url", &self.yahoo_base_url)
            .field("relay_upstream_url", &self.relay_upstream_url)
            .field("alphavantage_base_url", &self.alphavantage_base_url)
            .field("alphavantage_api_key", &"<redacted>")
            .field("news_topics", &self.news_topics)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn trim_base_url(value: String) -> String {
    value.trim_end_matches('/').to_owned()
}

impl DashboardConfig {
    /// Read `CANDLEWICK_*` variables, falling back to [`Default`] values.
    ///
    /// The relay port also honours the conventional `PORT` variable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let relay_port = env_u16(
            "CANDLEWICK_RELAY_PORT",
            env_u16("PORT", defaults.relay_port),
        );

        Self {
            bind: env_str("CANDLEWICK_BIND", &defaults.bind),
            chart_port: env_u16("CANDLEWICK_CHART_PORT", defaults.chart_port),
            relay_port,
            yahoo_base_url: trim_base_url(env_str(
                "CANDLEWICK_YAHOO_BASE_URL",
                &defaults.yahoo_base_url,
            )),
            relay_upstream_url: trim_base_url(env_str(
                "CANDLEWICK_RELAY_UPSTREAM_URL",
                &defaults.relay_upstream_url,
            )),
            alphavantage_base_url: trim_base_url(env_str(
                "CANDLEWICK_ALPHAVANTAGE_BASE_URL",
                &defaults.alphavantage_base_url,
            )),
            alphavantage_api_key: env_str(
                "CANDLEWICK_ALPHAVANTAGE_API_KEY",
                &defaults.alphavantage_api_key,
            ),
            news_topics: env_str("CANDLEWICK_NEWS_TOPICS", &defaults.news_topics),
            timeout_ms: env_u64("CANDLEWICK_TIMEOUT_MS", defaults.timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxies_default_to_distinct_ports() {
        let config = DashboardConfig::default();
        assert_ne!(config.chart_port, config.relay_port);
        assert_eq!(config.chart_port, 5000);
        assert_eq!(config.relay_port, 3000);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = DashboardConfig {
            alphavantage_api_key: String::from("very-secret"),
            ..DashboardConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn base_urls_lose_trailing_slashes() {
        assert_eq!(
            trim_base_url(String::from("http://localhost:3000/proxy/")),
            "http://localhost:3000/proxy"
        );
    }
}
