use std::time::Duration;

use clap::Parser;
use exchange_rate_ox::ExchangeRate;

/// Command line and environment configuration of the MCP server.
#[derive(Clone, Parser)]
#[command(name = "currency-mcp", version, about = "Currency conversion MCP server over stdio")]
pub struct Config {
    /// ExchangeRate API credential
    #[arg(
        long,
        env = "EXCHANGE_API_KEY",
        default_value = "YOUR_KEY_HERE",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub api_key: String,

    /// Base URL of the ExchangeRate API
    #[arg(long, env = "EXCHANGE_API_BASE_URL", default_value = exchange_rate_ox::BASE_URL)]
    pub base_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "EXCHANGE_API_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log filter directive, e.g. `info` or `exchange_rate_ox=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn client(&self) -> ExchangeRate {
        ExchangeRate::builder()
            .api_key(self.api_key.clone())
            .base_url(self.base_url.clone())
            .timeout(self.timeout())
            .build()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}
