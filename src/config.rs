use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    // Upstream price feeds
    pub tradeogre_api_url: String,
    pub coinbase_api_url: String,
    pub trtl_btc_timeout_secs: u64,
    pub btc_usd_timeout_secs: u64,
    // Threshold callbacks
    pub callback_timeout_secs: u64,
    pub threshold_workers: usize,
    pub threshold_queue_capacity: usize,
    // CORS configuration
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        // Try to load .env from current directory first, then parent
        if dotenvy::dotenv().is_err() {
            let _ = dotenvy::from_path(std::path::Path::new("../.env"));
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = lookup("PORT")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Config("Must set $PORT".to_string()))?
            .parse()
            .map_err(|_| AppError::Config("PORT must be a number".to_string()))?;

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            tradeogre_api_url: lookup("TRADEOGRE_API_URL")
                .unwrap_or_else(|| "https://tradeogre.com/api/v1".to_string()),
            coinbase_api_url: lookup("COINBASE_API_URL")
                .unwrap_or_else(|| "https://api.coinbase.com/v2".to_string()),
            trtl_btc_timeout_secs: parse_or(&lookup, "TRTL_BTC_TIMEOUT_SECS", 3)?,
            btc_usd_timeout_secs: parse_or(&lookup, "BTC_USD_TIMEOUT_SECS", 2)?,
            callback_timeout_secs: parse_or(&lookup, "CALLBACK_TIMEOUT_SECS", 10)?,
            threshold_workers: parse_or(&lookup, "THRESHOLD_WORKERS", 8)?,
            threshold_queue_capacity: parse_or(&lookup, "THRESHOLD_QUEUE_CAPACITY", 256)?,
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn trtl_btc_timeout(&self) -> Duration {
        Duration::from_secs(self.trtl_btc_timeout_secs)
    }

    pub fn btc_usd_timeout(&self) -> Duration {
        Duration::from_secs(self.btc_usd_timeout_secs)
    }

    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number", key))),
        _ => Ok(default),
    }
}
