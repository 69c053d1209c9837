use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::error::FetchError;
use crate::models::{Rate, RatePair};

/// An upstream quote for one exchange ratio.
///
/// Implementations make a single attempt bounded by their own timeout and
/// never retry.
#[async_trait]
pub trait RateSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Rate, FetchError>;
}

/// TRTL→BTC from the TradeOgre ticker
#[derive(Clone)]
pub struct TradeOgreSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl TradeOgreSource {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            url: format!("{}/ticker/BTC-TRTL", config.tradeogre_api_url.trim_end_matches('/')),
            timeout: config.trtl_btc_timeout(),
        }
    }
}

#[async_trait]
impl RateSource for TradeOgreSource {
    fn name(&self) -> &'static str {
        "tradeogre"
    }

    async fn fetch(&self) -> Result<Rate, FetchError> {
        // {"initialprice":"0.00000010","price":"0.00000016","high":"0.00000016","low":"0.00000006","volume":"17.18630467"}
        #[derive(Deserialize)]
        struct Ticker {
            price: String,
        }

        let ticker: Ticker = get_json(&self.client, &self.url, self.timeout, self.name()).await?;
        let value = parse_rate(&ticker.price, self.name())?;
        tracing::debug!("TRTL/BTC rate from {}: {}", self.name(), value);
        Ok(Rate::new(RatePair::TrtlBtc, value))
    }
}

/// BTC→USD from the Coinbase spot price
#[derive(Clone)]
pub struct CoinbaseSource {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl CoinbaseSource {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            url: format!("{}/prices/BTC-USD/spot", config.coinbase_api_url.trim_end_matches('/')),
            timeout: config.btc_usd_timeout(),
        }
    }
}

#[async_trait]
impl RateSource for CoinbaseSource {
    fn name(&self) -> &'static str {
        "coinbase"
    }

    async fn fetch(&self) -> Result<Rate, FetchError> {
        // {"data":{"base":"BTC","currency":"USD","amount":"11110.66"}}
        #[derive(Deserialize)]
        struct Spot {
            amount: String,
        }
        #[derive(Deserialize)]
        struct SpotResponse {
            data: Spot,
        }

        let spot: SpotResponse = get_json(&self.client, &self.url, self.timeout, self.name()).await?;
        let value = parse_rate(&spot.data.amount, self.name())?;
        tracing::debug!("BTC/USD rate from {}: {}", self.name(), value);
        Ok(Rate::new(RatePair::BtcUsd, value))
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    source_name: &'static str,
) -> Result<T, FetchError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| FetchError::Transport {
            source_name,
            message: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            source_name,
            status: response.status().as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Transport {
        source_name,
        message: e.to_string(),
    })?;

    serde_json::from_str(&body).map_err(|e| FetchError::Parse {
        source_name,
        message: e.to_string(),
    })
}

/// Upstream feeds quote prices as decimal strings
fn parse_rate(raw: &str, source_name: &'static str) -> Result<f64, FetchError> {
    let value: f64 = raw.trim().parse().map_err(|_| FetchError::Parse {
        source_name,
        message: format!("{:?} is not a number", raw),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(FetchError::Parse {
            source_name,
            message: format!("{} is not a valid rate", value),
        });
    }

    Ok(value)
}
