//! Shared helpers for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use turtle_utils::config::Config;
use turtle_utils::error::FetchError;
use turtle_utils::models::{Rate, RatePair};
use turtle_utils::services::{PriceComposer, RateSource};
use wiremock::MockServer;

/// Rate source that always returns the same value
pub struct FixedRate {
    pair: RatePair,
    value: f64,
    pub calls: AtomicUsize,
}

impl FixedRate {
    pub fn new(pair: RatePair, value: f64) -> Arc<Self> {
        Arc::new(Self {
            pair,
            value,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for FixedRate {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn fetch(&self) -> Result<Rate, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Rate::new(self.pair, self.value))
    }
}

/// Rate source that always fails with a transport error
pub struct UnreachableRate;

#[async_trait]
impl RateSource for UnreachableRate {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn fetch(&self) -> Result<Rate, FetchError> {
        Err(FetchError::Transport {
            source_name: "unreachable",
            message: "connection refused".to_string(),
        })
    }
}

pub fn fixed_composer(trtl_btc: f64, btc_usd: f64) -> PriceComposer {
    PriceComposer::new(
        FixedRate::new(RatePair::TrtlBtc, trtl_btc),
        FixedRate::new(RatePair::BtcUsd, btc_usd),
    )
}

pub fn failing_composer() -> PriceComposer {
    PriceComposer::new(
        Arc::new(UnreachableRate),
        FixedRate::new(RatePair::BtcUsd, 10000.0),
    )
}

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("PORT".into(), "0".into());
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// Poll a mock server until it has seen `count` requests or a second passes
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<wiremock::Request> {
    for _ in 0..50 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.received_requests().await.unwrap_or_default()
}
