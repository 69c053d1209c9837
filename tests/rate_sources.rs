//! Upstream feed clients against mocked TradeOgre and Coinbase APIs

mod common;

use std::time::Duration;

use common::test_config;
use turtle_utils::error::FetchError;
use turtle_utils::models::RatePair;
use turtle_utils::services::{CoinbaseSource, PriceComposer, RateSource, TradeOgreSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn tradeogre(server: &MockServer, timeout_secs: &str) -> TradeOgreSource {
    let config = test_config(&[
        ("TRADEOGRE_API_URL", server.uri().as_str()),
        ("TRTL_BTC_TIMEOUT_SECS", timeout_secs),
    ]);
    TradeOgreSource::new(reqwest::Client::new(), &config)
}

async fn coinbase(server: &MockServer) -> CoinbaseSource {
    let config = test_config(&[("COINBASE_API_URL", server.uri().as_str())]);
    CoinbaseSource::new(reqwest::Client::new(), &config)
}

#[tokio::test]
async fn tradeogre_ticker_price_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ticker/BTC-TRTL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "initialprice": "0.00000010",
            "price": "0.00000016",
            "high": "0.00000016",
            "low": "0.00000006",
            "volume": "17.18630467"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rate = tradeogre(&server, "3").await.fetch().await.unwrap();
    assert_eq!(rate.pair, RatePair::TrtlBtc);
    assert_eq!(rate.value, 0.00000016);
}

#[tokio::test]
async fn coinbase_spot_amount_is_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices/BTC-USD/spot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "base": "BTC", "currency": "USD", "amount": "11110.66" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rate = coinbase(&server).await.fetch().await.unwrap();
    assert_eq!(rate.pair, RatePair::BtcUsd);
    assert_eq!(rate.value, 11110.66);
}

#[tokio::test]
async fn non_numeric_price_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ticker/BTC-TRTL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "price": "n/a" })))
        .mount(&server)
        .await;

    let err = tradeogre(&server, "3").await.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { source_name: "tradeogre", .. }));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices/BTC-USD/spot"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = coinbase(&server).await.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { source_name: "coinbase", .. }));
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/prices/BTC-USD/spot"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = coinbase(&server).await.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 503, .. }));
}

#[tokio::test]
async fn slow_feed_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ticker/BTC-TRTL"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "price": "0.00000016" }))
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let err = tradeogre(&server, "1").await.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { .. }));
}

#[tokio::test]
async fn composer_over_live_clients_multiplies_rates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ticker/BTC-TRTL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "price": "0.00000016" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/prices/BTC-USD/spot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "amount": "11110.66" }
        })))
        .mount(&server)
        .await;

    let config = test_config(&[
        ("TRADEOGRE_API_URL", server.uri().as_str()),
        ("COINBASE_API_URL", server.uri().as_str()),
    ]);
    let client = reqwest::Client::new();
    let composer = PriceComposer::new(
        std::sync::Arc::new(TradeOgreSource::new(client.clone(), &config)),
        std::sync::Arc::new(CoinbaseSource::new(client, &config)),
    );

    let price = composer.compose(false).await.unwrap();
    assert_eq!(price.btc_rate(), 0.00000016);
    assert_eq!(price.usd_rate(), 0.00000016 * 11110.66);
}

#[tokio::test]
async fn tradeogre_failure_stops_before_coinbase() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ticker/BTC-TRTL"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/prices/BTC-USD/spot"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&[
        ("TRADEOGRE_API_URL", server.uri().as_str()),
        ("COINBASE_API_URL", server.uri().as_str()),
    ]);
    let client = reqwest::Client::new();
    let composer = PriceComposer::new(
        std::sync::Arc::new(TradeOgreSource::new(client.clone(), &config)),
        std::sync::Arc::new(CoinbaseSource::new(client, &config)),
    );

    let err = composer.compose(false).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "problem getting BTC price: tradeogre responded with status 500"
    );
}
