pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use services::{
    CallbackDispatcher, CoinbaseSource, Converter, PriceComposer, ThresholdEngine, ThresholdQueue,
    TradeOgreSource,
};

#[derive(Clone)]
pub struct AppState {
    pub composer: PriceComposer,
    pub converter: Converter,
    pub thresholds: ThresholdQueue,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the services together around an existing composer.
    /// Starts the threshold pool, so it must run inside a Tokio runtime.
    pub fn new(config: Config, composer: PriceComposer, client: reqwest::Client) -> Self {
        let dispatcher = CallbackDispatcher::new(client, config.callback_timeout());
        let thresholds = ThresholdEngine::new(composer.clone(), dispatcher)
            .spawn(config.threshold_workers, config.threshold_queue_capacity);

        Self {
            converter: Converter::new(composer.clone()),
            composer,
            thresholds,
            config: Arc::new(config),
        }
    }

    /// State backed by the live TradeOgre and Coinbase feeds
    pub fn from_config(config: Config) -> Self {
        let client = reqwest::Client::new();
        let composer = PriceComposer::new(
            Arc::new(TradeOgreSource::new(client.clone(), &config)),
            Arc::new(CoinbaseSource::new(client.clone(), &config)),
        );
        Self::new(config, composer, client)
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(health_check))
        .route("/price", get(handlers::get_price))
        .route("/convert", get(handlers::convert_trtl))
        .route("/threshold", post(handlers::submit_threshold))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE])
}
