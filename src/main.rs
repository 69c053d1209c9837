use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use turtle_utils::{config::Config, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🐢 Turtle price service starting...");

    let config = Config::from_env()?;
    let addr = config.server_addr();
    tracing::info!(
        "Feeds: {} ({}s timeout), {} ({}s timeout)",
        config.tradeogre_api_url,
        config.trtl_btc_timeout_secs,
        config.coinbase_api_url,
        config.btc_usd_timeout_secs
    );
    tracing::info!(
        "Threshold pool: {} workers, queue of {}",
        config.threshold_workers,
        config.threshold_queue_capacity
    );

    let app = create_router(AppState::from_config(config));

    tracing::info!("🚀 Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
