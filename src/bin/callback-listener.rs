//! Example receiver for threshold callbacks.
//!
//! Run alongside the price service and point `callbackEndpoint` at
//! `http://localhost:$LISTEN_PORT`.

use axum::{routing::post, Json, Router};
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let _ = dotenvy::dotenv();
    let port = std::env::var("LISTEN_PORT")
        .map_err(|_| anyhow::anyhow!("Must set $LISTEN_PORT"))?;

    let app = Router::new()
        .route("/success", post(on_success))
        .route("/fail", post(on_failure));

    tracing::info!("Listening on {}", port);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn on_success(Json(body): Json<Value>) -> Json<Value> {
    tracing::info!("SUCCESS: {}", body);
    Json(json!({ "status": "Received" }))
}

async fn on_failure(Json(body): Json<Value>) -> Json<Value> {
    tracing::warn!("FAILURE: {}", body);
    Json(json!({ "status": "Received" }))
}
