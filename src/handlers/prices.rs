use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::handlers::{parse_force, parse_trtl};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub force: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub trtl: Option<String>,
    pub force: Option<String>,
}

/// GET /price - Current value of one TRTL in BTC and USD
pub async fn get_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let force = parse_force(query.force.as_deref());
    tracing::info!("Forced - {}", force);

    let price = state.composer.compose(force).await.map_err(|e| {
        tracing::error!("Price lookup failed: {}", e);
        AppError::Internal("Problem getting the price of turtle in bitcoin".to_string())
    })?;

    Ok(Json(serde_json::json!({ "price": price })))
}

/// GET /convert - Value of `trtl` TRTL in BTC and USD
pub async fn convert_trtl(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let trtl = parse_trtl(query.trtl.as_deref())?;
    let force = parse_force(query.force.as_deref());
    tracing::info!("Forced - {}", force);

    let price = state.converter.convert(trtl, force).await.map_err(|e| {
        tracing::error!("Conversion of {} TRTL failed: {}", trtl, e);
        AppError::Internal(format!("Could not convert at this time: {}", e))
    })?;

    Ok(Json(serde_json::json!({ "price": price })))
}
