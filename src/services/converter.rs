use crate::error::FetchError;
use crate::models::ComposedPrice;
use crate::services::price_service::PriceComposer;

/// Prices an integer quantity of TRTL
#[derive(Clone)]
pub struct Converter {
    composer: PriceComposer,
}

impl Converter {
    pub fn new(composer: PriceComposer) -> Self {
        Self { composer }
    }

    /// Compose a fresh unit price and scale it by `quantity`.
    /// Callers are expected to have parsed and checked the quantity already.
    pub async fn convert(&self, quantity: i64, force_refresh: bool) -> Result<ComposedPrice, FetchError> {
        let unit = self
            .composer
            .compose(force_refresh)
            .await
            .map_err(|e| e.context("problem getting the current price"))?;

        let price = unit.scaled(quantity);
        tracing::debug!(
            "Converted {} TRTL to {} / {}",
            quantity,
            price.btc_display(),
            price.usd_display()
        );
        Ok(price)
    }
}
