use std::sync::Arc;

use crate::error::FetchError;
use crate::models::{ComposedPrice, Rate};
use crate::services::rate_source::RateSource;

// Cache slot consulted before each upstream fetch. Nothing populates it,
// so every lookup misses and `force_refresh` has no observable effect.
const EMPTY_RATE_CACHE: Option<f64> = None;

/// Combines the TRTL→BTC and BTC→USD feeds into one TRTL price
#[derive(Clone)]
pub struct PriceComposer {
    trtl_btc: Arc<dyn RateSource>,
    btc_usd: Arc<dyn RateSource>,
}

impl PriceComposer {
    pub fn new(trtl_btc: Arc<dyn RateSource>, btc_usd: Arc<dyn RateSource>) -> Self {
        Self { trtl_btc, btc_usd }
    }

    /// Fetch both rates and derive the USD price.
    ///
    /// The TRTL→BTC fetch runs first; if it fails the BTC→USD feed is never
    /// called. Only the first failure carries extra context.
    pub async fn compose(&self, force_refresh: bool) -> Result<ComposedPrice, FetchError> {
        let trtl_btc = self
            .rate(self.trtl_btc.as_ref(), force_refresh)
            .await
            .map_err(|e| e.context("problem getting BTC price"))?;

        // TODO: decide whether this error should carry context like the TRTL/BTC one
        let btc_usd = self.rate(self.btc_usd.as_ref(), force_refresh).await?;

        let price = ComposedPrice::from_rates(trtl_btc, btc_usd);
        tracing::debug!(
            "Composed TRTL price: {} / {} (TRTL/BTC {}, BTC/USD {})",
            price.btc_display(),
            price.usd_display(),
            trtl_btc,
            btc_usd
        );
        Ok(price)
    }

    async fn rate(&self, source: &dyn RateSource, force_refresh: bool) -> Result<f64, FetchError> {
        if let Some(cached) = EMPTY_RATE_CACHE.filter(|_| !force_refresh) {
            tracing::debug!("Rate cache hit for {}", source.name());
            return Ok(cached);
        }

        let Rate { value, .. } = source.fetch().await.map_err(|e| {
            tracing::warn!("Rate fetch from {} failed: {}", source.name(), e);
            e
        })?;
        Ok(value)
    }
}
