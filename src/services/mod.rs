pub mod callback;
pub mod converter;
pub mod price_service;
pub mod rate_source;
pub mod threshold;

pub use callback::CallbackDispatcher;
pub use converter::Converter;
pub use price_service::PriceComposer;
pub use rate_source::{CoinbaseSource, RateSource, TradeOgreSource};
pub use threshold::{ThresholdEngine, ThresholdOutcome, ThresholdQueue};
