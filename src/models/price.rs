use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Reference currencies TRTL is quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Btc,
    Usd,
}

impl Currency {
    pub fn glyph(&self) -> char {
        match self {
            Currency::Btc => 'Ƀ',
            Currency::Usd => '$',
        }
    }

    /// Render an amount with the currency glyph and 8 decimal places
    pub fn display(&self, amount: f64) -> String {
        format!("{}{:.8}", self.glyph(), amount)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Btc => write!(f, "BTC"),
            Currency::Usd => write!(f, "USD"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BTC" => Ok(Currency::Btc),
            "USD" => Ok(Currency::Usd),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

/// The two upstream exchange ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatePair {
    TrtlBtc,
    BtcUsd,
}

impl std::fmt::Display for RatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatePair::TrtlBtc => write!(f, "TRTL/BTC"),
            RatePair::BtcUsd => write!(f, "BTC/USD"),
        }
    }
}

/// A freshly fetched exchange ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rate {
    pub pair: RatePair,
    pub value: f64,
}

impl Rate {
    pub fn new(pair: RatePair, value: f64) -> Self {
        Self { pair, value }
    }
}

/// Value of TRTL in BTC and USD.
///
/// Only the numeric rates are stored; display strings are rendered from
/// them on demand so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposedPrice {
    btc_rate: f64,
    usd_rate: f64,
}

impl ComposedPrice {
    pub fn new(btc_rate: f64, usd_rate: f64) -> Self {
        Self { btc_rate, usd_rate }
    }

    /// Derive the USD price from the two upstream ratios
    pub fn from_rates(trtl_btc: f64, btc_usd: f64) -> Self {
        Self::new(trtl_btc, trtl_btc * btc_usd)
    }

    pub fn btc_rate(&self) -> f64 {
        self.btc_rate
    }

    pub fn usd_rate(&self) -> f64 {
        self.usd_rate
    }

    pub fn rate_in(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Btc => self.btc_rate,
            Currency::Usd => self.usd_rate,
        }
    }

    pub fn btc_display(&self) -> String {
        Currency::Btc.display(self.btc_rate)
    }

    pub fn usd_display(&self) -> String {
        Currency::Usd.display(self.usd_rate)
    }

    /// Price of `quantity` TRTL
    pub fn scaled(&self, quantity: i64) -> Self {
        let factor = quantity as f64;
        Self::new(self.btc_rate * factor, self.usd_rate * factor)
    }
}

impl Serialize for ComposedPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ComposedPrice", 4)?;
        state.serialize_field("usdPrice", &self.usd_display())?;
        state.serialize_field("btcPrice", &self.btc_display())?;
        state.serialize_field("usdRate", &self.usd_rate)?;
        state.serialize_field("btcRate", &self.btc_rate)?;
        state.end()
    }
}
