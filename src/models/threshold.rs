use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::ThresholdError;
use crate::models::Currency;

/// Which side of the live rate the configured amount must sit on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    GreaterThan,
    LessThan,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::GreaterThan => write!(f, "greaterThan"),
            Direction::LessThan => write!(f, "lessThan"),
        }
    }
}

/// One side of an inbound threshold request. Absent or `null` sides and
/// fields decode as the zero value (empty currency, zero amount).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThresholdBound {
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ==================== Request/Response Types ====================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub greater_than: ThresholdBound,
    #[serde(default, deserialize_with = "null_as_default")]
    pub less_than: ThresholdBound,
    pub callback_endpoint: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdAck {
    pub success_callback_endpoint: String,
    pub failure_callback_endpoint: String,
}

/// The single active comparison of a validated request.
///
/// `currency` stays unresolved until evaluation; an unsupported value is
/// reported through the failure callback rather than the original caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdCondition {
    pub direction: Direction,
    pub currency: String,
    pub amount: f64,
}

impl ThresholdCondition {
    pub fn resolve_currency(&self) -> Result<Currency, ThresholdError> {
        self.currency
            .parse()
            .map_err(|_| ThresholdError::UnsupportedCurrency(self.currency.clone()))
    }

    /// True when the configured amount sits on the configured side of the
    /// live rate: greaterThan holds for `amount > current`, lessThan for
    /// `amount < current`.
    pub fn is_met(&self, current: f64) -> bool {
        match self.direction {
            Direction::GreaterThan => self.amount > current,
            Direction::LessThan => self.amount < current,
        }
    }
}

/// Callback targets derived from the caller's base URL.
///
/// The acknowledgment echoes `{base}/success` and `{base}/fail` verbatim;
/// the parsed `Url`s are only used for validation and dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackEndpoints {
    pub success: Url,
    pub failure: Url,
    success_endpoint: String,
    failure_endpoint: String,
}

impl CallbackEndpoints {
    pub fn from_base(base: &str) -> Result<Self, ThresholdError> {
        let parse = |which: &'static str, raw: String| {
            Url::parse(&raw).map_err(|e| ThresholdError::InvalidCallbackUrl {
                which,
                message: format!("{}: {}", raw, e),
            })
        };

        let success_endpoint = format!("{}/success", base);
        let failure_endpoint = format!("{}/fail", base);

        Ok(Self {
            success: parse("success", success_endpoint.clone())?,
            failure: parse("failure", failure_endpoint.clone())?,
            success_endpoint,
            failure_endpoint,
        })
    }

    pub fn ack(&self) -> ThresholdAck {
        ThresholdAck {
            success_callback_endpoint: self.success_endpoint.clone(),
            failure_callback_endpoint: self.failure_endpoint.clone(),
        }
    }
}

/// A validated request, ready to be evaluated once
#[derive(Debug, Clone)]
pub struct ThresholdCheck {
    pub id: Uuid,
    pub condition: ThresholdCondition,
    pub endpoints: CallbackEndpoints,
}

impl ThresholdRequest {
    pub fn validate(self) -> Result<ThresholdCheck, ThresholdError> {
        let gt_active = self.greater_than.amount > 0.0;
        let lt_active = self.less_than.amount > 0.0;
        if gt_active == lt_active {
            return Err(ThresholdError::AmbiguousAmount);
        }

        if self.greater_than.currency.is_empty() == self.less_than.currency.is_empty() {
            return Err(ThresholdError::AmbiguousCurrency);
        }

        let endpoints = CallbackEndpoints::from_base(&self.callback_endpoint)?;

        let (direction, bound) = if gt_active {
            (Direction::GreaterThan, self.greater_than)
        } else {
            (Direction::LessThan, self.less_than)
        };

        Ok(ThresholdCheck {
            id: Uuid::new_v4(),
            condition: ThresholdCondition {
                direction,
                currency: bound.currency,
                amount: bound.amount,
            },
            endpoints,
        })
    }
}
