use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

/// Failure while fetching or composing an exchange rate
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{source_name} request failed: {message}")]
    Transport {
        source_name: &'static str,
        message: String,
    },

    #[error("{source_name} responded with status {status}")]
    Status {
        source_name: &'static str,
        status: u16,
    },

    #[error("{source_name} returned an unusable payload: {message}")]
    Parse {
        source_name: &'static str,
        message: String,
    },

    // The inner error is rendered inline, so it is not also exposed as `source()`
    #[error("{context}: {inner}")]
    Context {
        context: &'static str,
        inner: Box<FetchError>,
    },
}

impl FetchError {
    pub fn context(self, context: &'static str) -> Self {
        FetchError::Context {
            context,
            inner: Box::new(self),
        }
    }

    /// The innermost error, with any context layers peeled off
    pub fn root(&self) -> &FetchError {
        match self {
            FetchError::Context { inner, .. } => inner.root(),
            other => other,
        }
    }
}

/// Problems with a threshold request
#[derive(Error, Debug, PartialEq)]
pub enum ThresholdError {
    #[error("exactly one of greaterThan.amount or lessThan.amount must be positive")]
    AmbiguousAmount,

    #[error("exactly one of greaterThan.currency or lessThan.currency must be set")]
    AmbiguousCurrency,

    #[error("Invalid {which} callback URL: {message}")]
    InvalidCallbackUrl { which: &'static str, message: String },

    #[error("Could not determine currency to compare: {0:?}")]
    UnsupportedCurrency(String),

    #[error("Threshold queue is full, try again later")]
    QueueFull,

    #[error("Threshold checks are not being accepted right now")]
    QueueClosed,
}

/// Outbound callback failure. Logged, never surfaced to the original caller.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("callback to {url} failed: {message}")]
    Transport { url: String, message: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ThresholdError> for AppError {
    fn from(err: ThresholdError) -> Self {
        match err {
            ThresholdError::QueueFull | ThresholdError::QueueClosed => {
                AppError::Unavailable(err.to_string())
            }
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Internal(err.to_string())
    }
}
