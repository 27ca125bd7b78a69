/*
[INPUT]:  Error sources (HTTP, API, serialization, decode, credentials, WebSocket)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified client error type for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::decode::ModelError;

/// Main error type for the Binance adapter
#[derive(Error, Debug)]
pub enum BinanceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Binance returned an error body, or a bare non-2xx status
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// Signed endpoint called before credentials were set
    #[error("Missing API credentials for signed endpoint")]
    MissingCredentials,

    /// Secret key could not be loaded
    #[error("Invalid API credentials: {0}")]
    InvalidCredentials(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request struct could not be encoded as a query string
    #[error("Query encoding error: {0}")]
    QueryEncoding(#[from] serde_urlencoded::ser::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Payload parsed but did not decode into the requested model
    #[error("Decode error: {0}")]
    Model(#[from] ModelError),

    /// WebSocket error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request weight or order rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

/// Error body Binance sends alongside non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

impl BinanceError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BinanceError::Http(_)
                | BinanceError::RateLimit { .. }
                | BinanceError::Timeout { .. }
                | BinanceError::WebSocket(_)
                | BinanceError::InvalidResponse(_)
        )
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            BinanceError::RateLimit { retry_after } => Some(*retry_after),
            BinanceError::Timeout { .. } => Some(1),
            _ => None,
        }
    }

    /// Check if error indicates authentication failure
    ///
    /// Binance reports bad keys and signatures as -2014, -2015 and -1022.
    pub fn is_auth_error(&self) -> bool {
        match self {
            BinanceError::MissingCredentials | BinanceError::InvalidCredentials(_) => true,
            BinanceError::Api { code, .. } => matches!(code, -2014 | -2015 | -1022),
            _ => false,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        BinanceError::Api {
            code: i64::from(status.as_u16()),
            message: message.into(),
        }
    }

    /// Map a failed response to an error, preferring the `{code, msg}` body
    pub(crate) fn from_response(status: StatusCode, body: &str, retry_after: Option<u64>) -> Self {
        if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::IM_A_TEAPOT {
            return BinanceError::RateLimit {
                retry_after: retry_after.unwrap_or(1),
            };
        }

        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => BinanceError::Api {
                code: parsed.code,
                message: parsed.msg,
            },
            Err(_) => BinanceError::api_error(status, body.trim()),
        }
    }
}

/// Result type alias for Binance operations
pub type Result<T> = std::result::Result<T, BinanceError>;
