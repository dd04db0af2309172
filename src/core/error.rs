use reqwest::StatusCode;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failures of the fetch step. None of these leave a trace in the rate log.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Error fetching exchange rate ({status}): {message}")]
    Provider { status: StatusCode, message: String },

    #[error("Failed to parse exchange rate response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No rate found for currency: {symbol}")]
    MissingRate { symbol: String },

    #[error("Invalid rate {rate} for currency: {symbol}")]
    InvalidRate { symbol: String, rate: Decimal },
}
