use async_trait::async_trait;
use reqwest::Url;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::{CurrencyRateProvider, FetchError};

const USER_AGENT: &str = concat!("ratewatch/", env!("CARGO_PKG_VERSION"));

// FixerProvider implementation for CurrencyRateProvider
pub struct FixerProvider {
    base_url: String,
    api_key: String,
}

impl FixerProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        FixerProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FixerLatestResponse {
    #[serde(default)]
    rates: HashMap<String, Decimal>,
    error: Option<FixerError>,
}

#[derive(Debug, Deserialize)]
struct FixerError {
    info: Option<String>,
}

#[async_trait]
impl CurrencyRateProvider for FixerProvider {
    #[instrument(
        name = "FixerRateFetch",
        skip(self),
        fields(from = %from, to = %to)
    )]
    async fn get_rate(&self, from: &str, to: &str) -> Result<Decimal, FetchError> {
        let url = Url::parse_with_params(
            &format!("{}/api/latest", self.base_url),
            &[
                ("access_key", self.api_key.as_str()),
                ("base", from),
                ("symbols", to),
            ],
        )
        .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        debug!("Requesting exchange rate for {}{}", from, to);

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let parsed = serde_json::from_str::<FixerLatestResponse>(&text);
        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|data| data.error)
                .and_then(|e| e.info)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(FetchError::Provider { status, message });
        }

        let data = parsed?;
        if let Some(error) = data.error {
            return Err(FetchError::Provider {
                status,
                message: error.info.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let rate = data
            .rates
            .get(to)
            .copied()
            .ok_or_else(|| FetchError::MissingRate {
                symbol: to.to_string(),
            })?;
        if rate <= Decimal::ZERO {
            return Err(FetchError::InvalidRate {
                symbol: to.to_string(),
                rate,
            });
        }

        debug!("Received rate {} for {}{}", rate, from, to);
        Ok(rate)
    }
}
