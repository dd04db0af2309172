//! Currency conversion abstractions

use crate::core::error::FetchError;
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Latest quoted rate for one unit of `from` expressed in `to`.
    async fn get_rate(&self, from: &str, to: &str) -> Result<Decimal, FetchError>;
}
