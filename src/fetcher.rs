//! Fetches today's rate and records it in the rate log.

use crate::core::{CurrencyRateProvider, RateRecord};
use crate::store::RateLog;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::info;

pub struct RateFetcher {
    provider: Arc<dyn CurrencyRateProvider>,
    log: RateLog,
    base_currency: String,
    target_currency: String,
}

impl RateFetcher {
    pub fn new(
        provider: Arc<dyn CurrencyRateProvider>,
        log: RateLog,
        base_currency: &str,
        target_currency: &str,
    ) -> Self {
        Self {
            provider,
            log,
            base_currency: base_currency.to_string(),
            target_currency: target_currency.to_string(),
        }
    }

    /// Records the current rate under today's local date.
    pub async fn fetch_and_append(&self) -> Result<RateRecord> {
        self.fetch_and_append_on(Local::now().date_naive()).await
    }

    /// Records the current rate under `date`. The log is untouched if the fetch fails.
    pub async fn fetch_and_append_on(&self, date: NaiveDate) -> Result<RateRecord> {
        let rate = self
            .provider
            .get_rate(&self.base_currency, &self.target_currency)
            .await?;

        let record = RateRecord::new(date, rate);
        let records = self.log.upsert(record)?;
        info!(
            "Recorded {}{} rate {} for {} ({} records in {})",
            self.base_currency,
            self.target_currency,
            record.rate,
            record.date,
            records.len(),
            self.log.path().display()
        );
        Ok(record)
    }
}
