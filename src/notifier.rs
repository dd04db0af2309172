//! Compares the two latest logged rates and emails an alert on a drop.

use crate::core::{Alert, Mailer, RateRecord};
use crate::store::RateLog;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Fewer than two records; nothing to compare.
    NotEnoughData,
    NoDrop {
        previous: RateRecord,
        current: RateRecord,
    },
    Alerted {
        previous: RateRecord,
        current: RateRecord,
    },
}

pub struct DropNotifier {
    log: RateLog,
    mailer: Arc<dyn Mailer>,
    recipients: Vec<String>,
    base_currency: String,
    target_currency: String,
}

impl DropNotifier {
    pub fn new(
        log: RateLog,
        mailer: Arc<dyn Mailer>,
        recipients: Vec<String>,
        base_currency: &str,
        target_currency: &str,
    ) -> Self {
        Self {
            log,
            mailer,
            recipients,
            base_currency: base_currency.to_string(),
            target_currency: target_currency.to_string(),
        }
    }

    pub async fn check_and_notify(&self) -> Result<NotifyOutcome> {
        let Some((previous, current)) = self.log.latest_pair()? else {
            debug!("Not enough history in {} to compare", self.log.path().display());
            return Ok(NotifyOutcome::NotEnoughData);
        };

        if !current.is_drop_from(&previous) {
            debug!(
                "No drop: {} on {} -> {} on {}",
                previous.rate, previous.date, current.rate, current.date
            );
            return Ok(NotifyOutcome::NoDrop { previous, current });
        }

        info!(
            "{}{} rate dropped from {} to {}",
            self.base_currency, self.target_currency, previous.rate, current.rate
        );
        let alert = self.compose_alert(&previous, &current);
        self.mailer.send(&alert).await?;
        Ok(NotifyOutcome::Alerted { previous, current })
    }

    fn compose_alert(&self, previous: &RateRecord, current: &RateRecord) -> Alert {
        Alert {
            recipients: self.recipients.clone(),
            subject: format!(
                "[Alert] {} to {} Exchange Rate Dropped",
                self.base_currency, self.target_currency
            ),
            html_body: format!(
                "<b>Rate dropped</b>: {:.2} ➝ {:.2}",
                previous.rate.round_dp(2),
                current.rate.round_dp(2)
            ),
        }
    }
}
