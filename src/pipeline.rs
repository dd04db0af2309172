//! Daily run: fetch, then check for a drop only if the fetch succeeded.

use crate::core::RateRecord;
use crate::core::config::RetryConfig;
use crate::fetcher::RateFetcher;
use crate::notifier::{DropNotifier, NotifyOutcome};
use crate::providers::util::with_retry;
use anyhow::Result;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    pub recorded: RateRecord,
    pub outcome: NotifyOutcome,
}

pub async fn run(
    fetcher: &RateFetcher,
    notifier: &DropNotifier,
    retry: &RetryConfig,
) -> Result<PipelineReport> {
    let recorded = with_retry(
        || fetcher.fetch_and_append(),
        retry.retries,
        retry.delay(),
    )
    .await?;
    let outcome = notifier.check_and_notify().await?;
    info!("Daily run finished: {:?}", outcome);
    Ok(PipelineReport { recorded, outcome })
}
