use super::ui;
use crate::core::config::AppConfig;
use crate::fetcher::RateFetcher;
use crate::notifier::{DropNotifier, NotifyOutcome};
use crate::pipeline;
use crate::providers::fixer::FixerProvider;
use crate::providers::smtp::SmtpMailer;
use crate::store::RateLog;
use anyhow::Result;
use std::sync::Arc;

fn rate_fetcher(config: &AppConfig) -> Result<RateFetcher> {
    let provider = FixerProvider::new(&config.provider.base_url, &config.api_key()?);
    Ok(RateFetcher::new(
        Arc::new(provider),
        RateLog::new(config.log_path()?),
        &config.base_currency,
        &config.target_currency,
    ))
}

fn drop_notifier(config: &AppConfig) -> Result<DropNotifier> {
    let alert = config.alert()?;
    let mailer = SmtpMailer::new(config.smtp()?, &alert.from)?;
    Ok(DropNotifier::new(
        RateLog::new(config.log_path()?),
        Arc::new(mailer),
        alert.recipients.clone(),
        &config.base_currency,
        &config.target_currency,
    ))
}

fn print_outcome(outcome: &NotifyOutcome) {
    match outcome {
        NotifyOutcome::NotEnoughData => println!(
            "{}",
            ui::style_text("Not enough history to compare yet", ui::StyleType::Subtle)
        ),
        NotifyOutcome::NoDrop { previous, current } => println!(
            "{} {} ({}) -> {} ({})",
            ui::style_text("No drop:", ui::StyleType::Good),
            previous.rate,
            previous.date,
            current.rate,
            current.date
        ),
        NotifyOutcome::Alerted { previous, current } => println!(
            "{} {} ({}) -> {} ({}), alert sent",
            ui::style_text("Rate dropped:", ui::StyleType::Error),
            previous.rate,
            previous.date,
            current.rate,
            current.date
        ),
    }
}

pub async fn fetch(config: &AppConfig) -> Result<()> {
    let fetcher = rate_fetcher(config)?;

    let pb = ui::new_spinner("Fetching exchange rate");
    let result = fetcher.fetch_and_append().await;
    pb.finish_and_clear();

    let record = result?;
    println!(
        "{} {} to {} = {} on {}",
        ui::style_text("Recorded", ui::StyleType::Good),
        config.base_currency,
        config.target_currency,
        record.rate,
        record.date
    );
    Ok(())
}

pub async fn check(config: &AppConfig) -> Result<()> {
    let notifier = drop_notifier(config)?;
    let outcome = notifier.check_and_notify().await?;
    print_outcome(&outcome);
    Ok(())
}

pub async fn run(config: &AppConfig) -> Result<()> {
    let fetcher = rate_fetcher(config)?;
    let notifier = drop_notifier(config)?;

    let report = pipeline::run(&fetcher, &notifier, &config.retry).await?;
    println!(
        "{} {} to {} = {} on {}",
        ui::style_text("Recorded", ui::StyleType::Good),
        config.base_currency,
        config.target_currency,
        report.recorded.rate,
        report.recorded.date
    );
    print_outcome(&report.outcome);
    Ok(())
}
