use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::core::config::SmtpConfig;
use crate::core::{Alert, Mailer};

/// Delivers alerts over SMTP. The connection is only opened when a message is sent.
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, from: &str) -> Result<Self> {
        let from = from
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid sender address: {from}"))?;

        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .with_context(|| format!("Failed to configure SMTP relay: {}", config.host))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };
        builder = builder.port(config.port);

        if let (Some(username), Some(password)) = (&config.username, config.password()) {
            builder = builder.credentials(Credentials::new(username.clone(), password));
        }

        debug!(
            "Configured SMTP transport {}:{} (starttls: {})",
            config.host, config.port, config.starttls
        );
        Ok(Self {
            from,
            transport: builder.build(),
        })
    }
}

fn build_message(from: &Mailbox, alert: &Alert) -> Result<Message> {
    let mut builder = Message::builder()
        .from(from.clone())
        .subject(alert.subject.clone())
        .header(ContentType::TEXT_HTML);
    for recipient in &alert.recipients {
        let to = recipient
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid recipient address: {recipient}"))?;
        builder = builder.to(to);
    }

    builder
        .body(alert.html_body.clone())
        .context("Failed to build alert email")
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, alert: &Alert) -> Result<()> {
        let message = build_message(&self.from, alert)?;
        self.transport
            .send(message)
            .await
            .context("Failed to send alert email")?;
        info!(
            "Sent alert '{}' to {} recipient(s)",
            alert.subject,
            alert.recipients.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(recipients: &[&str]) -> Alert {
        Alert {
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            subject: "[Alert] EUR to INR Exchange Rate Dropped".to_string(),
            html_body: "<b>Rate dropped</b>: 85.00 ➝ 84.50".to_string(),
        }
    }

    fn smtp_config() -> SmtpConfig {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 2525,
            starttls: false,
            username: Some("user".to_string()),
            password: Some("pass".to_string()),
        }
    }

    #[test]
    fn test_build_message_headers() -> Result<()> {
        let from: Mailbox = "ratewatch <alerts@example.com>".parse()?;
        let message = build_message(&from, &alert(&["a@example.com", "b@example.com"]))?;

        let formatted = String::from_utf8(message.formatted())?;
        assert!(formatted.contains("alerts@example.com"));
        assert!(formatted.contains("a@example.com"));
        assert!(formatted.contains("b@example.com"));
        assert!(formatted.contains("Subject: "));
        assert!(formatted.contains("Content-Type: text/html"));
        Ok(())
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() -> Result<()> {
        let from: Mailbox = "alerts@example.com".parse()?;
        let err = build_message(&from, &alert(&["not an address"])).unwrap_err();
        assert!(err.to_string().contains("Invalid recipient address"));
        Ok(())
    }

    #[tokio::test]
    async fn test_new_rejects_bad_sender() {
        let result = SmtpMailer::new(&smtp_config(), "nobody");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_new_accepts_valid_config() {
        let result = SmtpMailer::new(&smtp_config(), "ratewatch <alerts@example.com>");
        assert!(result.is_ok());
    }
}
