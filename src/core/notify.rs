//! Outbound alert abstractions

use anyhow::Result;
use async_trait::async_trait;

/// An HTML email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, alert: &Alert) -> Result<()>;
}
