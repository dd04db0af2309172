use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{env, fs, path::PathBuf};
use tracing::debug;

pub const API_KEY_ENV: &str = "FIXER_API_KEY";
pub const SMTP_PASSWORD_ENV: &str = "RATEWATCH_SMTP_PASSWORD";

const LOG_FILE_NAME: &str = "exchange_rate_log.csv";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FixerProviderConfig {
    pub base_url: String,
}

impl Default for FixerProviderConfig {
    fn default() -> Self {
        FixerProviderConfig {
            base_url: "http://data.fixer.io".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub starttls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SmtpConfig {
    pub fn password(&self) -> Option<String> {
        self.password
            .clone()
            .or_else(|| env::var(SMTP_PASSWORD_ENV).ok())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AlertConfig {
    pub from: String,
    pub recipients: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RetryConfig {
    pub retries: usize,
    pub delay_secs: u64,
}

impl RetryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            retries: 1,
            delay_secs: 120,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub log_path: Option<String>,
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_target_currency")]
    pub target_currency: String,
    #[serde(default)]
    pub provider: FixerProviderConfig,
    pub alert: Option<AlertConfig>,
    pub smtp: Option<SmtpConfig>,
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_base_currency() -> String {
    "EUR".to_string()
}

fn default_target_currency() -> String {
    "INR".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("io", "ratewatch", "ratewatch")
        .context("Could not determine project directories")
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.yaml"))
    }

    /// Location of the rate log. Relative paths resolve against the working directory.
    pub fn log_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.log_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(project_dirs()?.data_dir().join(LOG_FILE_NAME))
    }

    pub fn api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV).ok())
            .with_context(|| format!("No api_key in config and {API_KEY_ENV} is not set"))
    }

    /// Alert settings, only needed by commands that may send mail.
    pub fn alert(&self) -> Result<&AlertConfig> {
        self.alert
            .as_ref()
            .context("No alert section in config; it is required to send drop alerts")
    }

    pub fn smtp(&self) -> Result<&SmtpConfig> {
        self.smtp
            .as_ref()
            .context("No smtp section in config; it is required to send drop alerts")
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization_with_defaults() {
        let yaml_str = r#"
api_key: "secret"
alert:
  from: "ratewatch <alerts@example.com>"
  recipients:
    - "me@example.com"
smtp:
  host: "sandbox.smtp.mailtrap.io"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.api_key().unwrap(), "secret");
        assert_eq!(config.base_currency, "EUR");
        assert_eq!(config.target_currency, "INR");
        assert_eq!(config.provider.base_url, "http://data.fixer.io");
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.retry.delay(), Duration::from_secs(120));
        let smtp = config.smtp().unwrap();
        assert_eq!(smtp.port, 587);
        assert!(smtp.starttls);
        assert!(smtp.username.is_none());
        assert_eq!(
            config.alert().unwrap().recipients,
            vec!["me@example.com".to_string()]
        );
        assert!(config.log_path.is_none());
    }

    #[test]
    fn test_config_deserialization_with_overrides() {
        let yaml_str = r#"
api_key: "secret"
log_path: "data/rates.csv"
base_currency: "USD"
target_currency: "JPY"
provider:
  base_url: "http://example.com/fixer"
alert:
  from: "alerts@example.com"
  recipients: ["a@example.com", "b@example.com"]
smtp:
  host: "localhost"
  port: 2525
  starttls: false
  username: "user"
  password: "pass"
retry:
  retries: 3
  delay_secs: 5
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.log_path().unwrap(), PathBuf::from("data/rates.csv"));
        assert_eq!(config.base_currency, "USD");
        assert_eq!(config.target_currency, "JPY");
        assert_eq!(config.provider.base_url, "http://example.com/fixer");
        assert_eq!(config.alert().unwrap().recipients.len(), 2);
        let smtp = config.smtp().unwrap();
        assert_eq!(smtp.port, 2525);
        assert!(!smtp.starttls);
        assert_eq!(smtp.password(), Some("pass".to_string()));
        assert_eq!(config.retry.retries, 3);
        assert_eq!(config.retry.delay(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_without_mail_sections() {
        let yaml_str = r#"
api_key: "secret"
log_path: "rates.csv"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.api_key().unwrap(), "secret");
        assert!(
            config
                .alert()
                .unwrap_err()
                .to_string()
                .contains("No alert section")
        );
        assert!(
            config
                .smtp()
                .unwrap_err()
                .to_string()
                .contains("No smtp section")
        );
    }

    #[test]
    fn test_load_from_missing_path() {
        let result = AppConfig::load_from_path("/definitely/not/here/config.yaml");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
