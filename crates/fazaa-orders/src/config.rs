/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed API and list configuration
[POS]:    Configuration layer - client and list setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use fazaa_orders_adapter::{ClientConfig, Credentials, DEFAULT_BASE_URL, OrdersClient};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the order list
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
}

/// Driver API connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token of the signed-in driver
    #[serde(default)]
    pub token: Option<String>,
    /// Expiry of `token`; requests fail locally once it has passed
    #[serde(default)]
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Sent as Accept-Language
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            token_expires_at: None,
            language: default_language(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Order list behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListConfig {
    /// Orders requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    20
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).context("parse config yaml")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.list.page_size > 0, "list.page_size must be at least 1");
        anyhow::ensure!(
            !self.api.base_url.trim().is_empty(),
            "api.base_url must not be empty"
        );
        Ok(())
    }
}

impl ApiConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            language: self.language.clone(),
        }
    }

    /// Build an authenticated client; a missing token leaves requests anonymous.
    pub fn build_client(&self) -> anyhow::Result<OrdersClient> {
        let mut client = OrdersClient::with_config(self.client_config(), &self.base_url)
            .context("create orders client")?;
        if let Some(token) = self.token.as_deref().filter(|t| !t.trim().is_empty()) {
            if self.token_expires_at.is_some_and(|at| at <= Utc::now()) {
                tracing::warn!(expires_at = ?self.token_expires_at, "configured API token has expired");
            }
            client.set_credentials(Credentials {
                access_token: token.to_string(),
                expires_at: self.token_expires_at,
            });
        } else {
            tracing::warn!("no API token configured; requests are sent without authorization");
        }
        Ok(client)
    }
}
