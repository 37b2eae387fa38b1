/*
[INPUT]:  HTTP configuration (base URL, timeouts, language, bearer credentials)
[OUTPUT]: Configured reqwest client ready for API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT_LANGUAGE, RETRY_AFTER};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

use crate::http::{OrdersError, Result};

/// Base URL for the driver API
pub const DEFAULT_BASE_URL: &str = "https://api.fazaa.app";

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Sent as `Accept-Language`; the API localizes titles and messages.
    pub language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            language: "en".to_string(),
        }
    }
}

/// Credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires_at| Utc::now() > expires_at)
            .unwrap_or(false)
    }
}

/// Main HTTP client for the driver order API
#[derive(Debug, Clone)]
pub struct OrdersClient {
    http_client: Client,
    base_url: Url,
    config: ClientConfig,
    credentials: Option<Credentials>,
}

impl OrdersClient {
    /// Create a new client against the production API with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(OrdersError::Config("base URL must not be empty".to_string()));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        // Endpoints are joined relative to the base, so keep any path prefix.
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            http_client,
            base_url: Url::parse(&base)?,
            config,
            credentials: None,
        })
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Build a request builder carrying language, request id and bearer token
    pub(crate) fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = self.url(endpoint)?;
        let mut builder = self
            .http_client
            .request(method, url)
            .header(ACCEPT_LANGUAGE, self.config.language.as_str())
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());

        if let Some(credentials) = &self.credentials {
            if credentials.is_expired() {
                return Err(OrdersError::TokenExpired);
            }
            builder = builder.bearer_auth(&credentials.access_token);
        }

        Ok(builder)
    }

    /// Send a request and decode its JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|err| self.map_transport(err))?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await.map_err(|err| self.map_transport(err))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn map_transport(&self, err: reqwest::Error) -> OrdersError {
        if err.is_timeout() {
            OrdersError::Timeout {
                duration: self.config.timeout.as_secs(),
            }
        } else {
            OrdersError::Http(err)
        }
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(1);
        return Err(OrdersError::RateLimit { retry_after });
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    });

    tracing::debug!(status = status.as_u16(), %message, "order API returned error status");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(OrdersError::Authentication { message })
        }
        _ => Err(OrdersError::api_error(status, message)),
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|message| message.as_str())
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_path_prefix() {
        let client = OrdersClient::with_config(ClientConfig::default(), "https://example.com/v2")
            .expect("client init");
        let url = client.url("/api/driver/orders").expect("join");
        assert_eq!(url.as_str(), "https://example.com/v2/api/driver/orders");
    }

    #[test]
    fn test_empty_base_url_is_config_error() {
        let err = OrdersClient::with_config(ClientConfig::default(), "  ").unwrap_err();
        assert!(matches!(err, OrdersError::Config(_)));
    }

    #[test]
    fn test_expired_credentials_rejected_before_send() {
        let mut client = OrdersClient::new().expect("client init");
        client.set_credentials(Credentials {
            access_token: "token".to_string(),
            expires_at: Some(Utc::now() - chrono::Duration::seconds(5)),
        });

        let err = client
            .request(Method::GET, "api/driver/orders")
            .unwrap_err();
        assert!(matches!(err, OrdersError::TokenExpired));
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message(r#"{"status":false,"message":"Unauthenticated."}"#),
            Some("Unauthenticated.".to_string())
        );
        assert_eq!(error_message("<html>"), None);
        assert_eq!(error_message(r#"{"message":"  "}"#), None);
    }
}
