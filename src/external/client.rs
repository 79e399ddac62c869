use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{AppError, AppResult};

/// Builds the HTTP client shared by the geolocation lookup and both channels
///
/// One client is built per run and cloned into each collaborator; clones share
/// the same connection pool.
///
/// # Features
/// - **Timeouts**: request and connect timeouts from [`HttpConfig`]
/// - **Compression**: gzip responses are decoded transparently
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// let client = build_http_client(&settings.http)?;
/// let body = client.get("https://example.com").send().await?.text().await?;
/// ```
pub fn build_http_client(config: &HttpConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .gzip(true)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| AppError::Configuration {
            key: "http".to_string(),
            source: e.into(),
        })
}
