//! Geolocation gate.
//!
//! Decides whether an external IP belongs to the country alerts are sent for.
//! The CSDN lookup answer is treated as opaque text and tested for the
//! country name; swapping in structured parsing only touches this module.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// CSDN IP lookup endpoint, queried as `?ip=<address>`
pub const IP_LOOKUP_API: &str = "https://searchplugin.csdn.net/api/v1/ip/get";

/// Text that marks a lookup answer as located in China
pub const CHINA_MARKER: &str = "中国";

/// Answers whether an IP address is located in the allowed country.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Returns `Ok(true)` to proceed, `Ok(false)` to reject.
    ///
    /// Transport and body-read failures are errors, never a rejection.
    async fn is_domestic(&self, ip: &str) -> AppResult<bool>;

    /// Returns the locator name for logging
    fn name(&self) -> &'static str;
}

/// Raw, case-sensitive substring test. No trimming, no parsing.
pub fn contains_country_marker(body: &str, marker: &str) -> bool {
    body.contains(marker)
}

/// Geolocation through the CSDN search plugin IP API
pub struct CsdnGeoLocator {
    client: Client,
    endpoint: String,
}

impl CsdnGeoLocator {
    pub fn new(client: Client) -> Self {
        Self::with_endpoint(client, IP_LOOKUP_API)
    }

    pub(crate) fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn lookup_url(&self, ip: &str) -> String {
        format!("{}?ip={}", self.endpoint, ip)
    }

    fn make_error(ip: &str, source: reqwest::Error) -> AppError {
        AppError::GeolocationLookup {
            ip: ip.to_string(),
            source: source.into(),
        }
    }
}

#[async_trait]
impl GeoLocator for CsdnGeoLocator {
    async fn is_domestic(&self, ip: &str) -> AppResult<bool> {
        let url = self.lookup_url(ip);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::make_error(ip, e))?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| Self::make_error(ip, e))?;
        debug!(ip, status, body = %body, "geolocation lookup answered");

        Ok(contains_country_marker(&body, CHINA_MARKER))
    }

    fn name(&self) -> &'static str {
        "csdn"
    }
}
