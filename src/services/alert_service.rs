//! Alert pipeline: geolocation gate, composition, then each channel in turn.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::notifications::{
    DingTalkProvider, NotificationProvider, NotificationResult, WeComProvider,
};
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::external::{CsdnGeoLocator, GeoLocator, build_http_client};
use crate::models::{AlertInput, AlertMessage, compose_alert};

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// The alert text that was delivered
    pub message: AlertMessage,
    /// One entry per channel, in dispatch order
    pub results: Vec<NotificationResult>,
}

/// Runs the alert pipeline for one host.
///
/// Channels are tried in order and the first failure ends the run, so a
/// failing WeCom dispatch means DingTalk is never attempted.
pub struct AlertService {
    geo: Arc<dyn GeoLocator>,
    channels: Vec<Arc<dyn NotificationProvider>>,
}

impl AlertService {
    pub fn new(geo: Arc<dyn GeoLocator>, channels: Vec<Arc<dyn NotificationProvider>>) -> Self {
        Self { geo, channels }
    }

    /// Wires the CSDN lookup and the WeCom then DingTalk robots from settings.
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let client = build_http_client(&settings.http)?;

        let geo: Arc<dyn GeoLocator> = Arc::new(CsdnGeoLocator::new(client.clone()));
        let channels: Vec<Arc<dyn NotificationProvider>> = vec![
            Arc::new(WeComProvider::new(
                client.clone(),
                settings.channels.wecom.clone(),
            )),
            Arc::new(DingTalkProvider::new(
                client,
                settings.channels.dingtalk.clone(),
            )),
        ];

        Ok(Self::new(geo, channels))
    }

    /// Names of the configured channels, in dispatch order
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Checks every channel's configuration without sending anything.
    pub async fn validate(&self) -> AppResult<()> {
        for channel in &self.channels {
            channel.validate_config().await?;
        }
        Ok(())
    }

    /// Runs the pipeline.
    ///
    /// Nothing is composed or sent unless the external IP passes the gate.
    #[instrument(skip_all, fields(ip = %input.external_ip, host = %input.computer_name))]
    pub async fn run(&self, input: &AlertInput) -> AppResult<DispatchReport> {
        self.validate().await?;

        let ip = input.external_ip.as_str();
        if !self.geo.is_domestic(ip).await? {
            warn!(ip, locator = self.geo.name(), "external IP is not domestic, no alert sent");
            return Err(AppError::GeolocationRejected { ip: ip.to_string() });
        }
        info!(ip, locator = self.geo.name(), "external IP passed the geolocation gate");

        let message = compose_alert(input);

        let mut results = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            info!(channel = channel.name(), "dispatching alert");
            let result = channel.send(&message).await?;
            results.push(result);
        }

        info!(content = %message, "alert dispatched");

        Ok(DispatchReport { message, results })
    }
}
