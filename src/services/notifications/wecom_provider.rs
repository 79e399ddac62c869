//! WeCom (企业微信) group robot provider.
//!
//! Robot API: `POST /cgi-bin/webhook/send?key=<key>` with a text message body.

use async_trait::async_trait;
use reqwest::Client;

use super::provider::{
    ChannelEnvelope, MentionPolicy, NotificationProvider, NotificationResult, post_envelope,
    require_credential,
};
use crate::config::WeComConfig;
use crate::error::AppResult;
use crate::models::AlertMessage;

/// WeCom group robot webhook endpoint
pub const WECOM_ROBOT_API: &str = "https://qyapi.weixin.qq.com/cgi-bin/webhook/send";

/// Sends plain text alerts to a WeCom group robot.
///
/// No structured mention is set; the `@所有人` in the alert text is all the
/// group sees.
pub struct WeComProvider {
    client: Client,
    config: WeComConfig,
    base_url: String,
}

impl WeComProvider {
    pub fn new(client: Client, config: WeComConfig) -> Self {
        Self::with_base_url(client, config, WECOM_ROBOT_API)
    }

    pub(crate) fn with_base_url(
        client: Client,
        config: WeComConfig,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            config,
            base_url: base_url.into(),
        }
    }

    fn build_api_url(&self) -> String {
        format!("{}?key={}", self.base_url, self.config.key)
    }
}

#[async_trait]
impl NotificationProvider for WeComProvider {
    async fn send(&self, message: &AlertMessage) -> AppResult<NotificationResult> {
        let envelope = ChannelEnvelope::text(message, MentionPolicy::None);
        post_envelope(&self.client, self.name(), &self.build_api_url(), &envelope).await
    }

    fn name(&self) -> &'static str {
        "wecom"
    }

    async fn validate_config(&self) -> AppResult<()> {
        require_credential(
            self.name(),
            &self.config.key,
            "set channels.wecom.key or HOSTALERT_CHANNELS__WECOM__KEY",
        )
    }
}
