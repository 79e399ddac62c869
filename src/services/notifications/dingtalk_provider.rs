//! DingTalk (钉钉) custom robot provider.
//!
//! Robot API: `POST /robot/send?access_token=<token>` with a text message and
//! an `at` block that mentions everyone in the group.

use async_trait::async_trait;
use reqwest::Client;

use super::provider::{
    ChannelEnvelope, MentionPolicy, NotificationProvider, NotificationResult, post_envelope,
    require_credential,
};
use crate::config::DingTalkConfig;
use crate::error::AppResult;
use crate::models::AlertMessage;

/// DingTalk custom robot webhook endpoint
pub const DINGTALK_ROBOT_API: &str = "https://oapi.dingtalk.com/robot/send";

/// Sends alerts to a DingTalk group robot, mentioning all members.
pub struct DingTalkProvider {
    client: Client,
    config: DingTalkConfig,
    base_url: String,
}

impl DingTalkProvider {
    pub fn new(client: Client, config: DingTalkConfig) -> Self {
        Self::with_base_url(client, config, DINGTALK_ROBOT_API)
    }

    pub(crate) fn with_base_url(
        client: Client,
        config: DingTalkConfig,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            config,
            base_url: base_url.into(),
        }
    }

    fn build_api_url(&self) -> String {
        format!("{}?access_token={}", self.base_url, self.config.access_token)
    }
}

#[async_trait]
impl NotificationProvider for DingTalkProvider {
    async fn send(&self, message: &AlertMessage) -> AppResult<NotificationResult> {
        let envelope = ChannelEnvelope::text(message, MentionPolicy::All);
        post_envelope(&self.client, self.name(), &self.build_api_url(), &envelope).await
    }

    fn name(&self) -> &'static str {
        "dingtalk"
    }

    async fn validate_config(&self) -> AppResult<()> {
        require_credential(
            self.name(),
            &self.config.access_token,
            "set channels.dingtalk.access_token or HOSTALERT_CHANNELS__DINGTALK__ACCESS_TOKEN",
        )
    }
}
