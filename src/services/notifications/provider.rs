//! Core notification provider trait and types.
//!
//! Both group-chat robots share one dispatch shape: wrap the alert in a JSON
//! envelope, POST it once, read the whole answer and log it.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::models::AlertMessage;

/// Result of a delivered webhook call
#[derive(Debug, Clone)]
pub struct NotificationResult {
    /// Provider name that produced this result
    pub channel: String,
    /// Whether the HTTP status was 2xx
    pub success: bool,
    /// HTTP status code
    pub status_code: u16,
    /// Response body as returned by the provider
    pub response: String,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

/// Whether a dispatched message asks the channel to notify every member
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionPolicy {
    /// Plain text only
    None,
    /// Mention block naming `@all` with the mention-all flag set
    All,
}

/// `{"content": ...}` block shared by both robots
#[derive(Debug, Serialize)]
pub struct TextBody<'a> {
    pub content: &'a str,
}

/// Mention block understood by the DingTalk robot
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtBlock {
    pub at_mobiles: Vec<String>,
    pub is_at_all: bool,
}

/// Text-message envelope; the `at` block is omitted unless a mention is requested
#[derive(Debug, Serialize)]
pub struct ChannelEnvelope<'a> {
    pub msgtype: &'static str,
    pub text: TextBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<AtBlock>,
}

impl<'a> ChannelEnvelope<'a> {
    pub fn text(message: &'a AlertMessage, mention: MentionPolicy) -> Self {
        let at = match mention {
            MentionPolicy::None => None,
            MentionPolicy::All => Some(AtBlock {
                at_mobiles: vec!["@all".to_string()],
                is_at_all: true,
            }),
        };

        Self {
            msgtype: "text",
            text: TextBody {
                content: message.as_str(),
            },
            at,
        }
    }
}

/// A group-chat channel an alert can be delivered to.
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Delivers the alert once.
    ///
    /// Encoding, request and response-read failures are errors. A non-2xx
    /// answer is reported in the result, not as an error.
    async fn send(&self, message: &AlertMessage) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;

    /// Validates provider configuration (optional, default no-op)
    ///
    /// Runs before anything is sent.
    async fn validate_config(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Serializes `envelope` and POSTs it to `url` as JSON, then logs status and body.
pub(crate) async fn post_envelope(
    client: &Client,
    channel: &'static str,
    url: &str,
    envelope: &ChannelEnvelope<'_>,
) -> AppResult<NotificationResult> {
    let body = serde_json::to_vec(envelope).map_err(|e| AppError::Encoding {
        channel: channel.to_string(),
        source: e.into(),
    })?;

    let start = Instant::now();
    let response = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await
        .map_err(|e| AppError::DispatchRequest {
            channel: channel.to_string(),
            source: e.into(),
        })?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| AppError::DispatchResponseRead {
            channel: channel.to_string(),
            source: e.into(),
        })?;
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_success() {
        info!(
            channel,
            status = status.as_u16(),
            body = %response_text,
            duration_ms,
            "channel responded"
        );
    } else {
        warn!(
            channel,
            status = status.as_u16(),
            body = %response_text,
            duration_ms,
            "channel responded with an error status"
        );
    }

    Ok(NotificationResult {
        channel: channel.to_string(),
        success: status.is_success(),
        status_code: status.as_u16(),
        response: response_text,
        duration_ms,
    })
}

/// Rejects an empty credential before any request is made.
pub(crate) fn require_credential(channel: &'static str, value: &str, hint: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::MissingCredential {
            channel: channel.to_string(),
            hint: hint.to_string(),
        });
    }
    Ok(())
}
