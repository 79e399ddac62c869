//! Alert delivery channels.
//!
//! Two group-chat robots are supported: WeCom and DingTalk. Both implement
//! `NotificationProvider` and share the JSON envelope and POST logic in
//! `provider`.

mod dingtalk_provider;
mod provider;
mod wecom_provider;

pub use dingtalk_provider::{DINGTALK_ROBOT_API, DingTalkProvider};
pub use provider::{
    AtBlock, ChannelEnvelope, MentionPolicy, NotificationProvider, NotificationResult, TextBody,
};
pub use wecom_provider::{WECOM_ROBOT_API, WeComProvider};
