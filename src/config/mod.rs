//! Configuration management for host-alert
//!
//! Settings are layered from (lowest to highest priority):
//! 1. Built-in defaults
//! 2. `default.toml` then `local.toml` in the configuration directory,
//!    or a single file given with `--config` / `HOSTALERT_CONFIG_FILE`
//! 3. `HOSTALERT_*` environment variables
//!
//! Channel credentials normally arrive through the environment, e.g.
//! `HOSTALERT_CHANNELS__WECOM__KEY` and `HOSTALERT_CHANNELS__DINGTALK__ACCESS_TOKEN`.

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::ConfigLoader;
pub use settings::{ChannelsConfig, DingTalkConfig, HttpConfig, Settings, WeComConfig};
