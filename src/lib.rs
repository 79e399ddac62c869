//! host-alert Library
//!
//! One-shot host onboarding alerts: check that a new machine's external IP is
//! domestic, then post a formatted alert to the WeCom and DingTalk group robots.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
