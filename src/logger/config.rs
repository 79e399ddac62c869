//! Runtime options read by `init_logger`
//!
//! These are built from already validated `LoggerSettings`; nothing here
//! re-checks them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which outputs to install and at what level
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// `EnvFilter` directive, e.g. `info` or `host_alert=debug`
    pub filter: String,
    /// Stderr output, if enabled
    pub console: Option<ConsoleConfig>,
    /// Log file output, if enabled
    pub file: Option<FileConfig>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleConfig {
    /// ANSI colors, applied only when stderr is a terminal
    pub colored: bool,
}

#[derive(Debug, Clone)]
pub struct FileConfig {
    pub path: PathBuf,
    /// Keep existing content instead of truncating
    pub append: bool,
    pub format: LogFormat,
}

/// Line format of the log file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}
