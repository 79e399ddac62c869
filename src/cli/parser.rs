//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::models::AlertInput;

/// Send a new-host alert to the WeCom and DingTalk group robots
#[derive(Parser, Debug)]
#[command(name = "host-alert")]
#[command(about = "Send a new-host alert to the WeCom and DingTalk group robots")]
#[command(long_about = "
host-alert reports a newly seen machine to two group chats. It first checks
that the machine's external IP is located in China; if it is not, nothing is
sent and the process exits with status 1.

Channel credentials are read from the configuration file or the environment:
    HOSTALERT_CHANNELS__WECOM__KEY
    HOSTALERT_CHANNELS__DINGTALK__ACCESS_TOKEN

EXAMPLES:
    host-alert --computername WIN-01 --internalip 10.0.0.5 \\
        --externalip 1.2.3.4 --username alice --process cmd.exe

    # Use a configuration file and verbose logging
    host-alert --config /etc/host-alert.toml --verbose \\
        --computername WIN-01 --internalip 10.0.0.5 \\
        --externalip 1.2.3.4 --username alice --process cmd.exe

Exit status: 0 when both channels were sent to, 1 when the external IP was
rejected, 2 on any other failure.
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Name of the new host
    #[arg(long = "computername", value_name = "NAME")]
    pub computer_name: String,

    /// Internal (LAN) IP address of the host
    #[arg(long = "internalip", value_name = "IP")]
    pub internal_ip: String,

    /// External IP address of the host; this is what gets geolocated
    #[arg(long = "externalip", value_name = "IP")]
    pub external_ip: String,

    /// Logged-in user name
    #[arg(long = "username", value_name = "USER")]
    pub user_name: String,

    /// Process that triggered the alert
    #[arg(long = "process", value_name = "PROCESS")]
    pub process: String,

    /// Configuration file path
    ///
    /// Use a single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/host-alert.toml
    #[arg(
        short,
        long,
        value_name = "FILE",
        value_parser = super::validation::validate_config_file_path
    )]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug, which includes the raw geolocation answer.
    /// Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level override
    ///
    /// Takes precedence over --verbose/--quiet and the configuration file.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Validate argument combinations clap does not express
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }
        Ok(())
    }

    /// The host facts carried by this invocation
    pub fn alert_input(&self) -> AlertInput {
        AlertInput {
            computer_name: self.computer_name.clone(),
            internal_ip: self.internal_ip.clone(),
            external_ip: self.external_ip.clone(),
            user_name: self.user_name.clone(),
            process: self.process.clone(),
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Trace => "trace".to_string(),
        }
    }
}
