//! CLI module for host-alert
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Running the alert pipeline

pub mod config_merger;
pub mod executor;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, LogLevel};

use crate::config::Settings;
use crate::error::AppResult;
use crate::logger::{LoggerConfig, init_logger};

/// Load and merge configuration from CLI arguments
///
/// Loads the base configuration (file or layered directory plus environment),
/// applies CLI overrides and validates the result.
///
/// # Errors
/// Returns `AppError::Configuration` if loading, merging, or validation fails
pub fn load_and_merge_config(cli: &Cli) -> AppResult<Settings> {
    let merger = ConfigurationMerger::from_config_path(cli.config.as_ref())?;
    Ok(merger.merge_cli_args(cli)?)
}

/// Initialize logger from settings
///
/// # Errors
/// Returns error if the log file cannot be opened or a subscriber is already installed
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    init_logger(LoggerConfig::from(settings.logger.clone()))
}
