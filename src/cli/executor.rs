//! Command executor
//!
//! Runs the alert pipeline once parsing and configuration loading are done.

use super::parser::Cli;
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::services::{AlertService, DispatchReport};

/// Execute the alert for the parsed CLI arguments with the given settings
///
/// # Errors
/// Returns the pipeline's error unchanged so the caller can map it to an exit status
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<DispatchReport> {
    validate_command_args(cli)?;

    let service = AlertService::from_settings(&settings)?;
    tracing::debug!(channels = ?service.channel_names(), "alert service ready");

    service.run(&cli.alert_input()).await
}

fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|msg| AppError::Configuration {
        key: "cli_arguments".to_string(),
        source: anyhow::anyhow!(msg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::tests::parse_with;
    use crate::error::EXIT_FAILURE;

    #[tokio::test]
    async fn test_missing_wecom_key_fails_without_network() {
        let cli = parse_with(&[]).unwrap();

        let err = execute_command(&cli, Settings::default()).await.unwrap_err();

        assert!(matches!(&err, AppError::MissingCredential { channel, .. } if channel == "wecom"));
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }

    #[tokio::test]
    async fn test_missing_dingtalk_token_fails_without_network() {
        let cli = parse_with(&[]).unwrap();
        let mut settings = Settings::default();
        settings.channels.wecom.key = "k".to_string();

        let err = execute_command(&cli, settings).await.unwrap_err();

        assert!(
            matches!(&err, AppError::MissingCredential { channel, .. } if channel == "dingtalk")
        );
    }

    #[tokio::test]
    async fn test_conflicting_flags_are_rejected() {
        let mut cli = parse_with(&[]).unwrap();
        cli.verbose = true;
        cli.quiet = true;

        let err = execute_command(&cli, Settings::default()).await.unwrap_err();

        assert!(matches!(&err, AppError::Configuration { key, .. } if key == "cli_arguments"));
    }
}
