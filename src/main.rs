use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use host_alert::cli::{Cli, execute_command, init_logger_from_settings, load_and_merge_config};
use host_alert::error::EXIT_FAILURE;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_and_merge_config(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{}", err.chain());
            return ExitCode::from(err.exit_code());
        }
    };

    if let Err(e) = init_logger_from_settings(&settings) {
        eprintln!("Logger initialization error: {:#}", e);
        return ExitCode::from(EXIT_FAILURE);
    }

    info!(version = host_alert::pkg_version(), "host-alert starting");

    match execute_command(&cli, settings).await {
        Ok(report) => {
            for result in &report.results {
                info!(
                    channel = %result.channel,
                    status = result.status_code,
                    success = result.success,
                    duration_ms = result.duration_ms,
                    "channel delivered"
                );
            }
            info!(channels = report.results.len(), "all channels notified");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err.chain(), "alert run failed");
            ExitCode::from(err.exit_code())
        }
    }
}
