use thiserror::Error;

use crate::config::error::ConfigError;

/// Exit status used when the geolocation gate turns the run away.
pub const EXIT_REJECTED: u8 = 1;

/// Exit status used for every other failure.
pub const EXIT_FAILURE: u8 = 2;

/// Application-wide error type covering every way a run can end early.
///
/// None of these are recovered from. Each one travels up to `main`, which
/// logs it and picks the process exit status through [`AppError::exit_code`].
#[derive(Error, Debug)]
pub enum AppError {
    /// The IP lookup request failed or its body could not be read
    #[error("Geolocation lookup failed for {ip}")]
    GeolocationLookup {
        ip: String,
        #[source]
        source: anyhow::Error,
    },

    /// The lookup succeeded but the IP is not in the allowed country
    #[error("External IP {ip} is not located in the allowed country")]
    GeolocationRejected { ip: String },

    /// The channel envelope could not be serialized
    #[error("Failed to encode {channel} message")]
    Encoding {
        channel: String,
        #[source]
        source: anyhow::Error,
    },

    /// The webhook POST could not be sent
    #[error("Failed to send message to {channel}")]
    DispatchRequest {
        channel: String,
        #[source]
        source: anyhow::Error,
    },

    /// The webhook answered but its body could not be read
    #[error("Failed to read {channel} response")]
    DispatchResponseRead {
        channel: String,
        #[source]
        source: anyhow::Error,
    },

    /// A channel credential was not provisioned
    #[error("Missing credential for {channel}: {hint}")]
    MissingCredential { channel: String, hint: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::GeolocationRejected { .. } => EXIT_REJECTED,
            _ => EXIT_FAILURE,
        }
    }

    /// This error and all of its sources, joined with `: `.
    pub fn chain(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Configuration {
            key: error.key().to_string(),
            source: error.into(),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
