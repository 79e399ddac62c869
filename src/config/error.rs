//! Errors raised while locating, reading or checking settings

use std::path::PathBuf;

use thiserror::Error;

use super::loader::{CONFIG_DIR_ENV, CONFIG_FILE_ENV};

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file is absent
    #[error("configuration file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    /// Both a configuration directory and a single file were requested
    #[error("{} and {} cannot both be set", CONFIG_DIR_ENV, CONFIG_FILE_ENV)]
    ConflictingSources,

    /// A loaded value is out of range
    #[error("invalid `{field}`: {message}")]
    Invalid { field: &'static str, message: String },

    /// A source could not be read or did not match the settings shape
    #[error("failed to read configuration")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            message: message.into(),
        }
    }

    /// Settings key this error is about, used as the `AppError` key
    pub fn key(&self) -> &'static str {
        match self {
            ConfigError::MissingFile(_) | ConfigError::ConflictingSources => "config_file",
            ConfigError::Invalid { field, .. } => *field,
            ConfigError::Source(_) => "settings",
        }
    }
}
