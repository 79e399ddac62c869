//! Configuration loader for host-alert
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
pub const CONFIG_DIR_ENV: &str = "HOSTALERT_CONFIG_DIR";

/// Environment variable for specific configuration file
pub const CONFIG_FILE_ENV: &str = "HOSTALERT_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "HOSTALERT";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, in order of priority:
/// 1. Built-in defaults
/// 2. `default.toml` and `local.toml` from the configuration directory (both optional),
///    or one explicit configuration file (required)
/// 3. `HOSTALERT_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment
    ///
    /// Reads `HOSTALERT_CONFIG_DIR` and `HOSTALERT_CONFIG_FILE`.
    ///
    /// # Errors
    ///
    /// Returns an error if both variables are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::ConflictingSources);
        }

        let config_dir = config_dir_var
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));

        Ok(Self {
            config_dir,
            config_file,
        })
    }

    /// Create a loader that reads a single configuration file
    ///
    /// The file is required to exist. Environment variables still apply on top.
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
        }
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the explicit configuration file does not exist
    /// - configuration parsing fails
    /// - configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // HOSTALERT_CHANNELS__WECOM__KEY -> channels.wecom.key
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    /// Environment variables with prefix `HOSTALERT_` map to configuration keys,
    /// with `__` separating nested keys.
    ///
    /// Values stay strings; numeric and boolean fields are converted during
    /// deserialization, so credentials keep leading zeros and letter case.
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true),
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    // Global mutex to ensure tests run sequentially to avoid env var conflicts
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: &[&str] = &[
        "HOSTALERT_CHANNELS__WECOM__KEY",
        "HOSTALERT_CHANNELS__DINGTALK__ACCESS_TOKEN",
        "HOSTALERT_HTTP__TIMEOUT_SECONDS",
        "HOSTALERT_LOGGER__LEVEL",
        "HOSTALERT_LOGGER__CONSOLE__COLORED",
    ];

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            let path = temp_dir.path().join(name);
            fs::write(&path, content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Serializes env-dependent tests and clears every variable the loader reads.
    ///
    /// The env guard comes first so it restores variables while the lock is still held.
    pub(crate) fn env_guard() -> (EnvGuard, MutexGuard<'static, ()>) {
        let lock = TEST_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        (EnvGuard::new(), lock)
    }

    /// Helper to safely set environment variables for a test
    pub(crate) struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            guard.remove(CONFIG_DIR_ENV);
            guard.remove(CONFIG_FILE_ENV);
            for var in OVERRIDE_VARS {
                guard.remove(var);
            }
            guard
        }

        pub(crate) fn set(&mut self, key: &str, value: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // Restore in reverse so the earliest snapshot wins
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_config_loader_new_default() {
        let _env = env_guard();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir, Path::new("config"));
        assert!(loader.config_file.is_none());
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let (mut env, _lock) = env_guard();

        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        match ConfigLoader::new() {
            Err(err @ ConfigError::ConflictingSources) => {
                let msg = err.to_string();
                assert!(msg.contains("HOSTALERT_CONFIG_DIR"));
                assert!(msg.contains("HOSTALERT_CONFIG_FILE"));
            }
            other => panic!("Expected ConflictingSources, got {other:?}"),
        }
    }

    #[test]
    fn test_load_empty_dir_uses_defaults() {
        let (mut env, _lock) = env_guard();

        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_local_toml_overrides_default_toml() {
        let (mut env, _lock) = env_guard();

        let temp_dir = setup_config_dir(&[
            (
                "default.toml",
                r#"
[http]
timeout_seconds = 20

[channels.wecom]
key = "from-default"
"#,
            ),
            (
                "local.toml",
                r#"
[channels.wecom]
key = "from-local"
"#,
            ),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.http.timeout_seconds, 20);
        assert_eq!(settings.channels.wecom.key, "from-local");
    }

    #[test]
    fn test_env_overrides_file() {
        let (mut env, _lock) = env_guard();

        let temp_dir = setup_config_dir(&[(
            "default.toml",
            r#"
[channels.dingtalk]
access_token = "from-file"
"#,
        )]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("HOSTALERT_CHANNELS__DINGTALK__ACCESS_TOKEN", "from-env");
        env.set("HOSTALERT_CHANNELS__WECOM__KEY", "wecom-env");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.channels.dingtalk.access_token, "from-env");
        assert_eq!(settings.channels.wecom.key, "wecom-env");
    }

    #[test]
    fn test_from_file_missing_is_error() {
        let _env = env_guard();

        let temp_dir = setup_config_dir(&[]);
        let loader = ConfigLoader::from_file(temp_dir.path().join("absent.toml"));

        match loader.load() {
            Err(ConfigError::MissingFile(path)) => assert!(path.ends_with("absent.toml")),
            other => panic!("Expected MissingFile, got {other:?}"),
        }
    }

    #[test]
    fn test_from_file_loads_values() {
        let _env = env_guard();

        let temp_dir = setup_config_dir(&[(
            "alert.toml",
            r#"
[logger]
level = "debug"

[logger.console]
colored = false

[channels.wecom]
key = "k-123"
"#,
        )]);
        let loader = ConfigLoader::from_file(temp_dir.path().join("alert.toml"));

        let settings = loader.load().unwrap();
        assert_eq!(settings.logger.level, "debug");
        assert!(!settings.logger.console.colored);
        assert_eq!(settings.channels.wecom.key, "k-123");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let _env = env_guard();

        let temp_dir = setup_config_dir(&[(
            "bad.toml",
            r#"
[http]
timeout_seconds = 0
"#,
        )]);
        let loader = ConfigLoader::from_file(temp_dir.path().join("bad.toml"));

        match loader.load() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "http.timeout_seconds"),
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_env_credentials_are_kept_verbatim() {
        let (mut env, _lock) = env_guard();

        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("HOSTALERT_CHANNELS__WECOM__KEY", "0012345");
        env.set("HOSTALERT_CHANNELS__DINGTALK__ACCESS_TOKEN", "TRUE");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.channels.wecom.key, "0012345");
        assert_eq!(settings.channels.dingtalk.access_token, "TRUE");
    }

    #[test]
    fn test_env_numbers_and_flags_still_convert() {
        let (mut env, _lock) = env_guard();

        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("HOSTALERT_HTTP__TIMEOUT_SECONDS", "45");
        env.set("HOSTALERT_LOGGER__CONSOLE__COLORED", "false");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.http.timeout_seconds, 45);
        assert!(!settings.logger.console.colored);
    }

    #[test]
    fn test_malformed_file_is_source_error() {
        let _env = env_guard();

        let temp_dir = setup_config_dir(&[("broken.toml", "[http]\ntimeout_seconds = \"soon\"\n")]);
        let loader = ConfigLoader::from_file(temp_dir.path().join("broken.toml"));

        assert!(matches!(loader.load(), Err(ConfigError::Source(_))));
    }
}
