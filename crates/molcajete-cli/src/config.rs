//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and handed to the recipe. The
//! core crates never see it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied by the ingredients, not here)
//! 2. `MOLCAJETE__*` environment variables (`MOLCAJETE__COLOR__COLOR_MIXER`)
//! 3. Config file (`$MOLCAJETE_CONFIG` or the platform config directory)
//! 4. Built-in defaults

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use molcajete_core::application::ingredients::ColorSettings;
use molcajete_ingredients::LogLevel;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "MOLCAJETE_CONFIG";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default for `--log-level`.
    pub log_level: Option<String>,
    /// Color controller defaults.
    pub color: ColorSettings,
}

impl AppConfig {
    /// Load configuration from the default file location and the
    /// environment.
    pub fn load() -> anyhow::Result<Self> {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::config_path);
        Self::load_from(&path)
    }

    /// Load configuration from `path` (optional) and the environment.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("MOLCAJETE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;
        settings
            .try_deserialize()
            .context("configuration has an invalid shape")
    }

    /// The configured default log level.
    pub fn log_level(&self) -> anyhow::Result<LogLevel> {
        match &self.log_level {
            Some(level) => level
                .parse()
                .with_context(|| format!("invalid log_level {level:?} in configuration")),
            None => Ok(LogLevel::default()),
        }
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.molcajete.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "molcajete", "molcajete")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".molcajete.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_leave_everything_unset() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.log_level, None);
        assert_eq!(cfg.color, ColorSettings::default());
        assert_eq!(cfg.log_level().unwrap(), LogLevel::Warning);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.color.color_mixer, None);
    }

    #[test]
    fn toml_file_is_read() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r##"
log_level = "debug"

[color]
enable = true
color_mixer = "indexed-8"

[color.colors]
brand = ["#ff8700", "208"]
"##
        )
        .unwrap();

        let cfg = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.log_level().unwrap(), LogLevel::Debug);
        assert_eq!(cfg.color.enable, Some(true));
        assert_eq!(cfg.color.color_mixer.as_deref(), Some("indexed-8"));
        assert_eq!(cfg.color.colors["brand"], ["#ff8700", "208"]);
    }

    #[test]
    fn bad_log_level_is_reported() {
        let cfg = AppConfig {
            log_level: Some("chatty".into()),
            ..AppConfig::default()
        };
        let err = cfg.log_level().unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
