// ElasChat - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::relative_time::TimeAgoOptions;
use crate::util::constants;
use crate::util::error::ConfigError;
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for ElasChat data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/elaschat/ or %APPDATA%\ElasChat\config\)
    pub config_dir: PathBuf,

    /// Data directory holding the key-value store.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Use one directory for both config and data (`--data-dir`).
    pub fn single(dir: &Path) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            data_dir: dir.to_path_buf(),
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[display]` section.
    pub display: DisplaySection,
    /// `[session]` section.
    pub session: SessionSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[display]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// strftime pattern for dates older than the relative window.
    pub date_format: Option<String>,
    /// Days before "{n}d ago" becomes an absolute date.
    pub relative_days: Option<i64>,
}

/// `[session]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// File name of the key-value store inside the data directory.
    pub store_file: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Display --
    /// strftime pattern for absolute dates.
    pub date_format: String,
    /// Relative-label window in days.
    pub relative_days: i64,

    // -- Session --
    /// Key-value store file name.
    pub store_file_name: String,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            date_format: constants::DEFAULT_DATE_FORMAT.to_string(),
            relative_days: constants::DEFAULT_RELATIVE_DAYS,
            store_file_name: constants::DEFAULT_STORE_FILE_NAME.to_string(),
            log_level: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Relative-time options for the display layer.
    pub fn time_ago_options(&self) -> TimeAgoOptions {
        TimeAgoOptions {
            date_format: self.date_format.clone(),
            relative_days: self.relative_days,
        }
    }

    /// Full path of the key-value store under `data_dir`.
    pub fn store_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.store_file_name)
    }
}

/// True if `format` contains only recognised strftime items.
pub fn is_valid_date_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: config_path,
                source,
            };
            tracing::warn!(error = %err, "Using default configuration");
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(source) => {
            let err = ConfigError::TomlParse {
                path: config_path,
                source,
            };
            tracing::warn!(error = %err, "Using default configuration");
            warnings.push(format!(
                "{err}. Using defaults. See config.example.toml for the expected format."
            ));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Validate each field against named constants, accumulating all errors.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();
    let mut reject = |err: ConfigError, default: &dyn std::fmt::Display| {
        warnings.push(format!("{err}. Using default ({default})."));
    };

    // -- Display: date_format --
    if let Some(format) = raw.display.date_format {
        if is_valid_date_format(&format) {
            config.date_format = format;
        } else {
            reject(
                ConfigError::InvalidDateFormat { format },
                &constants::DEFAULT_DATE_FORMAT,
            );
        }
    }

    // -- Display: relative_days --
    if let Some(days) = raw.display.relative_days {
        if (constants::MIN_RELATIVE_DAYS..=constants::MAX_RELATIVE_DAYS).contains(&days) {
            config.relative_days = days;
        } else {
            reject(
                ConfigError::ValueOutOfRange {
                    field: "display.relative_days".to_string(),
                    value: days.to_string(),
                    expected: format!(
                        "{}-{}",
                        constants::MIN_RELATIVE_DAYS,
                        constants::MAX_RELATIVE_DAYS
                    ),
                },
                &constants::DEFAULT_RELATIVE_DAYS,
            );
        }
    }

    // -- Session: store_file --
    if let Some(name) = raw.session.store_file {
        let plain = !name.trim().is_empty()
            && Path::new(&name).file_name().map(|f| f == name.as_str()) == Some(true);
        if plain {
            config.store_file_name = name;
        } else {
            reject(
                ConfigError::ValueOutOfRange {
                    field: "session.store_file".to_string(),
                    value: name,
                    expected: "a plain file name without directories".to_string(),
                },
                &constants::DEFAULT_STORE_FILE_NAME,
            );
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            reject(
                ConfigError::ValueOutOfRange {
                    field: "logging.level".to_string(),
                    value: level,
                    expected: constants::VALID_LOG_LEVELS.join(", "),
                },
                &constants::DEFAULT_LOG_LEVEL,
            );
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) {
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), body).unwrap();
    }

    #[test]
    fn test_missing_config_uses_defaults_silently() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.date_format, constants::DEFAULT_DATE_FORMAT);
        assert_eq!(config.store_file_name, constants::DEFAULT_STORE_FILE_NAME);
    }

    #[test]
    fn test_valid_values_are_applied() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[display]
date_format = "%Y-%m-%d"
relative_days = 14

[session]
store_file = "auth.json"

[logging]
level = "debug"
file = "/tmp/elaschat.log"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.date_format, "%Y-%m-%d");
        assert_eq!(config.relative_days, 14);
        assert_eq!(config.store_path(dir.path()), dir.path().join("auth.json"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/elaschat.log"));
        assert_eq!(config.time_ago_options().relative_days, 14);
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[display]
date_format = "%Q"
relative_days = 0

[session]
store_file = "../escape.json"

[logging]
level = "loud"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 4, "warnings: {warnings:?}");
        assert_eq!(config.date_format, constants::DEFAULT_DATE_FORMAT);
        assert_eq!(config.relative_days, constants::DEFAULT_RELATIVE_DAYS);
        assert_eq!(config.store_file_name, constants::DEFAULT_STORE_FILE_NAME);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unparseable_config_returns_defaults_with_warning() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[display\nnot toml");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
        assert_eq!(config.relative_days, constants::DEFAULT_RELATIVE_DAYS);
    }

    #[test]
    fn test_date_format_validation() {
        assert!(is_valid_date_format("%-m/%-d/%Y"));
        assert!(is_valid_date_format("%d %b %Y"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format(""));
    }
}
