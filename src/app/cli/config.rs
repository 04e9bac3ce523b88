//! TOML configuration file loading and merging
//!
//! The configuration file is optional. An explicit `--config-file` must exist; the
//! default `<config_dir>/Vecscan/vecscan.toml` is only read when present. Values
//! from the command line always win over values from the file.
//!
//! ```toml
//! [scanner]
//! follow_symlinks = false
//! sort_entries = true
//! max_depth = 8
//! channel_capacity = 256
//!
//! [output]
//! format = "text"
//! color = true
//!
//! [logging]
//! level = "info"
//! format = "ext"
//! file = "/tmp/vecscan.log"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::args::{Args, LOG_LEVELS};
use crate::app::output::OutputFormat;
use crate::core::logging::LogFormat;
use crate::scanner::api::ScannerConfig;

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("Cannot read configuration file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse configuration file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value in configuration file '{}': {message}", path.display())]
    Invalid { path: PathBuf, message: String },
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true // Every variant points at a file the user controls
    }

    fn user_message(&self) -> Option<&str> {
        Some(match self {
            ConfigError::NotFound { .. } => "Check the path given to --config-file",
            ConfigError::Read { .. } => "Check the permissions of the configuration file",
            ConfigError::Parse { .. } => {
                "Fix the TOML syntax; only [scanner], [output] and [logging] keys are accepted"
            }
            ConfigError::Invalid { .. } => "Correct the reported value",
        })
    }
}

/// `[scanner]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScannerSection {
    pub follow_symlinks: Option<bool>,
    pub sort_entries: Option<bool>,
    pub max_depth: Option<usize>,
    pub channel_capacity: Option<usize>,
}

/// `[output]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
}

/// `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
}

/// Parsed configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub scanner: ScannerSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl ConfigFile {
    /// Parse and validate configuration text; `path` is only used for messages
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let config: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        };

        if let Some(capacity) = self.scanner.channel_capacity {
            if !(1..=ScannerConfig::MAX_CHANNEL_CAPACITY).contains(&capacity) {
                return Err(invalid(format!(
                    "scanner.channel_capacity must be between 1 and {}",
                    ScannerConfig::MAX_CHANNEL_CAPACITY
                )));
            }
        }
        if let Some(level) = &self.logging.level {
            if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(invalid(format!(
                    "logging.level '{}' is not one of {}",
                    level,
                    LOG_LEVELS.join(", ")
                )));
            }
        }
        if let Some(format) = &self.logging.format {
            format.parse::<LogFormat>().map_err(invalid)?;
        }
        Ok(())
    }
}

/// Default configuration file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Vecscan").join("vecscan.toml"))
}

/// Load the configuration file
///
/// Returns `Ok(None)` when no file was requested and the default one does not exist.
pub async fn load_config(
    explicit: Option<&Path>,
) -> Result<Option<(PathBuf, ConfigFile)>, ConfigError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
    let config = ConfigFile::parse(&path, &contents)?;
    Ok(Some((path, config)))
}

/// Effective settings after merging command line, configuration file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub root: PathBuf,
    pub scanner: ScannerConfig,
    pub output_format: OutputFormat,
    /// `None` leaves the decision to terminal detection
    pub color: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(args: &Args, config: Option<&ConfigFile>) -> Self {
        let defaults = ConfigFile::default();
        let config = config.unwrap_or(&defaults);
        let base = ScannerConfig::default();

        let scanner = ScannerConfig {
            follow_symlinks: args
                .follow_symlinks_override()
                .or(config.scanner.follow_symlinks)
                .unwrap_or(base.follow_symlinks),
            sort_entries: args
                .sort_override()
                .or(config.scanner.sort_entries)
                .unwrap_or(base.sort_entries),
            max_depth: args.max_depth.or(config.scanner.max_depth),
            channel_capacity: config
                .scanner
                .channel_capacity
                .unwrap_or(base.channel_capacity),
        };

        // Values reaching here were validated by clap or ConfigFile::validate
        let output_format: OutputFormat = args
            .format
            .as_deref()
            .and_then(|f| f.parse().ok())
            .or(config.output.format)
            .unwrap_or_default();
        let log_format: LogFormat = args
            .log_format
            .as_deref()
            .or(config.logging.format.as_deref())
            .and_then(|f| f.parse().ok())
            .unwrap_or_default();

        Settings {
            root: args.root.clone(),
            scanner,
            output_format,
            color: args.color_override().or(config.output.color),
            log_level: args
                .log_level
                .clone()
                .or_else(|| config.logging.level.as_ref().map(|l| l.to_ascii_lowercase())),
            log_format,
            log_file: args.log_file.clone().or_else(|| config.logging.file.clone()),
        }
    }
}
