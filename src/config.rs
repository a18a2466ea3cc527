//! Configuration for the compactsize command-line tool
//!
//! Settings can be loaded from a JSON config file, environment variables,
//! or built programmatically. Precedence (lowest to highest): defaults,
//! config file, environment, command-line flags.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// How encode/decode results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per field
    #[default]
    Text,
    /// One JSON object per field
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Output rendering configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Rendering format
    /// Default: text
    #[serde(default)]
    pub format: OutputFormat,

    /// Print hex with uppercase digits
    /// Default: false
    #[serde(default)]
    pub uppercase_hex: bool,
}

/// Top-level tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub output: OutputConfig,

    /// `env_logger` filter used when `RUST_LOG` is unset
    /// Default: "info"
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CliConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&contents)?)
    }

    /// Load configuration from environment variables on top of the defaults
    ///
    /// Environment variables follow the pattern: `COMPACTSIZE_<SECTION>_<KEY>`
    ///
    /// Examples:
    /// - `COMPACTSIZE_OUTPUT_FORMAT=json`
    /// - `COMPACTSIZE_OUTPUT_UPPERCASE_HEX=true`
    /// - `COMPACTSIZE_LOG_LEVEL=debug`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from the environment; unparseable values are ignored
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Override fields from `lookup`, keyed by environment variable name
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("COMPACTSIZE_OUTPUT_FORMAT") {
            if let Ok(format) = val.parse::<OutputFormat>() {
                self.output.format = format;
            }
        }
        if let Some(val) = lookup("COMPACTSIZE_OUTPUT_UPPERCASE_HEX") {
            if let Ok(enabled) = val.trim().parse::<bool>() {
                self.output.uppercase_hex = enabled;
            }
        }
        if let Some(val) = lookup("COMPACTSIZE_LOG_LEVEL") {
            if !val.trim().is_empty() {
                self.log_level = val.trim().to_string();
            }
        }
    }

    /// Render bytes as hex according to `output.uppercase_hex`
    pub fn format_hex(&self, bytes: &[u8]) -> String {
        if self.output.uppercase_hex {
            hex::encode_upper(bytes)
        } else {
            hex::encode(bytes)
        }
    }
}
