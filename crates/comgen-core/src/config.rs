//! Generator configuration types

use crate::{GeneratorError, GeneratorResult, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Indentation used in generated source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentStyle {
    #[default]
    Spaces,
    Tabs,
}

/// Configuration passed explicitly to every generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Spaces or tabs in generated code
    #[serde(default)]
    pub indent_style: IndentStyle,

    /// Number of spaces per indent level (ignored for tabs)
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Polling rounds in the generated handshake before a channel is declared failed
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,

    /// Per-poll timeout written into the generated `TIMEOUT` constant
    #[serde(default = "default_timeout")]
    pub timeout: u32,

    /// Report connection ends that can't be resolved instead of dropping them silently
    #[serde(default = "default_report_unresolved")]
    pub report_unresolved: bool,

    /// Initial log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Software view that receives the generated file-set reference when a
    /// component has more than one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_view: Option<String>,
}

fn default_indent_width() -> usize {
    4
}

fn default_retry_limit() -> u32 {
    5
}

fn default_timeout() -> u32 {
    1000
}

fn default_report_unresolved() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::default(),
            indent_width: default_indent_width(),
            retry_limit: default_retry_limit(),
            timeout: default_timeout(),
            report_unresolved: default_report_unresolved(),
            log_level: default_log_level(),
            sw_view: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from JSON bytes; empty input yields the defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> GeneratorResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file, choosing the format by extension (`.json` or TOML)
    pub fn from_file(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(content.as_bytes())?,
            _ => Self::from_toml(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would produce unusable output
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.retry_limit == 0 {
            return Err(GeneratorError::ConfigError(
                "retry_limit must be at least 1".to_string(),
            ));
        }

        if self.indent_style == IndentStyle::Spaces && self.indent_width == 0 {
            return Err(GeneratorError::ConfigError(
                "indent_width must be at least 1 when indenting with spaces".to_string(),
            ));
        }

        if self.level().is_none() {
            return Err(GeneratorError::ConfigError(format!(
                "unknown log level: {}",
                self.log_level
            )));
        }

        Ok(())
    }

    /// The configured log level, if it names one
    pub fn level(&self) -> Option<LogLevel> {
        LogLevel::parse(&self.log_level)
    }

    /// One level of indentation as configured
    pub fn indent_string(&self) -> String {
        match self.indent_style {
            IndentStyle::Spaces => " ".repeat(self.indent_width),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }
}
