//! Summary rendering configuration
//!
//! [`SummaryConfig`] controls the two knobs the text format allows: the
//! width of one indent level and whether a first stack frame is shown under
//! each leaf failure. Everything else in the format is fixed.
//!
//! # Example
//!
//! ```rust
//! use failure_summary::SummaryConfig;
//!
//! let config = SummaryConfig::new().with_indent_width(2).with_stack(false);
//! assert!(config.validate().is_ok());
//! ```

use crate::{Result, SummaryError};
use serde::{Deserialize, Serialize};
use std::env::{self, VarError};

/// Prefix used by [`SummaryConfig::from_default_env`]
pub const DEFAULT_ENV_PREFIX: &str = "FAILURE_SUMMARY_";

/// Widest indent level accepted by [`SummaryConfig::validate`]
pub const MAX_INDENT_WIDTH: usize = 16;

/// Configuration for rendering summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Columns per nesting level
    pub indent_width: usize,
    /// Show the first stack frame under each leaf failure
    pub show_stack: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            show_stack: true,
        }
    }
}

impl SummaryConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of columns per nesting level
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Enable or disable the stack frame line
    pub fn with_stack(mut self, show: bool) -> Self {
        self.show_stack = show;
        self
    }

    /// Check that values are within range
    pub fn validate(&self) -> Result<()> {
        if self.indent_width == 0 || self.indent_width > MAX_INDENT_WIDTH {
            return Err(SummaryError::Config(format!(
                "indent width must be between 1 and {}, got {}",
                MAX_INDENT_WIDTH, self.indent_width
            )));
        }
        Ok(())
    }

    /// Load configuration from `{prefix}INDENT_WIDTH` and `{prefix}SHOW_STACK`
    ///
    /// Missing variables keep their defaults; the result is validated.
    /// `SHOW_STACK` accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`.
    pub fn from_env(prefix: &str) -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            indent_width: env_setting(prefix, "INDENT_WIDTH", |v| v.parse().ok())?
                .unwrap_or(defaults.indent_width),
            show_stack: env_setting(prefix, "SHOW_STACK", parse_flag)?
                .unwrap_or(defaults.show_stack),
        };
        config.validate()?;
        tracing::debug!(
            indent_width = config.indent_width,
            show_stack = config.show_stack,
            "loaded summary configuration"
        );
        Ok(config)
    }

    /// Load configuration using [`DEFAULT_ENV_PREFIX`]
    pub fn from_default_env() -> Result<Self> {
        Self::from_env(DEFAULT_ENV_PREFIX)
    }
}

/// Read `{prefix}{name}` and parse its trimmed value
///
/// `Ok(None)` when the variable is unset.
fn env_setting<T>(
    prefix: &str,
    name: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>> {
    let key = format!("{}{}", prefix, name);
    let value = match env::var(&key) {
        Ok(value) => value,
        Err(VarError::NotPresent) => return Ok(None),
        Err(VarError::NotUnicode(_)) => {
            return Err(SummaryError::Config(format!("{} is not valid UTF-8", key)))
        }
    };
    parse(value.trim()).map(Some).ok_or_else(|| {
        SummaryError::Config(format!("{} has an invalid value: {:?}", key, value))
    })
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
