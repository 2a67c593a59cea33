//! # Sequence Configuration
//!
//! Construction-time settings for a [`GuardedSequence`](crate::GuardedSequence).
//! Read once; nothing here changes after the container exists.

use serde::Deserialize;
use thiserror::Error;

/// Label used when none is configured.
pub const DEFAULT_LABEL: &str = "sequence";

/// Errors from loading or validating a [`SequenceConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML source could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The label was empty.
    #[error("sequence label must not be empty")]
    EmptyLabel,
}

/// Settings applied when a sequence is constructed.
///
/// ```rust
/// use rampart_core::SequenceConfig;
///
/// let config = SequenceConfig::from_toml_str(r#"
///     label = "pending-jobs"
///     initial_capacity = 256
/// "#).unwrap();
/// assert_eq!(config.label, "pending-jobs");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
    /// Name attached to every log event of the instance.
    pub label: String,
    /// Elements to reserve up front.
    pub initial_capacity: usize,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_owned(),
            initial_capacity: 0,
        }
    }
}

impl SequenceConfig {
    /// Default settings under a custom label.
    #[must_use]
    pub fn named(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Sets the number of elements reserved at construction.
    #[must_use]
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Parses and validates a config from TOML. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys, and
    /// [`ConfigError::EmptyLabel`] if the label is blank.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyLabel`] if the label is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel);
        }
        Ok(())
    }
}
