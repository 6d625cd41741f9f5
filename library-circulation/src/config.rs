//! Runtime settings for a [`crate::LibraryManager`].
//!
//! Settings come from built-in defaults, optionally overlaid by a JSON file.
//! Every field may be omitted from the file.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{error::LibraryError, fine::FineRate};

/// Loan length used when the caller does not pick one
pub const DEFAULT_LOAN_DAYS: u32 = 14;

/// Error raised while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was being read
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for [`LibraryConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// The values parsed but are out of range
    #[error(transparent)]
    Invalid(#[from] LibraryError),
}

/// Circulation settings
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Fine charged per overdue day
    pub fine_per_day: f64,
    /// Loan length used by `LibraryManager::borrow_book`
    pub default_loan_days: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self { fine_per_day: FineRate::DEFAULT.per_day(), default_loan_days: DEFAULT_LOAN_DAYS }
    }
}

impl LibraryConfig {
    /// Defaults with a specific fine rate
    #[must_use]
    pub fn with_fine_per_day(fine_per_day: f64) -> Self {
        Self { fine_per_day, ..Self::default() }
    }

    /// Check that every value is usable and return the validated rate
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Validation` if the fine rate is negative or not
    /// finite, or if the default loan length is zero
    pub fn validate(&self) -> Result<FineRate, LibraryError> {
        let rate = FineRate::new(self.fine_per_day)?;
        if self.default_loan_days == 0 {
            return Err(LibraryError::Validation(
                "default_loan_days must be greater than 0".to_string(),
            ));
        }
        Ok(rate)
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or unknown fields and
    /// `ConfigError::Invalid` for out-of-range values
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`LibraryConfig::from_json_str`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading library config");
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json_str(&contents)
    }
}
