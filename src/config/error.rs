//! Config loading errors.

use thiserror::Error;

/// Errors that can occur when loading config text.
///
/// Normalization itself never fails: settings are clamped or defaulted.
/// Only text that is not JSON at all is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The text is not valid JSON
    #[error("Config is not valid JSON: {0}")]
    Syntax(#[source] serde_json::Error),
}
