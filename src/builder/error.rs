//! Build errors for the widget builder.

use thiserror::Error;

/// Errors that can occur when building a widget.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Widget identifier not specified. Call .identifier(id) before .build()")]
    MissingIdentifier,

    #[error("Widget identifier {0:?} cannot be used as a DOM id")]
    InvalidIdentifier(String),
}
