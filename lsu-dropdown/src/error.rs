//! Dropdown error types.

use thiserror::Error;

/// Errors raised while ingesting configuration or source data.
///
/// Interaction operations never fail; these only surface at the boundary
/// where items and options are converted from JSON.
#[derive(Debug, Error)]
pub enum DropdownError {
    /// An item was neither a string nor an object.
    #[error("unsupported item (expected a string or an object): {0}")]
    UnsupportedItem(serde_json::Value),

    /// A list of items was expected.
    #[error("expected a list of items, got {0}")]
    ExpectedList(serde_json::Value),

    /// The configuration document could not be read.
    #[error("failed to read dropdown config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration document could not be parsed.
    #[error("invalid dropdown config: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DropdownError>;
