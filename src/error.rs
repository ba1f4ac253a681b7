//! Error types for building mocks and loading dispatcher configuration.

use thiserror::Error;

/// Errors raised while constructing mocks or configuration.
///
/// Dispatching itself never fails; these surface at construction time.
#[derive(Debug, Error)]
pub enum MockError {
    /// A structured body could not be converted to JSON.
    #[error("failed to serialize mock body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Status code outside the HTTP range.
    #[error("invalid status code: {0}")]
    InvalidStatus(u16),

    /// Configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}
