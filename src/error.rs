//! Error type for connector operations.

use faker_generator::GeneratorError;
use source_protocol::ProtocolError;

/// Errors surfaced to the caller of `read`. All of them are fatal and abort
/// the sync.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Invalid stream combination, e.g. Purchases without Users
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Requested stream outside Users, Products and Purchases
    #[error("Unknown stream: {0}")]
    UnknownStream(String),

    /// Prior state has an entry that is not a valid checkpoint
    #[error("Invalid state: {0}")]
    State(String),

    /// Embedded schema or specification fixture is not valid JSON
    #[error("Invalid embedded fixture {name}: {source}")]
    Fixture {
        name: &'static str,
        source: serde_json::Error,
    },

    /// Record generation failed
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

impl From<ProtocolError> for SourceError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::UnknownStream(name) => SourceError::UnknownStream(name),
        }
    }
}
