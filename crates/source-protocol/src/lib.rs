//! Message envelope types for the source-faker connector.
//!
//! This crate provides the wire-level types exchanged with the hosting
//! extract-load platform, including:
//!
//! - [`StreamName`] - The closed set of streams the connector can emit
//! - [`StreamDescriptor`] / [`Catalog`] - Stream metadata returned by `discover`
//! - [`ConfiguredCatalog`] - The subset of streams selected for a `read`
//! - [`Message`] - The tagged union written to stdout, one JSON object per line
//!
//! # Architecture
//!
//! ```text
//! source-protocol (this crate)
//!    │
//!    ├─── checkpoint        (builds STATE messages from typed checkpoints)
//!    │
//!    ├─── faker-generator   (produces the data carried by RECORD messages)
//!    │
//!    └─── source-faker      (catalog provider, sync driver, CLI)
//! ```
//!
//! # Example
//!
//! ```rust
//! use source_protocol::{Message, RecordMessage, StreamName};
//!
//! let record = RecordMessage::new(StreamName::Users, serde_json::Map::new(), 1_700_000_000_000);
//! let line = serde_json::to_string(&Message::record(record)).unwrap();
//! assert!(line.starts_with(r#"{"type":"RECORD""#));
//! ```

pub mod message;
pub mod stream;

// Re-exports for convenience
pub use message::{
    ConnectionStatus, ConnectorSpecification, Message, RecordMessage, StateMessage, Status,
};
pub use stream::{
    Catalog, ConfiguredCatalog, ConfiguredStream, DestinationSyncMode, StreamDescriptor,
    StreamName, SyncMode,
};

/// Error type for protocol operations.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Stream name outside the supported set
    #[error("Unknown stream: {0}")]
    UnknownStream(String),
}
