//! Source Faker Library
//!
//! A mock source connector that generates synthetic Users, Products and
//! Purchases for exercising extract-load pipelines without a real backend.
//!
//! # Features
//!
//! - Catalog discovery: three streams with fixed JSON schemas
//! - Incremental reads: Users resume from a checkpointed cursor
//! - Correlated data: every user is followed by their purchases
//! - Reproducibility: the same seed and cursor produce the same users
//!
//! # Streams
//!
//! - `Users` - synthetic profiles, full refresh or incremental
//! - `Purchases` - generated inline with Users, ids continue across syncs
//! - `Products` - a fixed catalog, full refresh only
//!
//! # CLI Usage
//!
//! ```bash
//! # Describe the configuration
//! source-faker spec
//!
//! # List the streams
//! source-faker discover --config config.json
//!
//! # Generate records, resuming from a previous state
//! source-faker read --config config.json --catalog catalog.json --state state.json
//! ```
//!
//! # Library Usage
//!
//! ```rust
//! use checkpoint::SyncState;
//! use source_faker::{catalog, sync, SourceConfig};
//! use source_protocol::{ConfiguredCatalog, StreamName};
//!
//! let config = SourceConfig { count: 3, seed: Some(42), ..SourceConfig::default() };
//! let configured = ConfiguredCatalog::select(&catalog::discover().unwrap(), &[StreamName::Users]);
//!
//! let messages = sync::read(&config, &configured, SyncState::new())
//!     .unwrap()
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(messages.len(), 4);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod sync;

pub use config::SourceConfig;
pub use error::SourceError;
pub use sync::{read, read_at, SyncIterator};
