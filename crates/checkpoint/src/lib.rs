//! Checkpoint management for source-faker
//!
//! Provides typed per-stream checkpoints and the combined state object that
//! the connector hands back to the platform after every slice.
//!
//! # Architecture
//!
//! This crate provides a small checkpoint system that:
//! - Defines the `Checkpoint` trait for stream-specific checkpoint types
//! - Provides `SyncState`, the combined mapping re-sent in full on every checkpoint
//! - Loads prior state from a JSON file via `load_state_file`
//!
//! ## Checkpoint Types
//!
//! - `UsersCheckpoint` - `{cursor, seed}`
//! - `PurchasesCheckpoint` - `{purchases_count}`
//! - `ProductsCheckpoint` - `{product_count}`
//!
//! The hosting platform has no per-stream state, so every STATE message
//! carries the entries of all streams, including ones this run never touched.

mod file;
mod state;
mod streams;


// Re-export file helpers
pub use file::{load_state_file, parse_state};

// Re-export state types
pub use state::SyncState;

// Re-export stream checkpoint types
pub use streams::{ProductsCheckpoint, PurchasesCheckpoint, UsersCheckpoint};

use source_protocol::StreamName;

/// Trait that stream-specific checkpoints must implement.
///
/// This trait ties a checkpoint type to the stream whose entry it occupies in
/// [`SyncState`].
///
/// # Example
///
/// ```rust
/// use checkpoint::Checkpoint;
/// use serde::{Deserialize, Serialize};
/// use source_protocol::StreamName;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct ProductOffset {
///     pub offset: u64,
/// }
///
/// impl Checkpoint for ProductOffset {
///     const STREAM: StreamName = StreamName::Products;
///
///     fn to_cli_string(&self) -> String {
///         format!("offset={}", self.offset)
///     }
/// }
/// ```
pub trait Checkpoint: serde::Serialize + for<'de> serde::Deserialize<'de> + Clone {
    /// Stream whose state entry this checkpoint occupies.
    const STREAM: StreamName;

    /// Convert to a short human-readable form for logging.
    fn to_cli_string(&self) -> String;
}
