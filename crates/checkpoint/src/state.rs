//! Combined sync state for all streams.

use serde::{Deserialize, Serialize};
use source_protocol::Message;
use std::collections::BTreeMap;

use crate::Checkpoint;

/// Mapping from stream name to its opaque checkpoint object.
///
/// `SyncState` is built from the prior state handed in by the platform and
/// updated in place as the sync progresses. Entries for stream names this
/// connector does not know are preserved and re-emitted unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncState {
    streams: BTreeMap<String, serde_json::Value>,
}

impl SyncState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing combined mapping.
    pub fn from_map(streams: BTreeMap<String, serde_json::Value>) -> Self {
        Self { streams }
    }

    /// Read the checkpoint for stream `C::STREAM`.
    ///
    /// Returns `Ok(None)` if the stream has no entry yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry exists but is not a valid `C`.
    pub fn get<C: Checkpoint>(&self) -> anyhow::Result<Option<C>> {
        match self.streams.get(C::STREAM.as_str()) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                anyhow::anyhow!("Invalid {} checkpoint {value}: {e}", C::STREAM)
            }),
        }
    }

    /// Read the checkpoint for stream `C::STREAM`, falling back to `C::default()`.
    pub fn get_or_default<C: Checkpoint + Default>(&self) -> anyhow::Result<C> {
        Ok(self.get::<C>()?.unwrap_or_default())
    }

    /// Replace the entry for stream `C::STREAM` with `checkpoint`.
    pub fn update<C: Checkpoint>(&mut self, checkpoint: &C) -> anyhow::Result<()> {
        let value = serde_json::to_value(checkpoint)?;
        tracing::debug!(
            "Updated {} checkpoint: {}",
            C::STREAM,
            checkpoint.to_cli_string()
        );
        self.streams.insert(C::STREAM.as_str().to_string(), value);
        Ok(())
    }

    /// Build the STATE message carrying the full combined mapping.
    pub fn to_message(&self) -> Message {
        Message::state(self.streams.clone())
    }

    /// Borrow the raw combined mapping.
    pub fn as_map(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.streams
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
