//! Stream and catalog definitions.
//!
//! A stream is a named category of synthetic entity. The connector supports
//! exactly three of them, modelled by the closed [`StreamName`] enum. Catalog
//! types keep stream names as plain strings so that a configured catalog naming
//! an unsupported stream still deserializes and can be rejected with a proper
//! error by the sync driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

// ============================================================================
// Stream Names
// ============================================================================

/// The streams this connector knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StreamName {
    /// Synthetic user profiles
    Users,
    /// Static product catalog
    Products,
    /// Purchases made by generated users
    Purchases,
}

impl StreamName {
    /// All supported streams in discovery order.
    pub const ALL: [StreamName; 3] = [StreamName::Users, StreamName::Products, StreamName::Purchases];

    /// Get the wire name of this stream.
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamName::Users => "Users",
            StreamName::Products => "Products",
            StreamName::Purchases => "Purchases",
        }
    }

    /// Sync modes the stream can be read with.
    pub fn supported_sync_modes(&self) -> Vec<SyncMode> {
        match self {
            StreamName::Users | StreamName::Purchases => {
                vec![SyncMode::FullRefresh, SyncMode::Incremental]
            }
            StreamName::Products => vec![SyncMode::FullRefresh],
        }
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamName {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Users" => Ok(StreamName::Users),
            "Products" => Ok(StreamName::Products),
            "Purchases" => Ok(StreamName::Purchases),
            other => Err(ProtocolError::UnknownStream(other.to_string())),
        }
    }
}

// ============================================================================
// Sync Modes
// ============================================================================

/// How the source side of a stream is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// Re-read everything on every sync
    FullRefresh,
    /// Resume from the last checkpoint
    Incremental,
}

/// How the destination writes a stream. Carried through, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationSyncMode {
    Append,
    Overwrite,
    AppendDedup,
}

// ============================================================================
// Catalogs
// ============================================================================

/// Metadata describing one stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    /// Stream name as sent on the wire
    pub name: String,
    /// JSON-schema-shaped field descriptor
    #[serde(default)]
    pub json_schema: serde_json::Value,
    /// Sync modes the stream supports
    #[serde(default)]
    pub supported_sync_modes: Vec<SyncMode>,
}

impl StreamDescriptor {
    /// Create a descriptor for one of the supported streams.
    pub fn new(name: StreamName, json_schema: serde_json::Value) -> Self {
        Self {
            name: name.as_str().to_string(),
            json_schema,
            supported_sync_modes: name.supported_sync_modes(),
        }
    }

    /// Resolve the wire name into a [`StreamName`].
    pub fn stream_name(&self) -> Result<StreamName, ProtocolError> {
        self.name.parse()
    }
}

/// The full set of streams returned by `discover`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub streams: Vec<StreamDescriptor>,
}

impl Catalog {
    /// Look up a stream descriptor by name.
    pub fn get_stream(&self, name: StreamName) -> Option<&StreamDescriptor> {
        self.streams.iter().find(|s| s.name == name.as_str())
    }
}

/// A stream selected for reading, with the modes chosen by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredStream {
    pub stream: StreamDescriptor,
    #[serde(default = "default_sync_mode")]
    pub sync_mode: SyncMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_sync_mode: Option<DestinationSyncMode>,
}

fn default_sync_mode() -> SyncMode {
    SyncMode::FullRefresh
}

impl ConfiguredStream {
    /// Select a stream with the given sync mode.
    pub fn new(stream: StreamDescriptor, sync_mode: SyncMode) -> Self {
        Self {
            stream,
            sync_mode,
            destination_sync_mode: None,
        }
    }
}

/// The catalog handed to `read`: the streams the platform wants emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    pub streams: Vec<ConfiguredStream>,
}

impl ConfiguredCatalog {
    /// Build a configured catalog selecting every stream of `catalog` whose
    /// name is in `names`, read incrementally where supported.
    pub fn select(catalog: &Catalog, names: &[StreamName]) -> Self {
        let streams = names
            .iter()
            .filter_map(|name| catalog.get_stream(*name))
            .map(|descriptor| {
                let mode = if descriptor.supported_sync_modes.contains(&SyncMode::Incremental) {
                    SyncMode::Incremental
                } else {
                    SyncMode::FullRefresh
                };
                ConfiguredStream::new(descriptor.clone(), mode)
            })
            .collect();
        Self { streams }
    }

    /// Raw stream names in catalog order.
    pub fn stream_names(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|s| s.stream.name.as_str())
    }
}
