//! Connector configuration.
//!
//! The platform passes configuration as a JSON file; YAML is accepted as well
//! when the file extension is `.yaml` or `.yml`. Unknown keys are ignored.
//!
//! ```json
//! {"count": 1000, "seed": 42, "records_per_sync": 500, "records_per_slice": 100}
//! ```

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Default cap on users emitted by a single read.
pub const DEFAULT_RECORDS_PER_SYNC: u64 = 500;

/// Default number of users between intermediate checkpoints.
pub const DEFAULT_RECORDS_PER_SLICE: u64 = 100;

/// Options recognized by the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Total number of users to ever generate
    pub count: u64,

    /// Seed for the random source. Negative values mean unset.
    #[serde(deserialize_with = "negative_as_unset")]
    pub seed: Option<u64>,

    /// Maximum users emitted per read; 0 disables the cap
    pub records_per_sync: u64,

    /// Users between intermediate checkpoints; 0 disables them
    pub records_per_slice: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            count: 0,
            seed: None,
            records_per_sync: DEFAULT_RECORDS_PER_SYNC,
            records_per_slice: DEFAULT_RECORDS_PER_SLICE,
        }
    }
}

impl SourceConfig {
    /// Parse configuration from a JSON string.
    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        serde_json::from_str(content).context("Failed to parse config JSON")
    }

    /// Load configuration from a JSON or YAML file.
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        load_json_or_yaml(path).await
    }
}

fn negative_as_unset<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let seed = Option::<i64>::deserialize(deserializer)?;
    Ok(seed.and_then(|s| u64::try_from(s).ok()))
}

/// Read a file and deserialize it as YAML or JSON depending on its extension.
pub async fn load_json_or_yaml<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON: {}", path.display()))
    }
}
