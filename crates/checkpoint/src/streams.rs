//! Checkpoint types for the three supported streams.

use serde::{Deserialize, Deserializer, Serialize};
use source_protocol::StreamName;

use crate::Checkpoint;

/// Resume point of the Users stream.
///
/// ```json
/// {"cursor": 200, "seed": 42}
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersCheckpoint {
    /// Number of users emitted so far across all syncs. `null` reads as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cursor: u64,
    /// Seed the users were generated with, if any. Negative reads as unset.
    #[serde(default, deserialize_with = "negative_as_none")]
    pub seed: Option<u64>,
}

impl Checkpoint for UsersCheckpoint {
    const STREAM: StreamName = StreamName::Users;

    fn to_cli_string(&self) -> String {
        match self.seed {
            Some(seed) => format!("cursor={} seed={seed}", self.cursor),
            None => format!("cursor={} seed=none", self.cursor),
        }
    }
}

/// Running purchase counter; the next purchase id is `purchases_count + 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasesCheckpoint {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub purchases_count: u64,
}

impl Checkpoint for PurchasesCheckpoint {
    const STREAM: StreamName = StreamName::Purchases;

    fn to_cli_string(&self) -> String {
        format!("purchases_count={}", self.purchases_count)
    }
}

/// Number of products emitted by the last Products pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsCheckpoint {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub product_count: u64,
}

impl Checkpoint for ProductsCheckpoint {
    const STREAM: StreamName = StreamName::Products;

    fn to_cli_string(&self) -> String {
        format!("product_count={}", self.product_count)
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

fn negative_as_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let seed = Option::<i64>::deserialize(deserializer)?;
    Ok(seed.and_then(|s| u64::try_from(s).ok()))
}
