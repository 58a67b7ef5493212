//! Loading prior state from disk.
//!
//! The platform hands prior state back in one of three shapes, all accepted:
//!
//! ```json
//! {"Users": {"cursor": 100, "seed": 42}}
//! {"data": {"Users": {"cursor": 100, "seed": 42}}}
//! {"type": "STATE", "state": {"data": {"Users": {"cursor": 100, "seed": 42}}}}
//! ```

use anyhow::Context;
use serde_json::Value;
use std::path::Path;

use crate::SyncState;

/// Read and parse a state file.
///
/// An empty file yields an empty state.
///
/// # Errors
/// * Returns error if the file cannot be read
/// * Returns error if the content is not a JSON object in one of the accepted shapes
pub fn load_state_file<P: AsRef<Path>>(path: P) -> anyhow::Result<SyncState> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;
    let state = parse_state(&content)
        .with_context(|| format!("Failed to parse state file: {}", path.display()))?;

    tracing::info!(
        "Loaded prior state from {} ({} stream entries)",
        path.display(),
        state.as_map().len()
    );

    Ok(state)
}

/// Parse state from a JSON string.
pub fn parse_state(content: &str) -> anyhow::Result<SyncState> {
    if content.trim().is_empty() {
        return Ok(SyncState::new());
    }

    let value: Value = serde_json::from_str(content)?;
    let value = unwrap_envelope(value);

    match value {
        Value::Object(map) => Ok(SyncState::from_map(map.into_iter().collect())),
        Value::Null => Ok(SyncState::new()),
        other => Err(anyhow::anyhow!("State must be a JSON object, found: {other}")),
    }
}

/// Strip `{"type": "STATE", "state": ...}` and `{"data": ...}` wrappers.
fn unwrap_envelope(value: Value) -> Value {
    let value = match value {
        Value::Object(mut map)
            if map.get("type").and_then(Value::as_str) == Some("STATE")
                && map.contains_key("state") =>
        {
            map.remove("state").unwrap_or(Value::Null)
        }
        other => other,
    };

    match value {
        Value::Object(mut map) if map.len() == 1 && map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
