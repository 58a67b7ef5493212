//! Protocol messages written by the connector.
//!
//! Every command writes a sequence of [`Message`]s to stdout, one JSON object
//! per line. The `type` field discriminates the payload:
//!
//! ```json
//! {"type":"RECORD","record":{"stream":"Users","data":{"id":1},"emitted_at":1700000000000}}
//! {"type":"STATE","state":{"data":{"Users":{"cursor":1,"seed":42}}}}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Catalog, StreamName};

/// A single protocol message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// One generated or fixture record
    Record { record: RecordMessage },

    /// The combined checkpoint state for all streams
    State { state: StateMessage },

    /// Output of `discover`
    Catalog { catalog: Catalog },

    /// Output of `check`
    ConnectionStatus {
        #[serde(rename = "connectionStatus")]
        connection_status: ConnectionStatus,
    },

    /// Output of `spec`
    Spec { spec: ConnectorSpecification },
}

impl Message {
    pub fn record(record: RecordMessage) -> Self {
        Message::Record { record }
    }

    pub fn state(data: BTreeMap<String, serde_json::Value>) -> Self {
        Message::State {
            state: StateMessage { data },
        }
    }

    /// The record payload, if this is a `RECORD` message.
    pub fn as_record(&self) -> Option<&RecordMessage> {
        match self {
            Message::Record { record } => Some(record),
            _ => None,
        }
    }

    /// The state payload, if this is a `STATE` message.
    pub fn as_state(&self) -> Option<&StateMessage> {
        match self {
            Message::State { state } => Some(state),
            _ => None,
        }
    }
}

/// A record belonging to one stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMessage {
    /// Owning stream name
    pub stream: String,
    /// Field name to value; timestamps are ISO-8601 strings
    pub data: serde_json::Map<String, serde_json::Value>,
    /// Emission time in epoch milliseconds
    pub emitted_at: i64,
}

impl RecordMessage {
    pub fn new(
        stream: StreamName,
        data: serde_json::Map<String, serde_json::Value>,
        emitted_at: i64,
    ) -> Self {
        Self {
            stream: stream.as_str().to_string(),
            data,
            emitted_at,
        }
    }

    /// Convenience accessor for a field value.
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.data.get(field)
    }
}

/// Checkpoint state covering every stream, re-sent in full on each checkpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateMessage {
    pub data: BTreeMap<String, serde_json::Value>,
}

/// Outcome of a `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConnectionStatus {
    pub fn succeeded() -> Self {
        Self {
            status: Status::Succeeded,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            message: Some(message.into()),
        }
    }
}

/// Description of the configuration the connector accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpecification {
    #[serde(rename = "documentationUrl", default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
    #[serde(rename = "connectionSpecification")]
    pub connection_specification: serde_json::Value,
    #[serde(rename = "supportsIncremental", default)]
    pub supports_incremental: bool,
}
