//! Catalog provider: `spec`, `check` and `discover`.
//!
//! Stream schemas and the connector specification are static JSON fixtures
//! embedded at compile time.

use source_protocol::{
    Catalog, ConnectionStatus, ConnectorSpecification, StreamDescriptor, StreamName,
};

use crate::{SourceConfig, SourceError};

const USERS_SCHEMA: &str = include_str!("../fixtures/users_catalog.json");
const PRODUCTS_SCHEMA: &str = include_str!("../fixtures/products_catalog.json");
const PURCHASES_SCHEMA: &str = include_str!("../fixtures/purchases_catalog.json");
const CONNECTOR_SPEC: &str = include_str!("../fixtures/spec.json");

/// JSON schema of a stream's records.
pub fn stream_schema(stream: StreamName) -> Result<serde_json::Value, SourceError> {
    let (name, raw) = match stream {
        StreamName::Users => ("users_catalog.json", USERS_SCHEMA),
        StreamName::Products => ("products_catalog.json", PRODUCTS_SCHEMA),
        StreamName::Purchases => ("purchases_catalog.json", PURCHASES_SCHEMA),
    };
    parse_fixture(name, raw)
}

/// Return the three supported streams with their schemas and sync modes.
pub fn discover() -> Result<Catalog, SourceError> {
    let streams = StreamName::ALL
        .iter()
        .map(|name| Ok(StreamDescriptor::new(*name, stream_schema(*name)?)))
        .collect::<Result<_, SourceError>>()?;
    Ok(Catalog { streams })
}

/// Report connectivity. Generation needs no external resource, so this always
/// succeeds.
pub fn check(config: &SourceConfig) -> ConnectionStatus {
    tracing::info!("Check succeeded for config with count={}", config.count);
    ConnectionStatus::succeeded()
}

/// Describe the configuration options the connector accepts.
pub fn spec() -> Result<ConnectorSpecification, SourceError> {
    Ok(ConnectorSpecification {
        documentation_url: None,
        connection_specification: parse_fixture("spec.json", CONNECTOR_SPEC)?,
        supports_incremental: true,
    })
}

fn parse_fixture(name: &'static str, raw: &str) -> Result<serde_json::Value, SourceError> {
    serde_json::from_str(raw).map_err(|source| SourceError::Fixture { name, source })
}
