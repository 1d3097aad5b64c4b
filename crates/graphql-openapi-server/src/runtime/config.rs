use std::net::{IpAddr, Ipv4Addr};

use graphql_openapi::Options;
use graphql_openapi_server::cors::CorsConfig;
use schemars::JsonSchema;
use serde::Deserialize;

use super::{logging::Logging, schema_source::SchemaSource};

/// Configuration for the OpenAPI server
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// The IP address to bind to
    pub address: IpAddr,

    /// Cross origin request configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: Logging,

    /// Options for the generated OpenAPI document
    pub openapi: Options,

    /// The port to listen on
    pub port: u16,

    /// The GraphQL schema to describe
    pub schema: SchemaSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            cors: CorsConfig::default(),
            logging: Logging::default(),
            openapi: Options::default(),
            port: 4000,
            schema: SchemaSource::default(),
        }
    }
}
