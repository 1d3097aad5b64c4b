use std::collections::HashMap;

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::examples::OperationKind;

/// Options for the generated OpenAPI document
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// The URL of the GraphQL server, listed as the only server of the document
    #[serde(alias = "serverUrl")]
    pub server_url: String,

    /// The title of the API
    pub title: String,

    /// The OpenAPI version of the document
    pub openapi: String,

    /// The version of the API
    pub version: String,

    /// Description of every request body
    pub summary: String,

    /// Description of the API
    pub description: String,

    /// Example variable values by argument name, used instead of the default placeholder
    #[serde(alias = "exampleValues")]
    pub example_values: HashMap<String, Value>,

    /// The root operation types to describe
    #[schemars(with = "Vec<String>")]
    pub operations: Vec<OperationKind>,

    /// Set `operationName` in every request example
    #[serde(alias = "includeOperationName")]
    pub include_operation_name: bool,

    /// Tags to attach to the operations of individual root fields
    #[serde(alias = "routeMap")]
    pub route_map: HashMap<String, RouteTag>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            server_url: "/graphql".to_string(),
            title: "GraphQL API".to_string(),
            openapi: "3.0.3".to_string(),
            version: "1.0.0".to_string(),
            summary: "GraphQL Endpoint".to_string(),
            description: "Endpoint for all GraphQL queries and mutations".to_string(),
            example_values: HashMap::new(),
            operations: vec![OperationKind::Query, OperationKind::Mutation],
            include_operation_name: false,
            route_map: HashMap::new(),
        }
    }
}

/// A tag grouping the operation of a root field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct RouteTag {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}
