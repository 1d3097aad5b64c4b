//! Synthesizes an example request and response for every root field.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use apollo_compiler::Schema;
use apollo_compiler::ast::OperationType;
use apollo_compiler::collections::IndexMap;
use apollo_compiler::schema::FieldDefinition;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::GenerationError;
use crate::mock::mock_response;
use crate::type_ref::TypeRef;

/// The variable value used when no override is supplied for an argument
pub const DEFAULT_VARIABLE_VALUE: &str = "value";

/// The root operation types that can be described
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// The keyword that starts an operation of this kind
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }

    /// The default root type name, used in example summaries
    pub fn root_type_name(&self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for OperationKind {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query" => Ok(OperationKind::Query),
            "mutation" => Ok(OperationKind::Mutation),
            _ => Err(GenerationError::UnknownOperationKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for OperationKind {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OperationKind> for String {
    fn from(value: OperationKind) -> Self {
        value.keyword().to_string()
    }
}

impl From<OperationKind> for OperationType {
    fn from(value: OperationKind) -> Self {
        match value {
            OperationKind::Query => OperationType::Query,
            OperationKind::Mutation => OperationType::Mutation,
        }
    }
}

/// The example request sent to the GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleValue {
    pub query: String,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub variables: Map<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

/// A worked example for a single root field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleEntry {
    pub summary: String,
    pub value: ExampleValue,
    pub response: Value,

    /// The declared return type of the field, used to describe the response
    #[serde(skip)]
    pub return_type: TypeRef,
}

/// Build examples for the Query and Mutation root fields.
///
/// A Mutation field replaces a Query field of the same name.
pub fn build_examples(
    schema: &Schema,
    overrides: &HashMap<String, Value>,
) -> Result<IndexMap<String, ExampleEntry>, GenerationError> {
    Synthesizer::new(schema, overrides).build()
}

/// Builds [`ExampleEntry`] values from the root types of a schema
pub struct Synthesizer<'a> {
    schema: &'a Schema,
    overrides: &'a HashMap<String, Value>,
    kinds: Vec<OperationKind>,
    include_operation_name: bool,
}

impl<'a> Synthesizer<'a> {
    pub fn new(schema: &'a Schema, overrides: &'a HashMap<String, Value>) -> Self {
        Self {
            schema,
            overrides,
            kinds: vec![OperationKind::Query, OperationKind::Mutation],
            include_operation_name: false,
        }
    }

    /// Only describe the given root operation kinds
    pub fn kinds(mut self, kinds: &[OperationKind]) -> Self {
        self.kinds = kinds.to_vec();
        self
    }

    /// Set the `operationName` of each example to the field name
    pub fn include_operation_name(mut self, include: bool) -> Self {
        self.include_operation_name = include;
        self
    }

    pub fn build(self) -> Result<IndexMap<String, ExampleEntry>, GenerationError> {
        let mut examples: IndexMap<String, ExampleEntry> = IndexMap::default();

        // Mutations always come last so that they win name collisions
        for kind in [OperationKind::Query, OperationKind::Mutation] {
            if !self.kinds.contains(&kind) {
                continue;
            }
            let Some(root_name) = self.schema.root_operation(kind.into()) else {
                continue;
            };
            let root = self.schema.get_object(root_name).ok_or_else(|| {
                GenerationError::InvalidSchema(format!(
                    "{kind} root type `{root_name}` is not an object type"
                ))
            })?;

            for (field_name, field) in root.fields.iter() {
                let entry = self.example(kind, root_name.as_str(), field);
                debug!(field = %field_name, %kind, query = %entry.value.query, "Synthesized example");
                if examples.insert(field_name.to_string(), entry).is_some() {
                    warn!(
                        field = %field_name,
                        "Root field is declared more than once; the {kind} example wins"
                    );
                }
            }
        }

        Ok(examples)
    }

    fn example(
        &self,
        kind: OperationKind,
        root_name: &str,
        field: &FieldDefinition,
    ) -> ExampleEntry {
        let return_type = TypeRef::from_ast(&field.ty, self.schema);
        let response = mock_response(&return_type, field.name.as_str());

        let variables = field
            .arguments
            .iter()
            .map(|arg| {
                let value = self
                    .overrides
                    .get(arg.name.as_str())
                    .cloned()
                    .unwrap_or_else(|| Value::from(DEFAULT_VARIABLE_VALUE));
                (arg.name.to_string(), value)
            })
            .collect();

        ExampleEntry {
            summary: format!("Example {root_name}"),
            value: ExampleValue {
                query: operation_document(kind, field),
                variables,
                operation_name: self
                    .include_operation_name
                    .then(|| field.name.to_string()),
            },
            response,
            return_type,
        }
    }
}

/// Render the operation that selects a single root field, passing every argument
/// through a variable of the same name
fn operation_document(kind: OperationKind, field: &FieldDefinition) -> String {
    let name = &field.name;
    if field.arguments.is_empty() {
        return format!("{kind} {name} {{ {name} }}");
    }

    let declarations = field
        .arguments
        .iter()
        .map(|arg| format!("${}: {}", arg.name, &*arg.ty))
        .collect::<Vec<_>>()
        .join(", ");
    let arguments = field
        .arguments
        .iter()
        .map(|arg| format!("{0}: ${0}", arg.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{kind} {name}({declarations}) {{ {name}({arguments}) }}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_compiler::validation::Valid;
    use rstest::{fixture, rstest};
    use serde_json::json;

    const TEST_SCHEMA: &str = include_str!("testdata/schema.graphql");

    #[fixture]
    fn schema() -> Valid<Schema> {
        Schema::parse_and_validate(TEST_SCHEMA, "schema.graphql")
            .expect("Failed to parse test schema")
    }

    fn example<'a>(examples: &'a IndexMap<String, ExampleEntry>, name: &str) -> &'a ExampleEntry {
        examples.get(name).expect("missing example")
    }

    #[rstest]
    fn it_omits_parentheses_without_arguments(schema: Valid<Schema>) {
        let examples = build_examples(&schema, &HashMap::new()).unwrap();
        let count = example(&examples, "count");

        assert_eq!(count.value.query, "query count { count }");
        assert!(count.value.variables.is_empty());
        assert_eq!(count.summary, "Example Query");
    }

    #[rstest]
    fn it_declares_variables_in_argument_order(schema: Valid<Schema>) {
        let examples = build_examples(&schema, &HashMap::new()).unwrap();
        let create_post = example(&examples, "createPost");

        assert_eq!(
            create_post.value.query,
            "mutation createPost($title: String!, $body: String, $draft: Boolean) { createPost(title: $title, body: $body, draft: $draft) }"
        );
        assert_eq!(
            Value::Object(create_post.value.variables.clone()),
            json!({ "title": "value", "body": "value", "draft": "value" })
        );
        assert_eq!(create_post.summary, "Example Mutation");
    }

    #[rstest]
    fn it_prefers_override_values(schema: Valid<Schema>) {
        let overrides = HashMap::from([("message".to_string(), json!("hi"))]);
        let examples = build_examples(&schema, &overrides).unwrap();

        assert_eq!(
            Value::Object(example(&examples, "updateMessage").value.variables.clone()),
            json!({ "message": "hi" })
        );
    }

    #[rstest]
    fn it_lets_mutations_win_collisions(schema: Valid<Schema>) {
        let examples = build_examples(&schema, &HashMap::new()).unwrap();
        let hello = example(&examples, "hello");

        assert_eq!(hello.value.query, "mutation hello { hello }");
        assert_eq!(hello.response, json!({ "data": { "hello": true } }));
        assert_eq!(examples.keys().next().map(String::as_str), Some("hello"));
    }

    #[rstest]
    fn it_mocks_responses(schema: Valid<Schema>) {
        let examples = build_examples(&schema, &HashMap::new()).unwrap();

        assert_eq!(
            example(&examples, "post").response,
            json!({
                "data": {
                    "id": null,
                    "title": null,
                    "views": 123,
                    "score": 123.45,
                    "published": null,
                    "labels": null,
                    "author": null,
                }
            })
        );
        assert_eq!(
            example(&examples, "count").response,
            json!({ "data": { "count": null } })
        );
        assert_eq!(
            example(&examples, "posts").response,
            json!({ "data": { "posts": {} } })
        );
        assert_eq!(
            example(&examples, "status").response,
            json!({ "data": { "status": {} } })
        );
    }

    #[rstest]
    fn it_restricts_root_kinds(schema: Valid<Schema>) {
        let overrides = HashMap::new();
        let examples = Synthesizer::new(&schema, &overrides)
            .kinds(&[OperationKind::Mutation])
            .build()
            .unwrap();

        assert_eq!(
            examples.keys().collect::<Vec<_>>(),
            vec!["updateMessage", "createPost", "hello"]
        );
    }

    #[rstest]
    fn it_sets_operation_names(schema: Valid<Schema>) {
        let overrides = HashMap::new();
        let examples = Synthesizer::new(&schema, &overrides)
            .include_operation_name(true)
            .build()
            .unwrap();

        assert_eq!(
            example(&examples, "ratio").value.operation_name.as_deref(),
            Some("ratio")
        );
    }

    #[test]
    fn it_returns_nothing_without_root_types() {
        let schema = Schema::parse("type Orphan { id: ID }", "schema.graphql").unwrap();
        let examples = build_examples(&schema, &HashMap::new()).unwrap();

        assert!(examples.is_empty());
    }

    #[test]
    fn it_rejects_roots_that_are_not_objects() {
        let schema = Schema::parse(
            "schema { query: Status } enum Status { ONLINE }",
            "schema.graphql",
        )
        .unwrap_or_else(|invalid| invalid.partial);
        let result = build_examples(&schema, &HashMap::new());

        assert!(matches!(result, Err(GenerationError::InvalidSchema(_))));
    }

    #[rstest]
    #[case("query", OperationKind::Query)]
    #[case("Mutation", OperationKind::Mutation)]
    fn it_parses_operation_kinds(#[case] input: &str, #[case] expected: OperationKind) {
        assert_eq!(input.parse::<OperationKind>().unwrap(), expected);
    }

    #[test]
    fn it_rejects_unknown_operation_kinds() {
        let result = "subscription".parse::<OperationKind>();

        assert!(matches!(
            result,
            Err(GenerationError::UnknownOperationKind(kind)) if kind == "subscription"
        ));
    }

    #[test]
    fn it_serializes_examples() {
        let entry = ExampleEntry {
            summary: "Example Query".to_string(),
            value: ExampleValue {
                query: "query hello { hello }".to_string(),
                variables: Map::new(),
                operation_name: None,
            },
            response: json!({ "data": { "hello": "Sample string" } }),
            return_type: TypeRef::Scalar("String".to_string()),
        };

        insta::assert_json_snapshot!(entry, @r###"
        {
          "summary": "Example Query",
          "value": {
            "query": "query hello { hello }"
          },
          "response": {
            "data": {
              "hello": "Sample string"
            }
          }
        }
        "###);
    }
}
