//! Cross Origin Resource Sharing (CORS) for the document endpoints
//!
//! Enabled by default for the local server and for tool-calling agents hosted at
//! `https://chat.openai.com`, allowing `GET` and `POST`.

use std::time::Duration;

use http::{HeaderName, HeaderValue, Method};
use schemars::JsonSchema;
use serde::Deserialize;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::errors::ServerError;

/// Cross origin request configuration.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS support
    pub enabled: bool,

    /// Set to true to allow any origin. Defaults to false.
    pub allow_any_origin: bool,

    /// The headers to allow.
    /// If this value is not set, the server will mirror the client's `Access-Control-Request-Headers`.
    pub allow_headers: Vec<String>,

    /// Allowed request methods.
    pub methods: Vec<String>,

    /// The `Access-Control-Max-Age` header value in time units
    #[serde(deserialize_with = "humantime_serde::deserialize", default)]
    #[schemars(with = "Option<String>", default)]
    pub max_age: Option<Duration>,

    /// The origin(s) to allow requests from.
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_any_origin: false,
            allow_headers: Vec::new(),
            methods: vec!["GET".into(), "POST".into()],
            max_age: None,
            origins: vec![
                "http://localhost:4000".into(),
                "https://chat.openai.com".into(),
            ],
        }
    }
}

impl CorsConfig {
    /// Creates a new CorsLayer from this configuration
    pub fn into_layer(self) -> Result<CorsLayer, ServerError> {
        self.validate()?;

        let mut cors = CorsLayer::new();

        if self.allow_any_origin {
            cors = cors.allow_origin(AllowOrigin::any());
        } else if !self.origins.is_empty() {
            let origins = parse_all(&self.origins, "origin", |origin| {
                HeaderValue::from_str(origin).ok()
            })?;
            cors = cors.allow_origin(origins);
        }

        if !self.methods.is_empty() {
            let methods = parse_all(&self.methods, "method", |method| {
                Method::from_bytes(method.as_bytes()).ok()
            })?;
            cors = cors.allow_methods(AllowMethods::list(methods));
        }

        if self.allow_headers.is_empty() {
            cors = cors.allow_headers(AllowHeaders::mirror_request());
        } else {
            let headers = parse_all(&self.allow_headers, "header name", |header| {
                HeaderName::from_bytes(header.as_bytes()).ok()
            })?;
            cors = cors.allow_headers(headers);
        }

        if let Some(max_age) = self.max_age {
            cors = cors.max_age(max_age);
        }

        Ok(cors)
    }

    fn validate(&self) -> Result<(), ServerError> {
        if self.origins.iter().any(|origin| origin == "*") {
            return Err(ServerError::Cors(
                "use `allow_any_origin: true` to set `Access-Control-Allow-Origin: *`".to_string(),
            ));
        }

        // A serialized origin has no trailing slash
        if let Some(origin) = self
            .origins
            .iter()
            .find(|origin| origin.ends_with('/') && origin.as_str() != "/")
        {
            return Err(ServerError::Cors(format!(
                "origin '{origin}' cannot have a trailing slash"
            )));
        }

        Ok(())
    }
}

fn parse_all<T>(
    values: &[String],
    what: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>, ServerError> {
    values
        .iter()
        .map(|value| {
            parse(value).ok_or_else(|| ServerError::Cors(format!("{what} '{value}' is not valid")))
        })
        .collect()
}
