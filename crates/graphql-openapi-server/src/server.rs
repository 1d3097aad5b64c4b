//! HTTP server exposing a pre-built OpenAPI document

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use bon::bon;
use graphql_openapi::OpenApiDocument;
use http::header::CONTENT_TYPE;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{info, trace};

use crate::cors::CorsConfig;
use crate::errors::ServerError;

/// The path the document is served from
pub const OPENAPI_PATH: &str = "/openapi.json";

/// The path of the liveness check
pub const HEALTH_PATH: &str = "/health";

/// Serves an OpenAPI document generated once at startup
pub struct Server {
    document: Arc<str>,
    address: IpAddr,
    port: u16,
    cors: CorsConfig,
}

#[bon]
impl Server {
    #[builder]
    pub fn new(
        document: &OpenApiDocument,
        #[builder(default = IpAddr::V4(Ipv4Addr::LOCALHOST))] address: IpAddr,
        #[builder(default = 4000)] port: u16,
        #[builder(default)] cors: CorsConfig,
    ) -> Result<Self, ServerError> {
        Ok(Self {
            document: serde_json::to_string(document)?.into(),
            address,
            port,
            cors,
        })
    }

    /// The routes of the server, with CORS applied when enabled
    pub fn router(&self) -> Result<Router, ServerError> {
        let mut router = Router::new()
            .route(OPENAPI_PATH, get(openapi_endpoint))
            .route(HEALTH_PATH, get(health_endpoint))
            .with_state(self.document.clone())
            .layer(TraceLayer::new_for_http());

        if self.cors.enabled {
            router = router.layer(self.cors.clone().into_layer()?);
        }

        Ok(router)
    }

    /// Serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> Result<(), ServerError> {
        let router = self.router()?;
        let listen_address = SocketAddr::new(self.address, self.port);
        let tcp_listener = tokio::net::TcpListener::bind(listen_address).await?;

        info!(address = %listen_address, "OpenAPI JSON available at http://{listen_address}{OPENAPI_PATH}");
        axum::serve(tcp_listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

/// Serves the document as it was serialized at startup
async fn openapi_endpoint(State(document): State<Arc<str>>) -> impl axum::response::IntoResponse {
    trace!("serving OpenAPI document");
    ([(CONTENT_TYPE, "application/json")], document.to_string())
}

async fn health_endpoint() -> Json<Value> {
    Json(json!({ "status": "UP" }))
}

#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use graphql_openapi::{Options, generate_from_sdl};

    const SCHEMA: &str = "type Query { hello: String }";

    fn document() -> OpenApiDocument {
        generate_from_sdl(SCHEMA, "schema.graphql", &Options::default()).unwrap()
    }

    #[tokio::test]
    async fn it_serves_the_document_verbatim() {
        let document = document();
        let server = Server::builder().document(&document).build().unwrap();

        let response = openapi_endpoint(State(server.document.clone()))
            .await
            .into_response();

        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            server.document.as_ref(),
            serde_json::to_string(&document).unwrap()
        );
    }

    #[tokio::test]
    async fn it_reports_health() {
        let Json(health) = health_endpoint().await;

        assert_eq!(health, json!({ "status": "UP" }));
    }

    #[test]
    fn it_defaults_the_listen_address() {
        let server = Server::builder().document(&document()).build().unwrap();

        assert_eq!(server.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(server.port, 4000);
        assert!(server.router().is_ok());
    }

    #[test]
    fn it_rejects_invalid_cors_configuration() {
        let server = Server::builder()
            .document(&document())
            .cors(CorsConfig {
                origins: vec!["*".into()],
                ..Default::default()
            })
            .build()
            .unwrap();

        assert!(matches!(server.router(), Err(ServerError::Cors(_))));
    }
}
