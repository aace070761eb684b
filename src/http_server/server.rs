//! HTTP server assembly: router, CORS, bind/serve.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::schema::{parse_schema, SchemaResult};

use super::config::HttpServerConfig;
use super::routes::{health_routes, record_routes, AppState};

/// HTTP server for the WebCSV record API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with the default configuration.
    pub fn new() -> SchemaResult<Self> {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a server with a custom configuration. Fails when the configured
    /// reference schema description does not parse.
    pub fn with_config(config: HttpServerConfig) -> SchemaResult<Self> {
        let router = Self::build_router(&config)?;
        Ok(Self { config, router })
    }

    fn build_router(config: &HttpServerConfig) -> SchemaResult<Router> {
        let schema = parse_schema(&config.schema)?;
        let state = Arc::new(AppState::new(schema, config.strict_types));

        let cors = if config.cors_origins.is_empty() {
            // No origins configured: permissive, for development.
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Ok(Router::new()
            .merge(health_routes())
            .merge(record_routes(state))
            .layer(cors)
            .layer(TraceLayer::new_for_http()))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        info!(%addr, schema = %self.config.schema, "starting webcsv server");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_builds() {
        let server = HttpServer::new().unwrap();
        assert_eq!(server.socket_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn test_bad_reference_schema_rejected_at_boot() {
        let config = HttpServerConfig {
            schema: "ver:1.0,hdr:false,del:,;".to_string(),
            ..Default::default()
        };
        assert!(HttpServer::with_config(config).is_err());
    }
}
