//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Schema the server is built around when none is configured: the nine-column
/// person collection.
pub const DEFAULT_SCHEMA: &str = "ver:1.0,hdr:false,del:,; \
    LastName:string(50),FirstName:string(50),MiddleName:string(50),Age:int,\
    Height:decimal(13,3),Weight:decimal(13,3),Alive:bool,DateBorn:date,LastUpdated:datetime";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means permissive (development)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Reference schema description the server validates payloads against
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Reject columns with unrecognized type labels instead of passing them
    /// through unchecked
    #[serde(default)]
    pub strict_types: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_schema() -> String {
    DEFAULT_SCHEMA.to_string()
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            schema: default_schema(),
            strict_types: false,
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_schema;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert!(!config.strict_types);
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_default_schema_parses() {
        let schema = parse_schema(DEFAULT_SCHEMA).unwrap();
        assert_eq!(schema.columns.len(), 9);
        assert_eq!(schema.version, "1.0");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.schema, DEFAULT_SCHEMA);
    }
}
