//! CLI command implementations.

use std::fs;
use std::path::{Path, PathBuf};

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::schema::{parse_schema, Schema, SchemaError, ValidateOptions};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parses arguments and dispatches to the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            schema,
            strict,
        } => serve(config, host, port, schema, strict),
        Command::Check {
            schema,
            schema_file,
            strict,
            file,
        } => check(schema, schema_file, strict, &file),
        Command::Print {
            schema,
            schema_file,
        } => print_normalized(schema, schema_file),
    }
}

fn serve(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    schema: Option<String>,
    strict: bool,
) -> CliResult<()> {
    init_tracing();

    let mut config = match config_path {
        Some(path) => load_config(&path)?,
        None => HttpServerConfig::default(),
    };

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(schema) = schema {
        config.schema = schema;
    }
    if strict {
        config.strict_types = true;
    }

    let server = HttpServer::with_config(config).map_err(|e| CliError::Schema(e.to_string()))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server.start())?;

    Ok(())
}

fn check(
    schema: Option<String>,
    schema_file: Option<PathBuf>,
    strict: bool,
    file: &Path,
) -> CliResult<()> {
    let schema = load_schema(schema, schema_file)?;
    let payload = fs::read(file)?;

    let options = ValidateOptions {
        strict_types: strict,
    };

    match schema.validate_records_with(&payload, options) {
        Ok(records) => {
            println!("OK: {} record(s) valid", records.len());
            Ok(())
        }
        Err(SchemaError::Validation(report)) => Err(CliError::Validation(report.to_string())),
        Err(e) => Err(CliError::Schema(e.to_string())),
    }
}

fn print_normalized(schema: Option<String>, schema_file: Option<PathBuf>) -> CliResult<()> {
    let schema = load_schema(schema, schema_file)?;
    println!("{}", schema.print());
    Ok(())
}

/// Load server configuration from a JSON file.
fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("failed to read config: {}", e)))?;

    serde_json::from_str(&content)
        .map_err(|e| CliError::Config(format!("invalid config JSON: {}", e)))
}

/// Resolve a schema from an inline description or a file.
fn load_schema(schema: Option<String>, schema_file: Option<PathBuf>) -> CliResult<Schema> {
    let text = match (schema, schema_file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(&path)
            .map_err(|e| CliError::Config(format!("failed to read schema file: {}", e)))?,
        (None, None) => return Err(CliError::MissingSchema),
    };

    parse_schema(text.trim()).map_err(|e| CliError::Schema(e.to_string()))
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
