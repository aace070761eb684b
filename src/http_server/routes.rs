//! Record CRUD routes.
//!
//! The whole surface is thin glue over the schema engine:
//!
//! - `GET /schema` echoes the reference schema description.
//! - `GET /records` returns stored rows as CSV; the `Content-Schema`
//!   response header carries the reference schema so a client can validate
//!   what it receives.
//! - `POST /records` requires a `Content-Schema` request header. The
//!   supplied schema must parse and be structurally equivalent to the
//!   reference schema; only then is the body validated and appended.
//! - `PUT /records?<column>=<value>...` replaces every row matching all key
//!   parameters with the first validated record of the body.
//! - `DELETE /records?<column>=<value>...` removes matching rows.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

use crate::schema::{parse_schema, Schema, ValidateOptions};
use crate::store::RecordStore;

use super::errors::{ApiError, ApiResult};

/// Request/response header carrying a schema description.
pub const CONTENT_SCHEMA_HEADER: &str = "content-schema";

/// State shared across record handlers
pub struct AppState {
    pub schema: Schema,
    pub store: RecordStore,
    pub options: ValidateOptions,
}

impl AppState {
    pub fn new(schema: Schema, strict_types: bool) -> Self {
        Self {
            schema,
            store: RecordStore::new(),
            options: ValidateOptions { strict_types },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Health check routes
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Record CRUD routes
pub fn record_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/schema", get(get_schema_handler))
        .route(
            "/records",
            get(list_records_handler)
                .post(insert_records_handler)
                .put(update_records_handler)
                .delete(delete_records_handler),
        )
        .with_state(state)
}

async fn health_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
    })
}

async fn get_schema_handler(State(state): State<Arc<AppState>>) -> String {
    state.schema.print()
}

async fn list_records_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<([(header::HeaderName, String); 2], String)> {
    let body = encode_csv(&state.schema, &state.store.snapshot())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::HeaderName::from_static(CONTENT_SCHEMA_HEADER),
                state.schema.print(),
            ),
        ],
        body,
    ))
}

async fn insert_records_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let records = accept_payload(&state, &headers, &body)?;
    let count = records.len();
    state.store.append(records);

    info!(count, total = state.store.len(), "records inserted");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: format!("inserted {} record(s)", count),
        }),
    ))
}

async fn update_records_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let keys = resolve_keys(&state.schema, &params)?;
    let records = accept_payload(&state, &headers, &body)?;

    // Updates carry a single record; extras are ignored.
    let replacement = records.first().ok_or(ApiError::EmptyPayload)?;
    let updated = state.store.update_matching(&keys, replacement);

    info!(updated, "records updated");
    Ok(Json(MessageResponse {
        message: format!("updated {} record(s)", updated),
    }))
}

async fn delete_records_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<MessageResponse>> {
    let keys = resolve_keys(&state.schema, &params)?;
    let removed = state.store.delete_matching(&keys);

    info!(removed, "records deleted");
    Ok(Json(MessageResponse {
        message: format!("deleted {} record(s)", removed),
    }))
}

/// Runs the full acceptance gate for a write: supplied schema present,
/// parseable, structurally equivalent to the reference, payload valid.
fn accept_payload(
    state: &AppState,
    headers: &HeaderMap,
    body: &[u8],
) -> ApiResult<Vec<Vec<String>>> {
    let supplied = supplied_schema(headers)?;

    if !state.schema.is_valid(&supplied) {
        return Err(ApiError::IncompatibleSchema);
    }

    supplied
        .validate_records_with(body, state.options)
        .map_err(ApiError::from_validation)
}

/// Extracts and parses the Content-Schema request header.
fn supplied_schema(headers: &HeaderMap) -> ApiResult<Schema> {
    let raw = headers
        .get(CONTENT_SCHEMA_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .unwrap_or("");

    if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
        return Err(ApiError::MissingSchema);
    }

    parse_schema(raw).map_err(ApiError::from_parse)
}

/// Resolves `?name=value` query parameters to positional `(index, value)`
/// match keys via case-insensitive column-name lookup.
fn resolve_keys(
    schema: &Schema,
    params: &HashMap<String, String>,
) -> ApiResult<Vec<(usize, String)>> {
    if params.is_empty() {
        return Err(ApiError::MissingKeys);
    }

    let mut keys = Vec::with_capacity(params.len());
    for (name, value) in params {
        let index = schema
            .column_index(name)
            .ok_or_else(|| ApiError::UnknownColumn(name.clone()))?;
        keys.push((index, value.clone()));
    }
    Ok(keys)
}

/// Encodes rows as CSV text with the schema delimiter.
fn encode_csv(schema: &Schema, rows: &[Vec<String>]) -> ApiResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(schema.delimiter_byte())
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal(e.to_string()))
}
