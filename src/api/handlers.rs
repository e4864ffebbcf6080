//! HTTP API handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, FromRef, OriginalUri, Path, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::ServiceError;
use crate::store::RecordStore;
use crate::telemetry::Telemetry;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-lifetime store client.
    pub store: Arc<dyn RecordStore>,
    /// Process-lifetime telemetry sink.
    pub telemetry: Telemetry,
}

// Lets handlers that only report telemetry (405, liveness) run in both the
// full router and the store-free liveness router.
impl FromRef<AppState> for Telemetry {
    fn from_ref(state: &AppState) -> Self {
        state.telemetry.clone()
    }
}

/// Scan the whole table and return every record as a JSON array.
///
/// Partial results are never written: any page failure discards what was
/// accumulated and the caller sees only the error text.
pub async fn get_all(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let records = match state.store.scan_all().await {
        Ok(records) => records,
        Err(e) => return internal_error(&state.telemetry, e),
    };

    let body = match serde_json::to_vec(&records) {
        Ok(body) => body,
        Err(e) => return internal_error(&state.telemetry, ServiceError::from(e)),
    };

    state
        .telemetry
        .info(request_event(&method, &uri, connect.as_ref()));
    json_response(body)
}

/// Filtered scan by identifier, always answering 200 with one record object.
pub async fn search(
    State(state): State<AppState>,
    Path(name): Path<String>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    // Route constraint: identifiers are letters and hyphens only; anything
    // else is not a recognized path.
    if !is_valid_search_name(&name) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let matches = match state.store.find_by_id(&name).await {
        Ok(matches) => matches,
        Err(e) => return internal_error(&state.telemetry, e),
    };

    // Historical contract: an absent identifier yields the zero-valued
    // record, and multiple matches collapse to the last one in scan order.
    let record = matches.into_iter().last().unwrap_or_default();

    let body = match serde_json::to_vec(&record) {
        Ok(body) => body,
        Err(e) => return internal_error(&state.telemetry, ServiceError::from(e)),
    };

    state
        .telemetry
        .info(request_event(&method, &uri, connect.as_ref()));
    json_response(body)
}

/// Live table status from store metadata.
pub async fn get_status(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let status = match state.store.table_status().await {
        Ok(status) => status,
        Err(e) => return internal_error(&state.telemetry, e),
    };

    let body = match serde_json::to_vec(&status) {
        Ok(body) => body,
        Err(e) => return internal_error(&state.telemetry, ServiceError::from(e)),
    };

    state
        .telemetry
        .info(request_event(&method, &uri, connect.as_ref()));
    json_response(body)
}

/// Store-free liveness probe: current UTC timestamp as plain text.
pub async fn liveness(
    State(telemetry): State<Telemetry>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    let now = OffsetDateTime::now_utc();
    let body = now.format(&Rfc3339).unwrap_or_else(|_| now.to_string());

    telemetry.info(request_event(&method, &uri, connect.as_ref()));
    (StatusCode::OK, body).into_response()
}

/// Reject a disallowed method with 405, reporting it to telemetry.
pub async fn method_not_allowed(
    State(telemetry): State<Telemetry>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    connect: Option<ConnectInfo<SocketAddr>>,
) -> Response {
    telemetry.error(format!(
        "Method: {}. Not allowed from: {}. Path: {}",
        method,
        caller(connect.as_ref()),
        uri
    ));

    StatusCode::METHOD_NOT_ALLOWED.into_response()
}

fn is_valid_search_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}

fn caller(connect: Option<&ConnectInfo<SocketAddr>>) -> String {
    connect
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn request_event(method: &Method, uri: &Uri, connect: Option<&ConnectInfo<SocketAddr>>) -> String {
    format!(
        "Source ip: {}. Path: {}. Method: {}",
        caller(connect),
        uri,
        method
    )
}

/// 500 with the raw error text as the body; the same text goes to telemetry.
fn internal_error(telemetry: &Telemetry, err: ServiceError) -> Response {
    let message = err.to_string();
    telemetry.error(message.clone());
    (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
}

fn json_response(body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}
