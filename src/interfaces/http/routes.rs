use crate::application::{query, wolfram};
use crate::domain::error::FolpError;
use crate::domain::model::{Health, QueryRequest};
use crate::interfaces::http::response::{error_body, json_body};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue, Method, StatusCode,
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lookup", post(lookup))
        .route("/translate", post(translate))
        .route("/code", post(code))
        .route("/explain", post(explain))
        .route("/wolfram/:type", post(wolfram_query))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(cors))
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

/// Parse a request body; an empty body or a non-object counts as "no fields"
fn parse_body(body: &Bytes) -> Result<QueryRequest, FolpError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(QueryRequest::default());
    }
    let value: serde_json::Value = serde_json::from_slice(body).map_err(FolpError::InvalidJson)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn require_query(request: &QueryRequest) -> Result<&str, FolpError> {
    request.query().ok_or_else(FolpError::q_required)
}

async fn health() -> Json<Health> {
    Json(Health { ok: true })
}

async fn lookup(State(state): State<AppState>, body: Bytes) -> Result<Response, FolpError> {
    let request = parse_body(&body)?;
    let q = require_query(&request)?;
    Ok(json_body(query::lookup(&state, q).await?))
}

async fn translate(State(state): State<AppState>, body: Bytes) -> Result<Response, FolpError> {
    let request = parse_body(&body)?;
    let q = require_query(&request)?;
    Ok(json_body(query::translate(&state, q, request.target()).await?))
}

async fn code(State(state): State<AppState>, body: Bytes) -> Result<Response, FolpError> {
    let request = parse_body(&body)?;
    let q = require_query(&request)?;
    Ok(json_body(query::code(&state, q).await?))
}

async fn explain(body: Bytes) -> Result<Response, FolpError> {
    let request = parse_body(&body)?;
    let q = require_query(&request)?;
    Ok(Json(query::explain(q)).into_response())
}

async fn wolfram_query(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    body: Bytes,
) -> Result<Response, FolpError> {
    let request = parse_body(&body)?;
    let q = require_query(&request)?;
    Ok(Json(wolfram::query(&state, &kind, q).await?).into_response())
}

async fn not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "not found")
}

/// Allow any origin; answer preflight requests directly
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,HEAD,PUT,PATCH,POST,DELETE"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

async fn trace_request(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let started = Instant::now();
        let mut response = next.run(request).await;
        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "handled"
        );
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert("x-request-id", value);
        }
        response
    }
    .instrument(span)
    .await
}
