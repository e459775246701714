// HTTP handlers.
// Decode request filters, run the pipeline, and render indented JSON responses.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::RepoStatsError;
use crate::query::QueryFilter;

use super::AppState;

/// Errors returned to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    /// The request body was present but not a valid filter.
    BadRequest(String),
    /// The pipeline failed.
    Pipeline(RepoStatsError),
}

impl From<RepoStatsError> for ApiError {
    fn from(e: RepoStatsError) -> Self {
        ApiError::Pipeline(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, format!("Invalid filter: {}", msg)),
            ApiError::Pipeline(e) if e.is_upstream() => {
                tracing::error!(error = %e, "GitHub request failed");
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            ApiError::Pipeline(e) => {
                tracing::error!(error = %e, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Decode the optional filter body. An empty body is an empty filter.
fn parse_filter(body: &Bytes) -> Result<QueryFilter, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(QueryFilter::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Render `value` as indented JSON with a 200 status.
fn pretty_json<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::Pipeline(RepoStatsError::Encode(e)))?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// GET /ping
pub async fn ping() -> impl IntoResponse {
    Json(json!({ "status": "pong" }))
}

/// GET|POST /repos
pub async fn list_repositories(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let filter = parse_filter(&body)?;
    let result = state.service.list_repositories(&filter).await?;
    pretty_json(&result)
}

/// GET|POST /stats
pub async fn compute_stats(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let filter = parse_filter(&body)?;
    let stats = state.service.compute_stats(&filter).await?;
    pretty_json(&stats)
}
