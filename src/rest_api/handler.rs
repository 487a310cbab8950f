//! # Lightsaber Handlers
//!
//! Each handler validates its input, calls the repository and wraps the
//! result in the response envelope. Failures are returned as `ApiError`,
//! which owns the status mapping.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        OriginalUri, Path, Query, State,
    },
    http::{Method, StatusCode},
    response::Html,
    routing::get,
    Json, Router,
};
use serde_json::{Map, Value};

use crate::repository::LightsaberRepository;
use crate::schema::Lightsaber;
use crate::validation::{validate_create, validate_id, validate_query_filters, validate_update};

use super::docs::DOCS_PAGE;
use super::errors::{ApiError, ApiResult};
use super::response::ApiResponse;

// ==================
// Shared State
// ==================

/// State shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: LightsaberRepository,
}

impl AppState {
    pub fn new(repository: LightsaberRepository) -> Self {
        Self { repository }
    }
}

// ==================
// Router
// ==================

/// Routes mounted under `/api`
pub fn lightsaber_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/lightsabers",
            get(list_lightsabers)
                .post(create_lightsaber)
                .fallback(route_not_found),
        )
        .route(
            "/lightsabers/:id",
            get(get_lightsaber)
                .put(replace_lightsaber)
                .patch(update_lightsaber)
                .delete(delete_lightsaber)
                .fallback(route_not_found),
        )
        .with_state(state)
}

// ==================
// Extraction
// ==================

// Extractors are taken as `Result` so their rejections leave through
// `ApiError` and keep the envelope shape.
type IdParam = Result<Path<String>, PathRejection>;
type RawBody = Result<Bytes, BytesRejection>;
type QueryParams = Result<Query<HashMap<String, String>>, QueryRejection>;

/// Path id, checked for format
fn checked_id(param: IdParam) -> ApiResult<String> {
    let Path(id) = param?;
    validate_id(&id)?;
    Ok(id)
}

/// Buffers the body (honoring the size limit) and parses it as JSON
fn read_body(body: RawBody) -> ApiResult<Value> {
    parse_body(&body?)
}

/// An empty body reads as `{}`; anything else must parse as JSON.
fn parse_body(body: &Bytes) -> ApiResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidJson(e.to_string()))
}

// ==================
// Handlers
// ==================

/// GET /api/lightsabers
pub async fn list_lightsabers(
    State(state): State<AppState>,
    params: QueryParams,
) -> ApiResult<Json<ApiResponse<Vec<Lightsaber>>>> {
    let Query(params) = params?;
    let filters = validate_query_filters(&params)?;

    let records = state
        .repository
        .list(&filters)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to retrieve lightsabers"))?;

    let message = format!("Found {} lightsabers", records.len());
    Ok(Json(ApiResponse::ok_with_message(records, message)))
}

/// GET /api/lightsabers/:id
pub async fn get_lightsaber(
    State(state): State<AppState>,
    id: IdParam,
) -> ApiResult<Json<ApiResponse<Lightsaber>>> {
    let id = checked_id(id)?;

    let record = state
        .repository
        .get_by_id(&id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to retrieve lightsaber"))?;

    Ok(Json(ApiResponse::ok(record)))
}

/// POST /api/lightsabers
pub async fn create_lightsaber(
    State(state): State<AppState>,
    body: RawBody,
) -> ApiResult<(StatusCode, Json<ApiResponse<Lightsaber>>)> {
    let payload = read_body(body)?;
    let new = validate_create(&payload)?;

    let record = state
        .repository
        .create(new)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to create lightsaber"))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            record,
            "Lightsaber created successfully",
        )),
    ))
}

/// PATCH /api/lightsabers/:id
pub async fn update_lightsaber(
    State(state): State<AppState>,
    id: IdParam,
    body: RawBody,
) -> ApiResult<Json<ApiResponse<Lightsaber>>> {
    let id = checked_id(id)?;
    let payload = read_body(body)?;
    let patch = validate_update(&payload)?;

    let record = state
        .repository
        .update(&id, patch)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to update lightsaber"))?;

    Ok(Json(ApiResponse::ok_with_message(
        record,
        "Lightsaber updated successfully",
    )))
}

/// PUT /api/lightsabers/:id
pub async fn replace_lightsaber(
    State(state): State<AppState>,
    id: IdParam,
    body: RawBody,
) -> ApiResult<Json<ApiResponse<Lightsaber>>> {
    let id = checked_id(id)?;
    let payload = read_body(body)?;
    let new = validate_create(&payload)?;

    let record = state
        .repository
        .replace(&id, new)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to replace lightsaber"))?;

    Ok(Json(ApiResponse::ok_with_message(
        record,
        "Lightsaber replaced successfully",
    )))
}

/// DELETE /api/lightsabers/:id
pub async fn delete_lightsaber(
    State(state): State<AppState>,
    id: IdParam,
) -> ApiResult<StatusCode> {
    let id = checked_id(id)?;

    state
        .repository
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Failed to delete lightsaber"))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unmatched routes and methods.
///
/// Nested routers see a stripped URI, so the path comes from `OriginalUri`.
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// GET /
pub async fn docs_page() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

/// GET /health
pub async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message_only("OK"))
}
