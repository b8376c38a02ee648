use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    Extension, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{ListQuery, NewRecommendation, Recommendation, RecommendationUpdate};

use super::extract::{Path, Query};
use super::AppState;

/// Media type required on request bodies
pub const JSON_CONTENT_TYPE: &str = "application/json";

const SERVICE_NAME: &str = "Recommendation REST API Service";

// Helpers

/// Rejects requests whose `Content-Type` is not exactly `application/json`
fn check_content_type(headers: &HeaderMap) -> AppResult<()> {
    match headers.get(header::CONTENT_TYPE) {
        Some(value) if value.as_bytes() == JSON_CONTENT_TYPE.as_bytes() => Ok(()),
        Some(value) => {
            tracing::error!(content_type = ?value, "Invalid Content-Type");
            Err(content_type_error())
        }
        None => {
            tracing::error!("No Content-Type specified");
            Err(content_type_error())
        }
    }
}

fn content_type_error() -> AppError {
    AppError::UnsupportedMediaType(format!("Content-Type must be {}", JSON_CONTENT_TYPE))
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid Recommendation: {}", e)))
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Recommendation with id '{}' was not found.", id))
}

async fn load(state: &AppState, id: i32) -> AppResult<Recommendation> {
    state.store.find(id).await?.ok_or_else(|| not_found(id))
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": 200, "message": "Healthy" }))
}

/// Service descriptor returned at `/` when no static UI is configured
pub async fn index() -> Json<Value> {
    tracing::info!("Request for Root URL");
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "paths": "/recommendations",
    }))
}

/// JSON 404 for paths no route matches
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No resource at '{}'", uri.path()))
}

/// JSON 405 for known paths requested with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!(
        "Method {} is not allowed on '{}'",
        method,
        uri.path()
    ))
}

/// Create a recommendation
pub async fn create_recommendation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<Recommendation>)> {
    check_content_type(&headers)?;

    let new: NewRecommendation = parse_body(&body)?;
    let rec = state.store.create(new).await?;

    tracing::info!(request_id = %request_id, id = rec.id, "Recommendation saved");

    let location = format!("/recommendations/{}", rec.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(rec)))
}

/// List recommendations, optionally narrowed by query filters
pub async fn list_recommendations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let filter = query.into_filter(&state.recommend_types)?;
    let recs = state.store.list(&filter).await?;

    tracing::info!(
        criteria = filter.criteria().len(),
        count = recs.len(),
        "Returning recommendations"
    );

    Ok(Json(recs))
}

/// Read a single recommendation
pub async fn get_recommendation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Recommendation>> {
    Ok(Json(load(&state, id).await?))
}

/// Merge the fields present in the body onto an existing recommendation
pub async fn update_recommendation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Recommendation>> {
    check_content_type(&headers)?;

    let mut rec = load(&state, id).await?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::InvalidInput(
            "No data provided to update the Recommendation".to_string(),
        ));
    }
    let update: RecommendationUpdate = parse_body(&body)?;
    if update.is_empty() {
        return Err(AppError::InvalidInput(
            "No data provided to update the Recommendation".to_string(),
        ));
    }

    rec.apply(update);
    let rec = state.store.update(&rec).await?;

    tracing::info!(request_id = %request_id, id, "Recommendation updated");
    Ok(Json(rec))
}

/// Point a recommendation at a different recommended product
pub async fn link_recommendation(
    State(state): State<AppState>,
    Path((id, recommend_product_id)): Path<(i32, i32)>,
) -> AppResult<Json<Recommendation>> {
    let mut rec = load(&state, id).await?;
    rec.recommend_product_id = recommend_product_id;
    let rec = state.store.update(&rec).await?;

    tracing::info!(id, recommend_product_id, "Recommendation linked");
    Ok(Json(rec))
}

/// Increase `rec_success` by one, capped at 100
pub async fn like_recommendation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Recommendation>> {
    let mut rec = load(&state, id).await?;
    if rec.like() {
        rec = state.store.update(&rec).await?;
    }

    tracing::info!(id, rec_success = rec.rec_success, "Recommendation liked");
    Ok(Json(rec))
}

/// Decrease `rec_success` by one, floored at 0
pub async fn dislike_recommendation(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Recommendation>> {
    let mut rec = load(&state, id).await?;
    if rec.dislike() {
        rec = state.store.update(&rec).await?;
    }

    tracing::info!(id, rec_success = rec.rec_success, "Recommendation disliked");
    Ok(Json(rec))
}

/// Delete by id; succeeds whether or not the record exists
pub async fn delete_recommendation(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if let Some(rec) = state.store.find(id).await? {
        state.store.delete(&rec).await?;
        tracing::info!(request_id = %request_id, id, "Recommendation deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Delete the first recommendation linking the two products
pub async fn delete_recommendation_by_pair(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((product_id, recommend_product_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    if state
        .store
        .delete_by_pair(product_id, recommend_product_id)
        .await?
    {
        tracing::info!(
            request_id = %request_id,
            product_id,
            recommend_product_id,
            "Recommendation deleted by product pair"
        );
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "No recommendation for product_id '{}' and recommend_product_id '{}' was found.",
            product_id, recommend_product_id
        )))
    }
}
