use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::entities::{categories, subcategories};

#[derive(Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct SubcategoryRequest {
    pub name: String,
}

/// GET /categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<categories::Model>>>, ApiError> {
    let models = state.store.list_categories().await?;
    Ok(Json(ApiResponse::success(models)))
}

/// POST /categories
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<categories::Model>>), ApiError> {
    let name = validation::validate_required(&payload.name, "Name")?;

    if state.store.get_category_by_name(name).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Category '{}' already exists",
            name
        )));
    }

    let model = state.store.create_category(name).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(model))))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<ApiResponse<categories::Model>>, ApiError> {
    validation::validate_id(id)?;
    let name = validation::validate_required(&payload.name, "Name")?;

    let model = state
        .store
        .update_category(id, name)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", id))?;

    Ok(Json(ApiResponse::success(model)))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let deleted = state.store.delete_category(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Category", id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /categories/{id}/subcategories
pub async fn list_subcategories(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<subcategories::Model>>>, ApiError> {
    validation::validate_id(category_id)?;

    state
        .store
        .get_category(category_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", category_id))?;

    let models = state.store.list_subcategories(category_id).await?;
    Ok(Json(ApiResponse::success(models)))
}

/// POST /categories/{id}/subcategories
pub async fn create_subcategory(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i32>,
    Json(payload): Json<SubcategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<subcategories::Model>>), ApiError> {
    validation::validate_id(category_id)?;
    let name = validation::validate_required(&payload.name, "Name")?;

    state
        .store
        .get_category(category_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", category_id))?;

    if state.store.get_subcategory_by_name(name).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Subcategory '{}' already exists",
            name
        )));
    }

    let model = state.store.create_subcategory(category_id, name).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(model))))
}

/// DELETE /subcategories/{name}
pub async fn delete_subcategory(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = state.store.delete_subcategory_by_name(&name).await?;
    if !deleted {
        return Err(ApiError::not_found("Subcategory", &name));
    }

    Ok(StatusCode::NO_CONTENT)
}
