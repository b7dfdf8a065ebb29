use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, ServiceDto, validation};

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
}

/// GET /services
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ServiceDto>>>, ApiError> {
    let models = state.store.list_services().await?;
    let dtos = models.into_iter().map(ServiceDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /services/{id}
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ServiceDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .get_service(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", id))?;

    Ok(Json(ApiResponse::success(ServiceDto::from(model))))
}

/// POST /services
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ServiceDto>>), ApiError> {
    let title = validation::validate_required(&payload.title, "Title")?;
    validation::validate_required(&payload.description, "Description")?;

    let model = state
        .store
        .create_service(title, &payload.description, &payload.features)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ServiceDto::from(model))),
    ))
}

/// PUT /services/{id}
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<Json<ApiResponse<ServiceDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .update_service(
            id,
            payload.title.as_deref(),
            payload.description.as_deref(),
            payload.features.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Service", id))?;

    Ok(Json(ApiResponse::success(ServiceDto::from(model))))
}

/// DELETE /services/{id}
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let deleted = state.store.delete_service(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Service", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
