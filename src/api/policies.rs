use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PolicyDto, validation};
use crate::db::ImageOwner;

const IMAGE_FOLDER: &str = "policies";

#[derive(Deserialize)]
pub struct CreatePolicyRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdatePolicyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
}

/// GET /policies
pub async fn list_policies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PolicyDto>>>, ApiError> {
    let models = state.store.list_policies().await?;

    let mut dtos = Vec::with_capacity(models.len());
    for model in models {
        let images = state
            .store
            .image_urls_for(ImageOwner::Policy, model.id)
            .await?;
        dtos.push(PolicyDto::from_parts(model, images));
    }

    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /policies/{id}
pub async fn get_policy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PolicyDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .get_policy(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Policy", id))?;

    let images = state.store.image_urls_for(ImageOwner::Policy, id).await?;

    Ok(Json(ApiResponse::success(PolicyDto::from_parts(
        model, images,
    ))))
}

/// POST /policies
pub async fn create_policy(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePolicyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PolicyDto>>), ApiError> {
    let title = validation::validate_required(&payload.title, "Title")?;
    validation::validate_required(&payload.description, "Description")?;

    let model = state.store.create_policy(title, &payload.description).await?;

    let mut stored = Vec::with_capacity(payload.images.len());
    for image in &payload.images {
        if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
            state
                .store
                .insert_image(&state.store.conn, ImageOwner::Policy, model.id, &url)
                .await?;
            stored.push(url);
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PolicyDto::from_parts(model, stored))),
    ))
}

/// PUT /policies/{id}
pub async fn update_policy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePolicyRequest>,
) -> Result<Json<ApiResponse<PolicyDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .update_policy(id, payload.title.as_deref(), payload.description.as_deref())
        .await?
        .ok_or_else(|| ApiError::not_found("Policy", id))?;

    let images = if let Some(new_images) = payload.images {
        let removed = state.store.delete_images_for(ImageOwner::Policy, id).await?;
        for url in &removed {
            state.media.delete(url).await;
        }

        let mut stored = Vec::with_capacity(new_images.len());
        for image in &new_images {
            if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
                state
                    .store
                    .insert_image(&state.store.conn, ImageOwner::Policy, id, &url)
                    .await?;
                stored.push(url);
            }
        }
        stored
    } else {
        state.store.image_urls_for(ImageOwner::Policy, id).await?
    };

    Ok(Json(ApiResponse::success(PolicyDto::from_parts(
        model, images,
    ))))
}

/// DELETE /policies/{id}
pub async fn delete_policy(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let removed = state.store.delete_images_for(ImageOwner::Policy, id).await?;
    for url in &removed {
        state.media.delete(url).await;
    }

    let deleted = state.store.delete_policy(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Policy", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
