use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PromotionDto, validation};
use crate::db::ImageOwner;

const IMAGE_FOLDER: &str = "promotions";

#[derive(Deserialize)]
pub struct CreatePromotionRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdatePromotionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
}

/// GET /promotions
pub async fn list_promotions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PromotionDto>>>, ApiError> {
    let models = state.store.list_promotions().await?;

    let mut dtos = Vec::with_capacity(models.len());
    for model in models {
        let images = state
            .store
            .image_urls_for(ImageOwner::Promotion, model.id)
            .await?;
        dtos.push(PromotionDto::from_parts(model, images));
    }

    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /promotions/{id}
pub async fn get_promotion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<PromotionDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .get_promotion(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Promotion", id))?;

    let images = state
        .store
        .image_urls_for(ImageOwner::Promotion, id)
        .await?;

    Ok(Json(ApiResponse::success(PromotionDto::from_parts(
        model, images,
    ))))
}

/// POST /promotions
pub async fn create_promotion(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePromotionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PromotionDto>>), ApiError> {
    let title = validation::validate_required(&payload.title, "Title")?;
    validation::validate_required(&payload.description, "Description")?;

    let model = state
        .store
        .create_promotion(title, &payload.description)
        .await?;

    let mut stored = Vec::with_capacity(payload.images.len());
    for image in &payload.images {
        if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
            state
                .store
                .insert_image(&state.store.conn, ImageOwner::Promotion, model.id, &url)
                .await?;
            stored.push(url);
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PromotionDto::from_parts(
            model, stored,
        ))),
    ))
}

/// PUT /promotions/{id}
pub async fn update_promotion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePromotionRequest>,
) -> Result<Json<ApiResponse<PromotionDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .update_promotion(id, payload.title.as_deref(), payload.description.as_deref())
        .await?
        .ok_or_else(|| ApiError::not_found("Promotion", id))?;

    let images = if let Some(new_images) = payload.images {
        let removed = state
            .store
            .delete_images_for(ImageOwner::Promotion, id)
            .await?;
        for url in &removed {
            state.media.delete(url).await;
        }

        let mut stored = Vec::with_capacity(new_images.len());
        for image in &new_images {
            if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
                state
                    .store
                    .insert_image(&state.store.conn, ImageOwner::Promotion, id, &url)
                    .await?;
                stored.push(url);
            }
        }
        stored
    } else {
        state.store.image_urls_for(ImageOwner::Promotion, id).await?
    };

    Ok(Json(ApiResponse::success(PromotionDto::from_parts(
        model, images,
    ))))
}

/// DELETE /promotions/{id}
pub async fn delete_promotion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let removed = state
        .store
        .delete_images_for(ImageOwner::Promotion, id)
        .await?;
    for url in &removed {
        state.media.delete(url).await;
    }

    let deleted = state.store.delete_promotion(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Promotion", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
