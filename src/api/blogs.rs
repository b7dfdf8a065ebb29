use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, BlogDto, validation};
use crate::db::{BlogChanges, ImageOwner};

const IMAGE_FOLDER: &str = "blogs";

#[derive(Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub description: String,
    pub category_id: i32,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateBlogRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
    pub images: Option<Vec<String>>,
}

/// GET /blogs
pub async fn list_blogs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BlogDto>>>, ApiError> {
    let models = state.store.list_blogs().await?;

    let mut dtos = Vec::with_capacity(models.len());
    for model in models {
        let images = state.store.image_urls_for(ImageOwner::Blog, model.id).await?;
        dtos.push(BlogDto::from_parts(model, images));
    }

    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /categories/{id}/blogs
pub async fn list_blogs_for_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<BlogDto>>>, ApiError> {
    validation::validate_id(category_id)?;

    state
        .store
        .get_category(category_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", category_id))?;

    let models = state.store.list_blogs_for_category(category_id).await?;

    let mut dtos = Vec::with_capacity(models.len());
    for model in models {
        let images = state.store.image_urls_for(ImageOwner::Blog, model.id).await?;
        dtos.push(BlogDto::from_parts(model, images));
    }

    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /blogs/{id}
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BlogDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .get_blog(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog", id))?;

    let images = state.store.image_urls_for(ImageOwner::Blog, id).await?;

    Ok(Json(ApiResponse::success(BlogDto::from_parts(
        model, images,
    ))))
}

/// POST /blogs
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BlogDto>>), ApiError> {
    let title = validation::validate_required(&payload.title, "Title")?;
    validation::validate_required(&payload.description, "Description")?;
    validation::validate_id(payload.category_id)?;

    state
        .store
        .get_category(payload.category_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category", payload.category_id))?;

    let model = state
        .store
        .create_blog(title, &payload.description, payload.category_id)
        .await?;

    let mut stored = Vec::with_capacity(payload.images.len());
    for image in &payload.images {
        if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
            state
                .store
                .insert_image(&state.store.conn, ImageOwner::Blog, model.id, &url)
                .await?;
            stored.push(url);
        }
    }

    tracing::info!("Blog created: {} (id {})", model.title, model.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BlogDto::from_parts(model, stored))),
    ))
}

/// PUT /blogs/{id}
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<ApiResponse<BlogDto>>, ApiError> {
    validation::validate_id(id)?;

    if let Some(category_id) = payload.category_id {
        state
            .store
            .get_category(category_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Category", category_id))?;
    }

    let changes = BlogChanges {
        title: payload.title,
        description: payload.description,
        category_id: payload.category_id,
    };

    let model = state
        .store
        .update_blog(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Blog", id))?;

    let images = if let Some(new_images) = payload.images {
        let removed = state.store.delete_images_for(ImageOwner::Blog, id).await?;
        for url in &removed {
            state.media.delete(url).await;
        }

        let mut stored = Vec::with_capacity(new_images.len());
        for image in &new_images {
            if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
                state
                    .store
                    .insert_image(&state.store.conn, ImageOwner::Blog, id, &url)
                    .await?;
                stored.push(url);
            }
        }
        stored
    } else {
        state.store.image_urls_for(ImageOwner::Blog, id).await?
    };

    Ok(Json(ApiResponse::success(BlogDto::from_parts(
        model, images,
    ))))
}

/// DELETE /blogs/{id}
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let removed = state.store.delete_images_for(ImageOwner::Blog, id).await?;
    for url in &removed {
        state.media.delete(url).await;
    }

    let deleted = state.store.delete_blog(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Blog", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
