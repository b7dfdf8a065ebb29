use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{AboutUsDto, AboutUsHomeDto, ApiError, ApiResponse, AppState, types, validation};
use crate::db::ImageOwner;

const IMAGE_FOLDER: &str = "about";

#[derive(Deserialize)]
pub struct UpdateAboutUsRequest {
    pub mission: Option<String>,
    pub vision: Option<String>,
    pub youtube_name: Option<String>,
    pub youtube_url: Option<String>,
}

#[derive(Deserialize)]
pub struct ValueRequest {
    pub value: String,
}

#[derive(Deserialize)]
pub struct ImageRequest {
    pub image: String,
}

#[derive(Deserialize)]
pub struct UpdateAboutUsHomeRequest {
    pub text_section_one: Option<String>,
    pub text_section_two: Option<String>,
    pub image: Option<String>,
}

/// GET /about-us
pub async fn get_about_us(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<AboutUsDto>>, ApiError> {
    let model = state.store.get_about_us().await?;
    let images = state
        .store
        .image_urls_for(ImageOwner::AboutUs, model.id)
        .await?;
    Ok(Json(ApiResponse::success(AboutUsDto::from_parts(
        model, images,
    ))))
}

/// PUT /about-us
pub async fn update_about_us(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateAboutUsRequest>,
) -> Result<Json<ApiResponse<AboutUsDto>>, ApiError> {
    let current = state.store.get_about_us().await?;

    let model = state
        .store
        .update_about_us(
            current.id,
            payload.mission.as_deref(),
            payload.vision.as_deref(),
            payload.youtube_name.as_deref(),
            payload.youtube_url.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::internal("About-us row missing"))?;

    let images = state
        .store
        .image_urls_for(ImageOwner::AboutUs, model.id)
        .await?;
    Ok(Json(ApiResponse::success(AboutUsDto::from_parts(
        model, images,
    ))))
}

/// POST /about-us/values
pub async fn add_value(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ValueRequest>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let value = validation::validate_required(&payload.value, "Value")?;

    let current = state.store.get_about_us().await?;
    let mut values = types::json_list(&current.about_values);
    values.push(value.to_string());

    state.store.set_about_us_values(current.id, &values).await?;

    Ok(Json(ApiResponse::success(values)))
}

/// PUT /about-us/values/{index}
pub async fn update_value(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(payload): Json<ValueRequest>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let value = validation::validate_required(&payload.value, "Value")?;

    let current = state.store.get_about_us().await?;
    let mut values = types::json_list(&current.about_values);

    let slot = values
        .get_mut(index)
        .ok_or_else(|| ApiError::not_found("Value at index", index))?;
    *slot = value.to_string();

    state.store.set_about_us_values(current.id, &values).await?;

    Ok(Json(ApiResponse::success(values)))
}

/// DELETE /about-us/values/{index}
pub async fn delete_value(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let current = state.store.get_about_us().await?;
    let mut values = types::json_list(&current.about_values);

    if index >= values.len() {
        return Err(ApiError::not_found("Value at index", index));
    }
    values.remove(index);

    state.store.set_about_us_values(current.id, &values).await?;

    Ok(Json(ApiResponse::success(values)))
}

/// PUT /about-us/image
/// Replaces the page image; the previous file and row are removed.
pub async fn update_about_us_image(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ImageRequest>,
) -> Result<Json<ApiResponse<AboutUsDto>>, ApiError> {
    let current = state.store.get_about_us().await?;

    let url = state
        .media
        .save_image(&payload.image, IMAGE_FOLDER)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Image payload is empty".to_string()))?;

    let removed = state
        .store
        .delete_images_for(ImageOwner::AboutUs, current.id)
        .await?;
    for old in &removed {
        state.media.delete(old).await;
    }

    state
        .store
        .insert_image(&state.store.conn, ImageOwner::AboutUs, current.id, &url)
        .await?;

    let model = state.store.get_about_us().await?;
    Ok(Json(ApiResponse::success(AboutUsDto::from_parts(
        model,
        vec![url],
    ))))
}

/// GET /about-us-home
pub async fn get_about_us_home(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<AboutUsHomeDto>>, ApiError> {
    let model = state.store.get_about_us_home().await?;
    let images = state
        .store
        .image_urls_for(ImageOwner::AboutUsHome, model.id)
        .await?;
    Ok(Json(ApiResponse::success(AboutUsHomeDto::from_parts(
        model, images,
    ))))
}

/// PUT /about-us-home
pub async fn update_about_us_home(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateAboutUsHomeRequest>,
) -> Result<Json<ApiResponse<AboutUsHomeDto>>, ApiError> {
    let current = state.store.get_about_us_home().await?;

    let model = state
        .store
        .update_about_us_home(
            current.id,
            payload.text_section_one.as_deref(),
            payload.text_section_two.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::internal("About-us-home row missing"))?;

    let images = if let Some(image) = &payload.image {
        let url = state
            .media
            .save_image(image, IMAGE_FOLDER)
            .await?
            .ok_or_else(|| ApiError::BadRequest("Image payload is empty".to_string()))?;

        let removed = state
            .store
            .delete_images_for(ImageOwner::AboutUsHome, model.id)
            .await?;
        for old in &removed {
            state.media.delete(old).await;
        }

        state
            .store
            .insert_image(&state.store.conn, ImageOwner::AboutUsHome, model.id, &url)
            .await?;

        vec![url]
    } else {
        state
            .store
            .image_urls_for(ImageOwner::AboutUsHome, model.id)
            .await?
    };

    Ok(Json(ApiResponse::success(AboutUsHomeDto::from_parts(
        model, images,
    ))))
}
