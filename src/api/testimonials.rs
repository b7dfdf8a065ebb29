use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, TestimonialDto, validation};
use crate::db::{ImageOwner, TestimonialChanges};

const IMAGE_FOLDER: &str = "testimonials";

#[derive(Deserialize)]
pub struct CreateTestimonialRequest {
    pub customer_name: String,
    pub description: String,
    pub date: String,
    pub rating: i32,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateTestimonialRequest {
    pub customer_name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub rating: Option<i32>,
    pub images: Option<Vec<String>>,
}

/// GET /testimonials
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TestimonialDto>>>, ApiError> {
    let models = state.store.list_testimonials().await?;

    let mut dtos = Vec::with_capacity(models.len());
    for model in models {
        let images = state
            .store
            .image_urls_for(ImageOwner::Testimonial, model.id)
            .await?;
        dtos.push(TestimonialDto::from_parts(model, images));
    }

    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /testimonials/{id}
pub async fn get_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<TestimonialDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .get_testimonial(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Testimonial", id))?;

    let images = state
        .store
        .image_urls_for(ImageOwner::Testimonial, id)
        .await?;

    Ok(Json(ApiResponse::success(TestimonialDto::from_parts(
        model, images,
    ))))
}

/// POST /testimonials
pub async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTestimonialRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TestimonialDto>>), ApiError> {
    let customer_name = validation::validate_required(&payload.customer_name, "Customer name")?;
    validation::validate_required(&payload.description, "Description")?;
    validation::validate_rating(payload.rating)?;

    let model = state
        .store
        .create_testimonial(
            customer_name,
            &payload.description,
            &payload.date,
            payload.rating,
        )
        .await?;

    let mut stored = Vec::with_capacity(payload.images.len());
    for image in &payload.images {
        if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
            state
                .store
                .insert_image(&state.store.conn, ImageOwner::Testimonial, model.id, &url)
                .await?;
            stored.push(url);
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(TestimonialDto::from_parts(
            model, stored,
        ))),
    ))
}

/// PUT /testimonials/{id}
pub async fn update_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTestimonialRequest>,
) -> Result<Json<ApiResponse<TestimonialDto>>, ApiError> {
    validation::validate_id(id)?;
    if let Some(rating) = payload.rating {
        validation::validate_rating(rating)?;
    }

    let changes = TestimonialChanges {
        customer_name: payload.customer_name,
        description: payload.description,
        date: payload.date,
        rating: payload.rating,
    };

    let model = state
        .store
        .update_testimonial(id, &changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Testimonial", id))?;

    let images = if let Some(new_images) = payload.images {
        let removed = state
            .store
            .delete_images_for(ImageOwner::Testimonial, id)
            .await?;
        for url in &removed {
            state.media.delete(url).await;
        }

        let mut stored = Vec::with_capacity(new_images.len());
        for image in &new_images {
            if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
                state
                    .store
                    .insert_image(&state.store.conn, ImageOwner::Testimonial, id, &url)
                    .await?;
                stored.push(url);
            }
        }
        stored
    } else {
        state
            .store
            .image_urls_for(ImageOwner::Testimonial, id)
            .await?
    };

    Ok(Json(ApiResponse::success(TestimonialDto::from_parts(
        model, images,
    ))))
}

/// DELETE /testimonials/{id}
pub async fn delete_testimonial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let removed = state
        .store
        .delete_images_for(ImageOwner::Testimonial, id)
        .await?;
    for url in &removed {
        state.media.delete(url).await;
    }

    let deleted = state.store.delete_testimonial(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Testimonial", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
