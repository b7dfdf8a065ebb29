use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, ProductDto, validation};
use crate::db::{ImageOwner, NewProduct, ProductChanges};

const IMAGE_FOLDER: &str = "products";
const PDF_FOLDER: &str = "pdfs";

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub characteristics: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    pub compatibility: String,
    pub use_case: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub discount: Option<f64>,
    #[serde(default)]
    pub subcategories: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub pdf: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub characteristics: Option<String>,
    pub benefits: Option<Vec<String>>,
    pub compatibility: Option<String>,
    pub use_case: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub discount: Option<f64>,
    pub status: Option<bool>,
    pub images: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdatePdfRequest {
    pub pdf: String,
}

/// GET /products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, ApiError> {
    let models = state.store.list_products().await?;

    let mut dtos = Vec::with_capacity(models.len());
    for model in models {
        let images = state
            .store
            .image_urls_for(ImageOwner::Product, model.id)
            .await?;
        let subcategories = state.store.product_subcategories(model.id).await?;
        dtos.push(ProductDto::from_parts(model, images, subcategories));
    }

    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /products/{name}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let model = state
        .store
        .get_product_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &name))?;

    let images = state
        .store
        .image_urls_for(ImageOwner::Product, model.id)
        .await?;
    let subcategories = state.store.product_subcategories(model.id).await?;

    Ok(Json(ApiResponse::success(ProductDto::from_parts(
        model,
        images,
        subcategories,
    ))))
}

/// POST /products
/// Creates the product row, its subcategory links and its image rows in a
/// single transaction. Media files written before a failed commit are
/// removed again.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), ApiError> {
    let name = validation::validate_required(&payload.name, "Name")?.to_string();
    validation::validate_required(&payload.characteristics, "Characteristics")?;
    if payload.price < 0.0 {
        return Err(ApiError::validation("Price cannot be negative"));
    }
    if payload.stock < 0 {
        return Err(ApiError::validation("Stock cannot be negative"));
    }

    if state.store.product_exists(&name).await? {
        return Err(ApiError::Conflict(format!(
            "Product '{}' already exists",
            name
        )));
    }

    let mut subcategory_ids = Vec::with_capacity(payload.subcategories.len());
    for sub_name in &payload.subcategories {
        let subcategory = state
            .store
            .get_subcategory_by_name(sub_name)
            .await?
            .ok_or_else(|| ApiError::not_found("Subcategory", sub_name))?;
        subcategory_ids.push(subcategory.id);
    }

    // Media files land on disk first; if the transaction fails they are
    // cleaned up below.
    let mut stored_images = Vec::with_capacity(payload.images.len());
    for image in &payload.images {
        if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
            stored_images.push(url);
        }
    }

    let pdf_url = match &payload.pdf {
        Some(pdf) => state.media.save_pdf_base64(pdf, PDF_FOLDER).await?,
        None => None,
    };

    let input = NewProduct {
        name: name.clone(),
        characteristics: payload.characteristics.clone(),
        benefits: payload.benefits.clone(),
        compatibility: payload.compatibility.clone(),
        use_case: payload.use_case.clone(),
        price: payload.price,
        stock: payload.stock,
        discount: payload.discount,
        pdf_url: pdf_url.clone(),
    };

    let result: anyhow::Result<i32> = async {
        let txn = state.store.begin().await?;
        let product_id = state.store.insert_product(&txn, &input).await?;
        state
            .store
            .attach_product_subcategories(&txn, product_id, &subcategory_ids)
            .await?;
        for url in &stored_images {
            state
                .store
                .insert_image(&txn, ImageOwner::Product, product_id, url)
                .await?;
        }
        txn.commit().await?;
        Ok(product_id)
    }
    .await;

    let product_id = match result {
        Ok(id) => id,
        Err(e) => {
            for url in &stored_images {
                state.media.delete(url).await;
            }
            if let Some(url) = &pdf_url {
                state.media.delete(url).await;
            }
            return Err(e.into());
        }
    };

    tracing::info!("Product created: {} (id {})", name, product_id);

    let model = state
        .store
        .get_product_by_name(&name)
        .await?
        .ok_or_else(|| ApiError::internal("Product vanished after insert"))?;
    let subcategories = state.store.product_subcategories(product_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ProductDto::from_parts(
            model,
            stored_images,
            subcategories,
        ))),
    ))
}

/// PUT /products/{id}
/// Partial field update. When `images` is present the existing set is
/// replaced: old rows and files are removed, new payloads stored.
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    validation::validate_id(id)?;
    if let Some(price) = payload.price
        && price < 0.0
    {
        return Err(ApiError::validation("Price cannot be negative"));
    }

    let changes = ProductChanges {
        characteristics: payload.characteristics,
        benefits: payload.benefits,
        compatibility: payload.compatibility,
        use_case: payload.use_case,
        price: payload.price,
        stock: payload.stock,
        discount: payload.discount,
        status: payload.status,
    };

    state
        .store
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    let model = state.store.update_product(id, &changes).await?;

    let images = if let Some(new_images) = payload.images {
        let removed = state
            .store
            .delete_images_for(ImageOwner::Product, id)
            .await?;
        for url in &removed {
            state.media.delete(url).await;
        }

        let mut stored = Vec::with_capacity(new_images.len());
        for image in &new_images {
            if let Some(url) = state.media.save_image(image, IMAGE_FOLDER).await? {
                state
                    .store
                    .insert_image(&state.store.conn, ImageOwner::Product, id, &url)
                    .await?;
                stored.push(url);
            }
        }
        stored
    } else {
        state.store.image_urls_for(ImageOwner::Product, id).await?
    };

    let subcategories = state.store.product_subcategories(id).await?;

    Ok(Json(ApiResponse::success(ProductDto::from_parts(
        model,
        images,
        subcategories,
    ))))
}

/// PUT /products/{id}/pdf
/// Replaces the product datasheet; the previous file is deleted.
pub async fn update_product_pdf(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePdfRequest>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    let new_url = state
        .media
        .save_pdf_base64(&payload.pdf, PDF_FOLDER)
        .await?
        .ok_or_else(|| ApiError::BadRequest("PDF payload is empty".to_string()))?;

    if let Some(old_url) = &model.pdf_url {
        state.media.delete(old_url).await;
    }

    state
        .store
        .set_product_pdf_url(id, Some(new_url))
        .await?;

    let model = state
        .store
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;
    let images = state.store.image_urls_for(ImageOwner::Product, id).await?;
    let subcategories = state.store.product_subcategories(id).await?;

    Ok(Json(ApiResponse::success(ProductDto::from_parts(
        model,
        images,
        subcategories,
    ))))
}

/// DELETE /products/{id}
/// Removes the row, its image rows and all files on disk.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .get_product(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    let removed = state
        .store
        .delete_images_for(ImageOwner::Product, id)
        .await?;
    for url in &removed {
        state.media.delete(url).await;
    }
    if let Some(pdf_url) = &model.pdf_url {
        state.media.delete(pdf_url).await;
    }

    state.store.delete_product(id).await?;

    tracing::info!("Product deleted: {} (id {})", model.name, id);

    Ok(StatusCode::NO_CONTENT)
}
