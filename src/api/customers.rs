use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::db::NewCustomer;
use crate::entities::customers;

#[derive(Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub lastname: String,
    pub cellphone: String,
    pub district: String,
    pub email: String,
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// POST /customers
/// Public lead-capture endpoint for the contact form.
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<customers::Model>>), ApiError> {
    let name = validation::validate_required(&payload.name, "Name")?;
    let lastname = validation::validate_required(&payload.lastname, "Lastname")?;
    let cellphone = validation::validate_required(&payload.cellphone, "Cellphone")?;
    let email = validation::validate_email(&payload.email)?;

    let input = NewCustomer {
        name: name.to_string(),
        lastname: lastname.to_string(),
        cellphone: cellphone.to_string(),
        district: payload.district.trim().to_string(),
        email: email.to_string(),
        message: payload.message.clone(),
    };

    let model = state.store.create_customer(&input).await?;

    tracing::info!("Customer lead captured: {} {}", model.name, model.lastname);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(model))))
}

/// GET /customers
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<customers::Model>>>, ApiError> {
    let models = state.store.list_customers().await?;
    Ok(Json(ApiResponse::success(models)))
}

/// GET /customers/{id}
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<customers::Model>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .get_customer(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))?;

    Ok(Json(ApiResponse::success(model)))
}

/// PUT /customers/{id}/active
pub async fn set_customer_active(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<customers::Model>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .set_customer_active(id, payload.active)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))?;

    Ok(Json(ApiResponse::success(model)))
}

/// DELETE /customers/{id}
pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let deleted = state.store.delete_customer(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Customer", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
