use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::entities::info_contacts;

#[derive(Deserialize)]
pub struct UpdateInfoContactRequest {
    pub location: Option<String>,
    pub cellphone: Option<String>,
    pub email: Option<String>,
    pub attention_hours: Option<String>,
}

/// GET /info-contact
pub async fn get_info_contact(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<info_contacts::Model>>, ApiError> {
    let model = state.store.get_info_contact().await?;
    Ok(Json(ApiResponse::success(model)))
}

/// PUT /info-contact
pub async fn update_info_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateInfoContactRequest>,
) -> Result<Json<ApiResponse<info_contacts::Model>>, ApiError> {
    let model = state
        .store
        .update_info_contact(
            payload.location.as_deref(),
            payload.cellphone.as_deref(),
            payload.email.as_deref(),
            payload.attention_hours.as_deref(),
        )
        .await?;

    Ok(Json(ApiResponse::success(model)))
}
