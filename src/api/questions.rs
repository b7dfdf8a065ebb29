use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::entities::questions;

#[derive(Deserialize)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Deserialize)]
pub struct UpdateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

/// GET /questions
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<questions::Model>>>, ApiError> {
    let models = state.store.list_questions().await?;
    Ok(Json(ApiResponse::success(models)))
}

/// POST /questions
pub async fn create_question(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<questions::Model>>), ApiError> {
    let question = validation::validate_required(&payload.question, "Question")?;
    let answer = validation::validate_required(&payload.answer, "Answer")?;

    let model = state.store.create_question(question, answer).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(model))))
}

/// PUT /questions/{id}
pub async fn update_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<Json<ApiResponse<questions::Model>>, ApiError> {
    validation::validate_id(id)?;

    let model = state
        .store
        .update_question(id, payload.question.as_deref(), payload.answer.as_deref())
        .await?
        .ok_or_else(|| ApiError::not_found("Question", id))?;

    Ok(Json(ApiResponse::success(model)))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    validation::validate_id(id)?;

    let deleted = state.store.delete_question(id).await?;
    if !deleted {
        return Err(ApiError::not_found("Question", id));
    }

    Ok(StatusCode::NO_CONTENT)
}
