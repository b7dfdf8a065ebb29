use axum::{
    Extension, Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::services::Claims;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Serialize)]
pub struct UserInfoResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Deserialize)]
pub struct SendCodeRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Requires an `Authorization: Bearer <jwt>` header. Validated claims are
/// stored in request extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let claims = state
        .jwt
        .validate(&token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    tracing::Span::current().record("user_id", &claims.sub);
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// Rejects authenticated users whose role is not `admin`. Runs after
/// [`auth_middleware`], relying on the claims it stored.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    if !claims.is_admin() {
        return Err(ApiError::Forbidden(
            "Administrator privileges required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?;
    Some(token.trim().to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Creates the administrator account. Locked once any user exists.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let username = validation::validate_required(&payload.username, "Username")?;
    let email = validation::validate_email(&payload.email)?;
    validation::validate_password(&payload.password)?;

    let existing = state.store.count_users().await?;
    if existing > 0 {
        return Err(ApiError::Forbidden(
            "Registration is closed".to_string(),
        ));
    }

    let user = state
        .store
        .create_user(username, email, "admin", &payload.password)
        .await?;

    tracing::info!("Administrator account created: {}", user.username);

    let (token, expires_in) = state
        .jwt
        .issue(user.id, &user.username, &user.role)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    Ok(Json(ApiResponse::success(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in,
    })))
}

/// POST /auth/login
/// Authenticates with username and password, returns a JWT on success.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let is_valid = state
        .store
        .verify_user_password(&payload.username, &payload.password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    if !is_valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let user = state
        .store
        .get_user_by_username(&payload.username)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to get user: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let (token, expires_in) = state
        .jwt
        .issue(user.id, &user.username, &user.role)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    Ok(Json(ApiResponse::success(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in,
    })))
}

/// POST /auth/refresh
/// Issues a fresh token for the bearer of a currently valid one.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

    let user = state
        .store
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    let (token, expires_in) = state
        .jwt
        .issue(user.id, &user.username, &user.role)
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {e}")))?;

    Ok(Json(ApiResponse::success(TokenResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in,
    })))
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<UserInfoResponse>>, ApiError> {
    let user_id: i32 = claims
        .sub
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

    let user = state
        .store
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User no longer exists".to_string()))?;

    Ok(Json(ApiResponse::success(UserInfoResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
    })))
}

/// POST /auth/send-code-email
/// Generates a verification code for the account and emails it.
pub async fn send_code_email(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SendCodeRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let email = validation::validate_email(&payload.email)?;

    state.password_reset.request_reset(email).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Verification code sent".to_string(),
    })))
}

/// POST /auth/change-password
/// Consumes a verification code and sets the new password.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let email = validation::validate_email(&payload.email)?;
    let code = validation::validate_reset_code(&payload.code)?;
    validation::validate_password(&payload.new_password)?;

    state
        .password_reset
        .change_password(email, code, &payload.new_password)
        .await?;

    tracing::info!("Password changed via verification code for {}", email);

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Password updated successfully".to_string(),
    })))
}
