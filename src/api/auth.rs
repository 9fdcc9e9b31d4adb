use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{validation, ApiError, ApiResponse, AppState};
use crate::services::{LoginResult, UserSummary};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Middleware guarding the protected routes. Accepts only
/// `Authorization: Bearer <token>`; on success the resolved user is made
/// available to handlers as a request extension.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("Missing authentication token".to_string()))?;

    let user = state.auth_service.verify_token(&token).await?;

    tracing::Span::current().record("user_id", user.id);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("Authorization")?.to_str().ok()?;
    let token = auth_header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    validation::validate_login(&payload.email, &payload.password)?;

    let result = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(result)))
}

/// GET /auth/me
///
/// The middleware already resolved the token, so this just echoes the
/// user it stashed in the request extensions.
pub async fn get_current_user(
    Extension(user): Extension<UserSummary>,
) -> Json<ApiResponse<UserSummary>> {
    Json(ApiResponse::success(user))
}
