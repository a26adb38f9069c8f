//! Login handler

use axum::{extract::State, Json};
use tracing::{info, warn};
use validator::Validate;

use crate::auth::create_token;
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::AppState;

/// Verifies credentials and issues a JWT carrying the caller's role
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;

    let user = state
        .users
        .find_by_username(&request.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !crate::auth::verify_password(&request.password, &user.password_hash) {
        warn!(username = %request.username, "Failed login attempt");
        return Err(ApiError::Unauthorized);
    }

    let token = create_token(
        &user.id.to_string(),
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|_| ApiError::Unauthorized)?;

    info!(username = %request.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        role: user.role,
    }))
}
