//! Store settings handlers

use axum::{extract::State, Json};
use validator::Validate;

use core_kernel::StoreSettings;

use crate::dto::settings::{SettingsResponse, UpdateSettingsRequest};
use crate::error::ApiError;
use crate::AppState;

/// Returns the store profile; an unconfigured store reads as empty defaults
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let settings = state.settings.get().await?.unwrap_or_default();
    Ok(Json(SettingsResponse::from(settings)))
}

/// Creates or overwrites the singleton store profile
pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, ApiError> {
    request.validate()?;

    let settings = StoreSettings::from(request);
    state.settings.upsert(&settings).await?;

    Ok(Json(SettingsResponse::from(settings)))
}
