//! Store settings DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::StoreSettings;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1))]
    pub store_name: String,
    pub phone: String,
    pub logo_url: String,
}

impl From<UpdateSettingsRequest> for StoreSettings {
    fn from(req: UpdateSettingsRequest) -> Self {
        StoreSettings {
            store_name: req.store_name,
            phone: req.phone,
            logo_url: req.logo_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub store_name: String,
    pub phone: String,
    pub logo_url: String,
}

impl From<StoreSettings> for SettingsResponse {
    fn from(settings: StoreSettings) -> Self {
        Self {
            store_name: settings.store_name,
            phone: settings.phone,
            logo_url: settings.logo_url,
        }
    }
}
