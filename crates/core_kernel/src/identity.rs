//! Identity and role context
//!
//! Credential checks happen at the API boundary; the core only ever sees an
//! already-validated [`Role`]. Privileged operations (bulk delete) take the
//! role as a plain parameter and refuse non-admin callers.
//!
//! The user and store-settings records live here rather than in a domain
//! crate of their own: they are boundary collaborators with no business
//! rules beyond storage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::identifiers::UserId;

/// Caller role attached to every authenticated request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    /// Authorization predicate for privileged operations
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// A stored user account
///
/// The password hash is an argon2 PHC string; it never leaves the boundary
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
}

/// Singleton store profile shown on printed invoices
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub store_name: String,
    pub phone: String,
    pub logo_url: String,
}

/// Storage port for user accounts
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn insert(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Number of stored accounts; drives first-run admin seeding
    async fn count(&self) -> Result<u64, StoreError>;
}

/// Storage port for the store-settings singleton
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self) -> Result<Option<StoreSettings>, StoreError>;

    /// Creates or overwrites the singleton row
    async fn upsert(&self, settings: &StoreSettings) -> Result<(), StoreError>;
}
