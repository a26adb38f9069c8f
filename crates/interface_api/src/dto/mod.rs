//! Request/Response data transfer objects
//!
//! Explicit wire types with validation, deserialized before any side effect.

pub mod auth;
pub mod invoice;
pub mod product;
pub mod settings;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Query for bulk deletes: `?id=a,b,c`
#[derive(Debug, Deserialize)]
pub struct IdListQuery {
    pub id: String,
}

impl IdListQuery {
    /// Parses the comma-separated id list, rejecting malformed entries
    pub fn parse_ids<T: FromStr>(&self) -> Result<Vec<T>, ApiError> {
        self.id
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse()
                    .map_err(|_| ApiError::InvalidInput(format!("malformed id: {s}")))
            })
            .collect()
    }
}

/// Response for bulk deletes
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}
