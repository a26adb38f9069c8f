//! Infrastructure Database Layer
//!
//! PostgreSQL implementations of the storage ports defined by the domain
//! crates, following the repository pattern: each repository encapsulates
//! the SQL for one aggregate and maps rows to domain types.
//!
//! Queries are runtime-checked (`sqlx::query_as` + `bind`), so the workspace
//! builds without a live database; `DATABASE_URL` is only needed at run
//! time. Migrations are embedded from the workspace `migrations/` directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool_from_url, InvoiceRepository};
//!
//! let pool = create_pool_from_url("postgres://localhost/storefront").await?;
//! let invoices = InvoiceRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use repositories::{
    CounterRepository, InvoiceRepository, ProductRepository, SettingsRepository, UserRepository,
};

/// Embedded workspace migrations; applied at server startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
