//! Catalog Domain - Product master data
//!
//! Products are simple `{id, name, price}` records. Invoice line items
//! snapshot name and price at creation time, so later catalog edits never
//! retroactively alter historical invoices - the catalog carries no other
//! business rules.

pub mod product;
pub mod ports;
pub mod error;

pub use product::Product;
pub use ports::ProductStore;
pub use error::CatalogError;
