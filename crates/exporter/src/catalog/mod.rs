//! Catalog stores that answer parent lookups for composite products.
//!
//! # Architecture
//!
//! The relation exporter only needs one question answered: which parent does
//! each of these products belong to? [`CatalogLookup`] is that seam. Stores
//! return rows in their natural order; the resolver keeps the first row per
//! product, so a store without a stable order yields an unspecified parent
//! when a product has several.
//!
//! # Stores
//!
//! - [`InMemoryCatalog`] - Rows held in memory, optionally loaded from JSON
//! - `PgCatalog` - `PostgreSQL` relation table (with `postgres` feature)

mod memory;
#[cfg(feature = "postgres")]
mod postgres;

use mcommerce_export_core::{ProductId, RelationRow};
use thiserror::Error;

pub use memory::InMemoryCatalog;
#[cfg(feature = "postgres")]
pub use postgres::{PgCatalog, create_pool};

/// Errors that can occur when querying a catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Database error from sqlx.
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// IO error (file read).
    #[error("IO error: {0}")]
    Io(String),

    /// Relation rows could not be parsed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of parent rows for composite products.
pub trait CatalogLookup {
    /// Fetch `(product_id, parent_id)` rows for the given products.
    ///
    /// Products without a parent simply have no row. Rows for products that
    /// were not asked for are tolerated.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the store cannot be queried.
    fn parent_rows(
        &self,
        product_ids: &[ProductId],
    ) -> impl Future<Output = Result<Vec<RelationRow>, CatalogError>> + Send;
}
