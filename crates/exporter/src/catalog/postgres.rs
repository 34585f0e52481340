//! `PostgreSQL` catalog store.
//!
//! Reads the host catalog's `catalog_product_relation` table, which links
//! each child product to the composite products that contain it.

use std::time::Duration;

use mcommerce_export_core::{ProductId, RelationRow};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::{debug, instrument};

use super::{CatalogError, CatalogLookup};

// No ORDER BY: the first parent per product is whatever the store returns first.
// IDs are widened to BIGINT so unsigned 32-bit entity IDs fit.
const PARENT_ROWS_QUERY: &str = r"
    SELECT child_id::BIGINT AS product_id, parent_id::BIGINT AS parent_id
    FROM catalog_product_relation
    WHERE child_id::BIGINT = ANY($1)
";

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Catalog store backed by the host catalog database.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a catalog store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CatalogLookup for PgCatalog {
    #[instrument(skip(self, product_ids), fields(products = product_ids.len()))]
    async fn parent_rows(&self, product_ids: &[ProductId]) -> Result<Vec<RelationRow>, CatalogError> {
        let ids: Vec<i64> = product_ids.iter().map(ProductId::as_i64).collect();

        let rows: Vec<(ProductId, ProductId)> = sqlx::query_as(PARENT_ROWS_QUERY)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        debug!(rows = rows.len(), "Fetched parent rows");

        Ok(rows
            .into_iter()
            .map(|(product_id, parent_id)| RelationRow::new(product_id, parent_id))
            .collect())
    }
}
