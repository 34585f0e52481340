//! In-memory catalog store.

use std::collections::HashSet;
use std::path::Path;

use mcommerce_export_core::{ProductId, RelationRow};
use tracing::{debug, instrument};

use super::{CatalogError, CatalogLookup};

/// Parent rows held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    rows: Vec<RelationRow>,
}

impl InMemoryCatalog {
    /// Create a catalog from rows.
    #[must_use]
    pub const fn new(rows: Vec<RelationRow>) -> Self {
        Self { rows }
    }

    /// Load rows from a JSON file.
    ///
    /// The file holds an array of `{"product_id": .., "parent_id": ..}` objects.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read and
    /// `CatalogError::Parse` if it is not a valid row array.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let rows: Vec<RelationRow> = serde_json::from_str(&content)?;
        debug!(rows = rows.len(), "Loaded relation rows");

        Ok(Self::new(rows))
    }

    /// Append a row.
    pub fn push(&mut self, row: RelationRow) {
        self.rows.push(row);
    }

    /// Number of rows held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no rows are held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl CatalogLookup for InMemoryCatalog {
    async fn parent_rows(&self, product_ids: &[ProductId]) -> Result<Vec<RelationRow>, CatalogError> {
        let wanted: HashSet<&ProductId> = product_ids.iter().collect();
        Ok(self
            .rows
            .iter()
            .filter(|row| wanted.contains(&row.product_id))
            .copied()
            .collect())
    }
}
