//! Relation export driver.
//!
//! Runs one product's relation references through [`RelationResolver`]:
//! simple products resolve at once, composite products are looked up in the
//! catalog in batches, and whatever is left either degrades to a direct link
//! or is discarded, depending on [`RelationSettings::direct_link_fallback`].

use std::path::Path;

use mcommerce_export_core::{ProductId, ProductReference, ProductRelations, RelationResolver};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::catalog::CatalogLookup;
use crate::config::RelationSettings;
use crate::error::{ExportError, Result};

/// Relation references of one exported product.
///
/// ## JSON Format
///
/// ```json
/// {
///   "cross_sell": [{ "id": 1, "type_id": "simple" }],
///   "upsell": [{ "id": 2, "type_id": "configurable" }],
///   "related": []
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub cross_sell: Vec<ProductReference>,
    #[serde(default)]
    pub upsell: Vec<ProductReference>,
    #[serde(default)]
    pub related: Vec<ProductReference>,
}

impl ExportRequest {
    /// Load a request from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Io` if the file cannot be read and
    /// `ExportError::Parse` if it is not a valid request.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ExportError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Total number of references across all classifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cross_sell.len() + self.upsell.len() + self.related.len()
    }

    /// Returns `true` if the request holds no references.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one relation export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationExport {
    /// Export-ready relation lists.
    pub relations: ProductRelations,
    /// References dropped for an unsupported product type.
    pub dropped_references: usize,
    /// Number of catalog lookups issued.
    pub lookup_batches: usize,
    /// UIDs exported under their bare ID because no parent was found.
    pub direct_fallbacks: usize,
    /// Products left out because no parent was found and fallback is off.
    pub discarded: Vec<ProductId>,
}

/// Resolves relation references against a catalog store.
#[derive(Debug, Clone)]
pub struct RelationExporter<C> {
    catalog: C,
    settings: RelationSettings,
}

impl<C: CatalogLookup> RelationExporter<C> {
    /// Create a new exporter.
    #[must_use]
    pub const fn new(catalog: C, settings: RelationSettings) -> Self {
        Self { catalog, settings }
    }

    /// The underlying catalog store.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Export the relations of one product.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Catalog` if a parent lookup fails. No partial
    /// result is returned in that case.
    #[instrument(
        skip(self, request),
        fields(
            cross_sell = request.cross_sell.len(),
            upsell = request.upsell.len(),
            related = request.related.len(),
        )
    )]
    pub async fn export(&self, request: &ExportRequest) -> Result<RelationExport> {
        let mut resolver =
            RelationResolver::new(&request.cross_sell, &request.upsell, &request.related);

        let dropped_references = resolver.dropped_references();
        if dropped_references > 0 {
            warn!(
                dropped = dropped_references,
                "Skipped relation references with unsupported product types"
            );
        }

        let mut lookup_batches = 0;
        if resolver.has_unprocessed_relations() {
            let pending = resolver.unprocessed_relation_ids();
            for batch in pending.chunks(self.settings.lookup_batch_size.get()) {
                let rows = self.catalog.parent_rows(batch).await?;
                debug!(
                    batch = lookup_batches,
                    products = batch.len(),
                    rows = rows.len(),
                    "Processed parent lookup batch"
                );
                resolver.process_relations(&rows);
                lookup_batches += 1;
            }
        }

        let (direct_fallbacks, discarded) = if self.settings.direct_link_fallback {
            (resolver.process_remaining_relations_as_direct_links(), Vec::new())
        } else {
            let discarded = resolver.discard_unprocessed_relations();
            if !discarded.is_empty() {
                warn!(
                    products = ?discarded,
                    "Left out composite relations without a parent"
                );
            }
            (0, discarded)
        };

        let relations = resolver.into_relations();
        info!(
            cross_sell = relations.cross_sell_ids.len(),
            upsell = relations.upsell_ids.len(),
            related = relations.related_ids.len(),
            lookup_batches,
            direct_fallbacks,
            "Relation export complete"
        );

        Ok(RelationExport {
            relations,
            dropped_references,
            lookup_batches,
            direct_fallbacks,
            discarded,
        })
    }
}
