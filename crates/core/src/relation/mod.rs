//! Product relation export: classifiers, export UIDs, and the resolver.
//!
//! A product export tags each product with three link lists (cross-sell,
//! upsell, related). Links to simple products export the bare product ID;
//! links to composite products export `"{parent}-{product}"` once the parent
//! is known, falling back to the bare ID otherwise.

mod classifier;
mod resolver;
mod uid;

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

pub use classifier::Classifier;
pub use resolver::RelationResolver;
pub use uid::ResolvedUid;

/// One row of the batch parent lookup.
///
/// IDs may arrive as integers or numeric strings, as host catalog exports mix
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationRow {
    /// The product whose parent was looked up.
    pub product_id: ProductId,
    /// Its parent product.
    pub parent_id: ProductId,
}

impl RelationRow {
    /// Create a new row.
    #[must_use]
    pub const fn new(product_id: ProductId, parent_id: ProductId) -> Self {
        Self {
            product_id,
            parent_id,
        }
    }
}

/// Export-ready relation lists for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRelations {
    /// Cross-sell UIDs.
    pub cross_sell_ids: Vec<String>,
    /// Upsell UIDs.
    pub upsell_ids: Vec<String>,
    /// Related-product UIDs.
    pub related_ids: Vec<String>,
}

impl ProductRelations {
    /// Returns `true` if no list has any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cross_sell_ids.is_empty() && self.upsell_ids.is_empty() && self.related_ids.is_empty()
    }
}
