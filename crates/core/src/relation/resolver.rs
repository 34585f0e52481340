//! Two-phase product relation resolver.
//!
//! # Lifecycle
//!
//! Every `(product, classifier)` pair moves through at most one transition:
//!
//! - `Pending -> Resolved` when a lookup row names its parent
//!   ([`RelationResolver::process_relations`])
//! - `Pending -> DirectFallback` when no parent ever turned up
//!   ([`RelationResolver::process_remaining_relations_as_direct_links`])
//!
//! Simple products skip the pending state and resolve at construction.
//!
//! # Example
//!
//! ```rust
//! use mcommerce_export_core::{ProductId, ProductReference, RelationResolver, RelationRow};
//!
//! let mut resolver = RelationResolver::new(
//!     &[ProductReference::simple(1)],
//!     &[ProductReference::configurable(2)],
//!     &[],
//! );
//! assert_eq!(resolver.unprocessed_relation_ids(), vec![ProductId::new(2)]);
//!
//! resolver.process_relations(&[RelationRow::new(ProductId::new(2), ProductId::new(9))]);
//! assert_eq!(resolver.cross_sell_ids(), vec!["1"]);
//! assert_eq!(resolver.upsell_ids(), vec!["9-2"]);
//! assert!(!resolver.has_unprocessed_relations());
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::types::{ProductId, ProductKind, ProductReference};

use super::{Classifier, ProductRelations, RelationRow, ResolvedUid};

/// A relation instance: one product listed under one classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct RelationKey {
    product_id: ProductId,
    classifier: Classifier,
}

impl RelationKey {
    const fn new(product_id: ProductId, classifier: Classifier) -> Self {
        Self {
            product_id,
            classifier,
        }
    }
}

/// Resolves cross-sell, upsell and related references into export UIDs.
///
/// Not meant to be shared: build one resolver per export.
#[derive(Debug, Clone)]
pub struct RelationResolver {
    membership: HashMap<ProductId, BTreeSet<Classifier>>,
    /// Admitted products in first-appearance order.
    order: Vec<ProductId>,
    pending: BTreeSet<RelationKey>,
    results: BTreeMap<Classifier, Vec<ResolvedUid>>,
    dropped: usize,
}

impl RelationResolver {
    /// Ingest the three reference lists.
    ///
    /// Simple products are resolved immediately; composite products are held
    /// pending until [`process_relations`](Self::process_relations) gets their
    /// parent rows. References with an unsupported product type are dropped and
    /// only counted (see [`dropped_references`](Self::dropped_references)).
    ///
    /// When the same product appears more than once under one classifier, the
    /// first occurrence decides how it resolves.
    #[must_use]
    pub fn new(
        cross_sell: &[ProductReference],
        upsell: &[ProductReference],
        related: &[ProductReference],
    ) -> Self {
        let mut membership: HashMap<ProductId, BTreeSet<Classifier>> = HashMap::new();
        let mut pending = BTreeSet::new();
        let mut direct = HashSet::new();
        let mut relation_ids = Vec::new();
        let mut seen = HashSet::new();
        let mut dropped = 0;

        let lists = [
            (Classifier::CrossSell, cross_sell),
            (Classifier::Upsell, upsell),
            (Classifier::Related, related),
        ];

        for (classifier, references) in lists {
            for reference in references {
                let Some(kind) = reference.kind() else {
                    dropped += 1;
                    continue;
                };

                membership
                    .entry(reference.id)
                    .or_default()
                    .insert(classifier);
                if seen.insert(reference.id) {
                    relation_ids.push(reference.id);
                }

                let key = RelationKey::new(reference.id, classifier);
                if direct.contains(&key) || pending.contains(&key) {
                    continue;
                }
                match kind {
                    ProductKind::Simple => {
                        direct.insert(key);
                    }
                    ProductKind::Composite => {
                        pending.insert(key);
                    }
                }
            }
        }

        let results: BTreeMap<Classifier, Vec<ResolvedUid>> = Classifier::ALL
            .into_iter()
            .map(|classifier| {
                let uids: Vec<ResolvedUid> = relation_ids
                    .iter()
                    .filter(|id| direct.contains(&RelationKey::new(**id, classifier)))
                    .map(|id| ResolvedUid::Direct(*id))
                    .collect();
                (classifier, uids)
            })
            .collect();

        Self {
            membership,
            order: relation_ids,
            pending,
            results,
            dropped,
        }
    }

    /// Resolved cross-sell UIDs so far.
    #[must_use]
    pub fn cross_sell_ids(&self) -> Vec<String> {
        self.ids(Classifier::CrossSell)
    }

    /// Resolved upsell UIDs so far.
    #[must_use]
    pub fn upsell_ids(&self) -> Vec<String> {
        self.ids(Classifier::Upsell)
    }

    /// Resolved related-product UIDs so far.
    #[must_use]
    pub fn related_product_ids(&self) -> Vec<String> {
        self.ids(Classifier::Related)
    }

    /// Resolved UIDs for one classifier, in emission order.
    #[must_use]
    pub fn uids(&self, classifier: Classifier) -> &[ResolvedUid] {
        self.results
            .get(&classifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Classifiers the product was listed under, empty if it was never admitted.
    pub fn classifiers(&self, product_id: ProductId) -> impl Iterator<Item = Classifier> + '_ {
        self.membership
            .get(&product_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of references dropped for having an unsupported product type.
    #[must_use]
    pub const fn dropped_references(&self) -> usize {
        self.dropped
    }

    /// Resolve pending composites from a batch of parent lookup rows.
    ///
    /// Only the first row per product counts. Rows for products that are not
    /// pending under a classifier are ignored for that classifier, so feeding
    /// overlapping batches never emits a second UID for the same relation.
    pub fn process_relations(&mut self, rows: &[RelationRow]) {
        if rows.is_empty() {
            return;
        }

        for classifier in Classifier::ALL {
            let mut matched = HashSet::new();
            let resolved: Vec<ResolvedUid> = rows
                .iter()
                .filter(|row| {
                    self.pending
                        .contains(&RelationKey::new(row.product_id, classifier))
                })
                .filter(|row| matched.insert(row.product_id))
                .map(|row| ResolvedUid::composite(row.parent_id, row.product_id))
                .collect();

            for uid in &resolved {
                self.pending
                    .remove(&RelationKey::new(uid.product_id(), classifier));
            }
            self.results.entry(classifier).or_default().extend(resolved);
        }
    }

    /// Returns `true` while some composite relation still awaits its parent.
    #[must_use]
    pub fn has_unprocessed_relations(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Distinct product IDs still awaiting a parent lookup, ascending.
    #[must_use]
    pub fn unprocessed_relation_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = self.pending.iter().map(|key| key.product_id).collect();
        ids.dedup();
        ids
    }

    /// Export every still-pending relation under its bare product ID.
    ///
    /// UIDs are appended in the order products first appeared in the input
    /// lists. Clears the pending set and returns the number of UIDs emitted.
    pub fn process_remaining_relations_as_direct_links(&mut self) -> usize {
        let mut emitted = 0;
        for product_id in &self.order {
            let Some(classifiers) = self.membership.get(product_id) else {
                continue;
            };
            for &classifier in classifiers {
                if self.pending.remove(&RelationKey::new(*product_id, classifier)) {
                    self.results
                        .entry(classifier)
                        .or_default()
                        .push(ResolvedUid::Direct(*product_id));
                    emitted += 1;
                }
            }
        }
        self.pending.clear();
        emitted
    }

    /// Give up on still-pending relations without exporting them.
    ///
    /// Returns the product IDs that were discarded.
    pub fn discard_unprocessed_relations(&mut self) -> Vec<ProductId> {
        let ids = self.unprocessed_relation_ids();
        self.pending.clear();
        ids
    }

    /// Consume the resolver into export-ready lists.
    #[must_use]
    pub fn into_relations(self) -> ProductRelations {
        ProductRelations {
            cross_sell_ids: self.cross_sell_ids(),
            upsell_ids: self.upsell_ids(),
            related_ids: self.related_product_ids(),
        }
    }

    fn ids(&self, classifier: Classifier) -> Vec<String> {
        self.uids(classifier)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProductType;

    fn row(product_id: i64, parent_id: i64) -> RelationRow {
        RelationRow::new(ProductId::new(product_id), ProductId::new(parent_id))
    }

    fn unsupported(id: i64) -> ProductReference {
        ProductReference::new(ProductId::new(id), ProductType::Bundle)
    }

    #[test]
    fn test_simple_resolves_at_construction() {
        let resolver = RelationResolver::new(
            &[ProductReference::simple(1)],
            &[ProductReference::simple(1)],
            &[ProductReference::simple(3)],
        );

        assert_eq!(resolver.cross_sell_ids(), vec!["1"]);
        assert_eq!(resolver.upsell_ids(), vec!["1"]);
        assert_eq!(resolver.related_product_ids(), vec!["3"]);
        assert!(!resolver.has_unprocessed_relations());
        assert!(resolver.unprocessed_relation_ids().is_empty());
    }

    #[test]
    fn test_composite_pending_then_resolved() {
        let mut resolver = RelationResolver::new(
            &[ProductReference::simple(1)],
            &[ProductReference::configurable(2)],
            &[],
        );

        assert_eq!(resolver.cross_sell_ids(), vec!["1"]);
        assert!(resolver.upsell_ids().is_empty());
        assert!(resolver.has_unprocessed_relations());
        assert_eq!(resolver.unprocessed_relation_ids(), vec![ProductId::new(2)]);

        resolver.process_relations(&[row(2, 9)]);

        assert_eq!(resolver.upsell_ids(), vec!["9-2"]);
        assert!(!resolver.has_unprocessed_relations());
    }

    #[test]
    fn test_empty_rows_then_direct_fallback() {
        let mut resolver = RelationResolver::new(
            &[ProductReference::simple(1)],
            &[ProductReference::configurable(2)],
            &[],
        );

        resolver.process_relations(&[]);
        assert!(resolver.has_unprocessed_relations());

        let emitted = resolver.process_remaining_relations_as_direct_links();

        assert_eq!(emitted, 1);
        assert_eq!(resolver.upsell_ids(), vec!["2"]);
        assert!(!resolver.has_unprocessed_relations());
    }

    #[test]
    fn test_composite_under_two_classifiers_resolves_in_both() {
        let mut resolver = RelationResolver::new(
            &[ProductReference::grouped(5)],
            &[],
            &[ProductReference::grouped(5)],
        );

        assert_eq!(resolver.unprocessed_relation_ids(), vec![ProductId::new(5)]);

        resolver.process_relations(&[row(5, 7)]);

        assert_eq!(resolver.cross_sell_ids(), vec!["7-5"]);
        assert!(resolver.upsell_ids().is_empty());
        assert_eq!(resolver.related_product_ids(), vec!["7-5"]);
    }

    #[test]
    fn test_first_row_wins_per_product() {
        let mut resolver =
            RelationResolver::new(&[], &[ProductReference::configurable(4)], &[]);

        resolver.process_relations(&[row(4, 10), row(4, 11)]);

        assert_eq!(resolver.upsell_ids(), vec!["10-4"]);
    }

    #[test]
    fn test_overlapping_batches_do_not_double_emit() {
        let mut resolver = RelationResolver::new(
            &[ProductReference::configurable(4)],
            &[],
            &[ProductReference::configurable(6)],
        );

        resolver.process_relations(&[row(4, 10)]);
        resolver.process_relations(&[row(4, 12), row(6, 20)]);

        assert_eq!(resolver.cross_sell_ids(), vec!["10-4"]);
        assert_eq!(resolver.related_product_ids(), vec!["20-6"]);
    }

    #[test]
    fn test_rows_for_unknown_products_are_ignored() {
        let mut resolver =
            RelationResolver::new(&[ProductReference::simple(1)], &[], &[]);

        resolver.process_relations(&[row(1, 9), row(99, 9)]);

        assert_eq!(resolver.cross_sell_ids(), vec!["1"]);
        assert!(resolver.upsell_ids().is_empty());
        assert!(resolver.related_product_ids().is_empty());
    }

    #[test]
    fn test_unsupported_types_are_dropped_everywhere() {
        let mut resolver = RelationResolver::new(
            &[unsupported(8)],
            &[unsupported(8), ProductReference::simple(1)],
            &[ProductReference::new(
                ProductId::new(9),
                ProductType::Other("giftcard".to_string()),
            )],
        );

        assert_eq!(resolver.dropped_references(), 3);
        assert!(resolver.unprocessed_relation_ids().is_empty());
        assert_eq!(resolver.classifiers(ProductId::new(8)).count(), 0);

        resolver.process_relations(&[row(8, 2)]);
        resolver.process_remaining_relations_as_direct_links();

        let relations = resolver.into_relations();
        assert!(relations.cross_sell_ids.is_empty());
        assert_eq!(relations.upsell_ids, vec!["1"]);
        assert!(relations.related_ids.is_empty());
    }

    #[test]
    fn test_duplicate_references_emit_once() {
        let resolver = RelationResolver::new(
            &[
                ProductReference::simple(1),
                ProductReference::simple(2),
                ProductReference::simple(1),
            ],
            &[],
            &[],
        );

        assert_eq!(resolver.cross_sell_ids(), vec!["1", "2"]);
    }

    #[test]
    fn test_first_occurrence_decides_kind_per_classifier() {
        let mut resolver = RelationResolver::new(
            &[ProductReference::simple(3), ProductReference::configurable(3)],
            &[ProductReference::configurable(3)],
            &[],
        );

        assert_eq!(resolver.cross_sell_ids(), vec!["3"]);
        assert!(resolver.has_unprocessed_relations());

        resolver.process_relations(&[row(3, 30)]);

        assert_eq!(resolver.cross_sell_ids(), vec!["3"]);
        assert_eq!(resolver.upsell_ids(), vec!["30-3"]);
    }

    #[test]
    fn test_direct_ids_follow_first_occurrence_order() {
        let resolver = RelationResolver::new(
            &[ProductReference::simple(1), ProductReference::simple(2)],
            &[ProductReference::simple(2), ProductReference::simple(1)],
            &[],
        );

        assert_eq!(resolver.upsell_ids(), vec!["1", "2"]);
    }

    #[test]
    fn test_fallback_only_for_unmatched_relations() {
        let mut resolver = RelationResolver::new(
            &[ProductReference::configurable(4), ProductReference::grouped(6)],
            &[ProductReference::grouped(6)],
            &[],
        );

        resolver.process_relations(&[row(4, 40)]);
        let emitted = resolver.process_remaining_relations_as_direct_links();

        assert_eq!(emitted, 2);
        assert_eq!(resolver.cross_sell_ids(), vec!["40-4", "6"]);
        assert_eq!(resolver.upsell_ids(), vec!["6"]);
        assert!(!resolver.has_unprocessed_relations());
    }

    #[test]
    fn test_direct_fallback_keeps_input_order() {
        let mut resolver = RelationResolver::new(
            &[ProductReference::grouped(9)],
            &[
                ProductReference::configurable(2),
                ProductReference::simple(5),
                ProductReference::configurable(1),
                ProductReference::grouped(9),
            ],
            &[],
        );
        assert_eq!(
            resolver.unprocessed_relation_ids(),
            vec![ProductId::new(1), ProductId::new(2), ProductId::new(9)]
        );

        resolver.process_remaining_relations_as_direct_links();

        assert_eq!(resolver.cross_sell_ids(), vec!["9"]);
        assert_eq!(resolver.upsell_ids(), vec!["5", "9", "2", "1"]);
    }

    #[test]
    fn test_discard_unprocessed_relations() {
        let mut resolver = RelationResolver::new(
            &[ProductReference::simple(1)],
            &[ProductReference::configurable(2)],
            &[ProductReference::configurable(2)],
        );

        let discarded = resolver.discard_unprocessed_relations();

        assert_eq!(discarded, vec![ProductId::new(2)]);
        assert!(!resolver.has_unprocessed_relations());
        assert!(resolver.upsell_ids().is_empty());
        assert_eq!(resolver.process_remaining_relations_as_direct_links(), 0);
    }

    #[test]
    fn test_classifiers_reports_membership() {
        let resolver = RelationResolver::new(
            &[ProductReference::grouped(5)],
            &[ProductReference::simple(5)],
            &[],
        );

        let classifiers: Vec<Classifier> = resolver.classifiers(ProductId::new(5)).collect();
        assert_eq!(classifiers, vec![Classifier::CrossSell, Classifier::Upsell]);
    }
}
