//! Integration tests for the relation resolver lifecycle.
//!
//! These tests drive `RelationResolver` through its public API only:
//! construction, batch lookup rows, and direct-link finalization.

use mcommerce_export_core::{
    Classifier, ProductId, ProductReference, ProductType, RelationResolver, RelationRow,
};

fn row(product_id: i64, parent_id: i64) -> RelationRow {
    RelationRow::new(ProductId::new(product_id), ProductId::new(parent_id))
}

// =============================================================================
// Lifecycle Scenarios
// =============================================================================

#[test]
fn test_simple_cross_sell_and_composite_upsell() {
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
fn test_empty_lookup_then_direct_links() {
    let mut resolver = RelationResolver::new(
        &[ProductReference::simple(1)],
        &[ProductReference::configurable(2)],
        &[],
    );

    resolver.process_relations(&[]);
    resolver.process_remaining_relations_as_direct_links();

    assert_eq!(resolver.upsell_ids(), vec!["2"]);
    assert_eq!(resolver.cross_sell_ids(), vec!["1"]);
}

#[test]
fn test_shared_composite_resolves_under_each_classifier() {
    let mut resolver = RelationResolver::new(
        &[ProductReference::configurable(5)],
        &[],
        &[ProductReference::configurable(5)],
    );

    resolver.process_relations(&[row(5, 7)]);

    assert_eq!(resolver.cross_sell_ids(), vec!["7-5"]);
    assert_eq!(resolver.related_product_ids(), vec!["7-5"]);
    assert!(resolver.upsell_ids().is_empty());
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_simple_products_export_bare_id_in_every_list() {
    let references = [ProductReference::simple(11), ProductReference::simple(12)];
    let resolver = RelationResolver::new(&references, &references, &references);

    for classifier in Classifier::ALL {
        let ids: Vec<String> = resolver
            .uids(classifier)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(ids, vec!["11", "12"], "{classifier} should list both products");
    }
    assert!(!resolver.has_unprocessed_relations());
}

#[test]
fn test_upsell_and_related_membership_is_independent() {
    let mut resolver = RelationResolver::new(
        &[],
        &[ProductReference::grouped(3)],
        &[ProductReference::grouped(3), ProductReference::simple(4)],
    );

    resolver.process_remaining_relations_as_direct_links();

    assert_eq!(resolver.upsell_ids(), vec!["3"]);
    assert_eq!(resolver.related_product_ids(), vec!["4", "3"]);
}

#[test]
fn test_unsupported_types_never_surface() {
    let unsupported = [
        ProductReference::new(ProductId::new(20), ProductType::Virtual),
        ProductReference::new(ProductId::new(21), ProductType::Downloadable),
        ProductReference::new(ProductId::new(22), ProductType::Bundle),
    ];
    let mut resolver = RelationResolver::new(&unsupported, &unsupported, &unsupported);

    assert_eq!(resolver.dropped_references(), 9);
    assert!(!resolver.has_unprocessed_relations());
    assert!(resolver.unprocessed_relation_ids().is_empty());

    resolver.process_relations(&[row(20, 1), row(21, 1), row(22, 1)]);
    resolver.process_remaining_relations_as_direct_links();

    assert!(resolver.into_relations().is_empty());
}

#[test]
fn test_no_unprocessed_relations_after_finalization() {
    let mut resolver = RelationResolver::new(
        &[ProductReference::configurable(1), ProductReference::grouped(2)],
        &[ProductReference::configurable(3)],
        &[ProductReference::simple(4)],
    );

    resolver.process_relations(&[row(1, 100)]);
    assert!(resolver.has_unprocessed_relations());

    resolver.process_remaining_relations_as_direct_links();
    assert!(!resolver.has_unprocessed_relations());

    // A late batch must not add anything for already finalized relations.
    resolver.process_relations(&[row(2, 200), row(3, 300)]);

    assert_eq!(resolver.cross_sell_ids(), vec!["100-1", "2"]);
    assert_eq!(resolver.upsell_ids(), vec!["3"]);
    assert_eq!(resolver.related_product_ids(), vec!["4"]);
}
