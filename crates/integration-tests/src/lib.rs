//! Integration tests for mobile-commerce export.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mcommerce-export-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `relation_resolution` - Resolver lifecycle through the public API
//! - `relation_export` - Export driver over JSON fixtures and file-backed stores
//!
//! The helpers below build requests and stores from `serde_json::json!`
//! fixtures, the same shapes the CLI reads from disk.

use mcommerce_export::{ExportRequest, InMemoryCatalog};
use mcommerce_export_core::RelationRow;

/// Build an export request from a JSON fixture.
///
/// # Panics
///
/// Panics if the fixture does not match the request shape.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn request(fixture: serde_json::Value) -> ExportRequest {
    serde_json::from_value(fixture).expect("fixture is not a valid export request")
}

/// Build an in-memory catalog from a JSON array of parent rows.
///
/// # Panics
///
/// Panics if the fixture is not an array of `product_id`/`parent_id` rows.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn catalog(fixture: serde_json::Value) -> InMemoryCatalog {
    let rows: Vec<RelationRow> =
        serde_json::from_value(fixture).expect("fixture is not a valid row array");
    InMemoryCatalog::new(rows)
}
