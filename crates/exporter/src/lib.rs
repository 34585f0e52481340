//! Mobile-commerce relation export.
//!
//! Drives the two-phase relation protocol of
//! [`RelationResolver`](mcommerce_export_core::RelationResolver) against a
//! catalog store:
//!
//! 1. Ingest cross-sell, upsell and related references
//! 2. Look up parents for composite products, in batches
//! 3. Export anything still unresolved as a direct link (configurable)
//!
//! # Modules
//!
//! - [`catalog`] - The [`CatalogLookup`] seam with in-memory and `PostgreSQL` stores
//! - [`config`] - Environment-driven configuration
//! - [`relations`] - [`RelationExporter`] and its request/report types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
mod error;
pub mod relations;

pub use catalog::{CatalogError, CatalogLookup, InMemoryCatalog};
pub use config::{ConfigError, ExportConfig, RelationSettings};
pub use error::{ExportError, Result};
pub use relations::{ExportRequest, RelationExport, RelationExporter};

#[cfg(feature = "postgres")]
pub use catalog::PgCatalog;
