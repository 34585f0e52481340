//! Mobile-commerce export core - shared types and relation resolution.
//!
//! This crate provides the types used by every export component:
//! - `exporter` - Catalog lookups and the relation export driver
//! - `cli` - Command-line front end for offline and database-backed exports
//!
//! # Architecture
//!
//! The core crate contains only types and pure transformations - no I/O, no
//! database access, no HTTP clients. The relation resolver works on
//! caller-supplied in-memory data and never fails.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and host product type classification
//! - [`relation`] - Relation classifiers, export UIDs, and [`RelationResolver`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod relation;
pub mod types;

pub use relation::*;
pub use types::*;
