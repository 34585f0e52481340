//! Core types for catalog export.
//!
//! This module provides type-safe wrappers for catalog domain concepts.

pub mod id;
pub mod product;

pub use id::*;
pub use product::{ProductKind, ProductReference, ProductType, ProductTypeError};
