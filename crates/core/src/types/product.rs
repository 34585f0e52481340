//! Host catalog product types and relation references.
//!
//! The host platform tags every product with a type code (`simple`,
//! `configurable`, ...). Relation resolution only cares whether a product is a
//! leaf or can own children, so the type is narrowed to a [`ProductKind`] once,
//! at the boundary where host objects become [`ProductReference`]s.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::ProductId;

/// Errors that can occur when parsing a [`ProductType`] strictly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductTypeError {
    /// The input string is empty.
    #[error("product type cannot be empty")]
    Empty,
    /// The type code is not one the host catalog defines.
    #[error("unknown product type: {0}")]
    Unknown(String),
}

/// Product type code as stored by the host catalog.
///
/// Deserialization is lenient: unrecognized codes become [`ProductType::Other`]
/// so that a single odd product never fails a whole export. Use
/// [`str::parse`] for strict parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    Simple,
    Virtual,
    Downloadable,
    Configurable,
    Grouped,
    Bundle,
    /// A type code this crate does not know, kept verbatim.
    Other(String),
}

/// How a product participates in relation resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    /// Leaf product; its own ID is the export UID.
    Simple,
    /// Parent-bearing product; the export UID needs a parent lookup.
    Composite,
}

impl ProductType {
    /// Classify this type for relation resolution.
    ///
    /// Only `simple`, `configurable` and `grouped` products are supported.
    /// Every other type returns `None` and is excluded from relation exports.
    #[must_use]
    pub const fn kind(&self) -> Option<ProductKind> {
        match self {
            Self::Simple => Some(ProductKind::Simple),
            Self::Configurable | Self::Grouped => Some(ProductKind::Composite),
            Self::Virtual | Self::Downloadable | Self::Bundle | Self::Other(_) => None,
        }
    }

    /// Returns the host type code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Simple => "simple",
            Self::Virtual => "virtual",
            Self::Downloadable => "downloadable",
            Self::Configurable => "configurable",
            Self::Grouped => "grouped",
            Self::Bundle => "bundle",
            Self::Other(code) => code,
        }
    }

    fn known(s: &str) -> Option<Self> {
        match s {
            "simple" => Some(Self::Simple),
            "virtual" => Some(Self::Virtual),
            "downloadable" => Some(Self::Downloadable),
            "configurable" => Some(Self::Configurable),
            "grouped" => Some(Self::Grouped),
            "bundle" => Some(Self::Bundle),
            _ => None,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = ProductTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ProductTypeError::Empty);
        }
        Self::known(s).ok_or_else(|| ProductTypeError::Unknown(s.to_owned()))
    }
}

impl From<String> for ProductType {
    fn from(s: String) -> Self {
        Self::known(&s).unwrap_or(Self::Other(s))
    }
}

impl From<ProductType> for String {
    fn from(t: ProductType) -> Self {
        match t {
            ProductType::Other(code) => code,
            known => known.as_str().to_owned(),
        }
    }
}

/// A candidate related product, as handed over by the host catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductReference {
    /// Catalog entity ID.
    pub id: ProductId,
    /// Host type code.
    #[serde(rename = "type_id")]
    pub product_type: ProductType,
}

impl ProductReference {
    /// Create a new reference.
    #[must_use]
    pub const fn new(id: ProductId, product_type: ProductType) -> Self {
        Self { id, product_type }
    }

    /// Shorthand for a `simple` product reference.
    #[must_use]
    pub const fn simple(id: i64) -> Self {
        Self::new(ProductId::new(id), ProductType::Simple)
    }

    /// Shorthand for a `configurable` product reference.
    #[must_use]
    pub const fn configurable(id: i64) -> Self {
        Self::new(ProductId::new(id), ProductType::Configurable)
    }

    /// Shorthand for a `grouped` product reference.
    #[must_use]
    pub const fn grouped(id: i64) -> Self {
        Self::new(ProductId::new(id), ProductType::Grouped)
    }

    /// Relation kind of the referenced product, `None` if its type is unsupported.
    #[must_use]
    pub const fn kind(&self) -> Option<ProductKind> {
        self.product_type.kind()
    }
}
