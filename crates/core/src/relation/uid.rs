//! Export identifiers for relation targets.

use core::fmt;

use serde::{Serialize, Serializer};

use crate::types::ProductId;

/// The token placed in an exported relation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolvedUid {
    /// Bare product ID: simple products, or composites with no known parent.
    Direct(ProductId),
    /// Parent-qualified ID, rendered as `"{parent}-{product}"`.
    Composite {
        parent: ProductId,
        product: ProductId,
    },
}

impl ResolvedUid {
    /// Create a parent-qualified UID.
    #[must_use]
    pub const fn composite(parent: ProductId, product: ProductId) -> Self {
        Self::Composite { parent, product }
    }

    /// The product this UID points at, regardless of shape.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        match self {
            Self::Direct(product) | Self::Composite { product, .. } => *product,
        }
    }
}

impl fmt::Display for ResolvedUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(product) => write!(f, "{product}"),
            Self::Composite { parent, product } => write!(f, "{parent}-{product}"),
        }
    }
}

impl Serialize for ResolvedUid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
