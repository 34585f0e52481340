//! Relation classifiers.

use serde::{Deserialize, Serialize};

/// The relation category a product reference is listed under.
///
/// A product may be listed under several classifiers at once; each
/// membership is resolved independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classifier {
    CrossSell,
    Upsell,
    Related,
}

impl Classifier {
    /// Every classifier, in resolution order.
    pub const ALL: [Self; 3] = [Self::CrossSell, Self::Upsell, Self::Related];
}

impl std::fmt::Display for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CrossSell => write!(f, "cross_sell"),
            Self::Upsell => write!(f, "upsell"),
            Self::Related => write!(f, "related"),
        }
    }
}

impl std::str::FromStr for Classifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cross_sell" => Ok(Self::CrossSell),
            "upsell" => Ok(Self::Upsell),
            "related" => Ok(Self::Related),
            _ => Err(format!("invalid relation classifier: {s}")),
        }
    }
}
