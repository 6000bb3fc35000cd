//! Fixed catalog of tree species and their price tables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tree species available on a lot. Declaration order is the catalog order;
/// ordered maps keyed by `Species` iterate in this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    #[default]
    Pine,
    Spruce,
    Oak,
    Birch,
    Beech,
}

/// Catalog order used everywhere units are enumerated or drawn down.
pub const SPECIES_ORDER: [Species; 5] = [
    Species::Pine,
    Species::Spruce,
    Species::Oak,
    Species::Birch,
    Species::Beech,
];

impl Species {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pine => "pine",
            Self::Spruce => "spruce",
            Self::Oak => "oak",
            Self::Birch => "birch",
            Self::Beech => "beech",
        }
    }

    /// Gross market base price before any daily variation.
    #[must_use]
    pub const fn base_price(self) -> i64 {
        match self {
            Self::Pine => 20,
            Self::Spruce => 25,
            Self::Oak => 40,
            Self::Birch => 15,
            Self::Beech => 35,
        }
    }

    /// Heating value credited when a log is burned at home instead of sold.
    #[must_use]
    pub const fn fuel_value(self) -> i64 {
        match self {
            Self::Pine => 5,
            Self::Spruce => 7,
            Self::Oak => 10,
            Self::Birch => 4,
            Self::Beech => 9,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pine" => Ok(Self::Pine),
            "spruce" => Ok(Self::Spruce),
            "oak" => Ok(Self::Oak),
            "birch" => Ok(Self::Birch),
            "beech" => Ok(Self::Beech),
            _ => Err(()),
        }
    }
}
