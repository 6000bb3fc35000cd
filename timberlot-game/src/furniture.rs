//! Furniture crafting catalog and the home placement grid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{HOME_GRID_HEIGHT, HOME_GRID_WIDTH};

/// Craftable furniture kinds with their log costs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum FurnitureKind {
    #[default]
    Table,
    Chair,
    Wardrobe,
    Bed,
}

/// All craftable kinds in display order.
pub const FURNITURE_ORDER: [FurnitureKind; 4] = [
    FurnitureKind::Table,
    FurnitureKind::Chair,
    FurnitureKind::Wardrobe,
    FurnitureKind::Bed,
];

impl FurnitureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Chair => "chair",
            Self::Wardrobe => "wardrobe",
            Self::Bed => "bed",
        }
    }

    /// Harvested logs consumed to craft one item.
    #[must_use]
    pub const fn craft_cost(self) -> u32 {
        match self {
            Self::Table => 3,
            Self::Chair => 2,
            Self::Wardrobe => 5,
            Self::Bed => 4,
        }
    }
}

impl fmt::Display for FurnitureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FurnitureKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(Self::Table),
            "chair" => Ok(Self::Chair),
            "wardrobe" => Ok(Self::Wardrobe),
            "bed" => Ok(Self::Bed),
            _ => Err(()),
        }
    }
}

/// One placed item and its grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: FurnitureKind,
    pub x: u8,
    pub y: u8,
}

/// The home: an ordered placement list on a 5x4 grid, at most one item per
/// cell, with a per-kind tally kept in sync on craft/remove/sell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Home {
    items: Vec<Placement>,
    counts: BTreeMap<FurnitureKind, u32>,
}

impl Home {
    #[must_use]
    pub fn items(&self) -> &[Placement] {
        &self.items
    }

    #[must_use]
    pub fn count(&self, kind: FurnitureKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Per-kind tallies in display order.
    pub fn counts(&self) -> impl Iterator<Item = (FurnitureKind, u32)> + '_ {
        self.counts.iter().map(|(k, c)| (*k, *c))
    }

    /// First unoccupied cell in row-major order, the only placement policy.
    #[must_use]
    pub fn find_free_cell(&self) -> Option<(u8, u8)> {
        for y in 0..HOME_GRID_HEIGHT {
            for x in 0..HOME_GRID_WIDTH {
                if !self.items.iter().any(|p| p.x == x && p.y == y) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Place a newly crafted item at the given cell and bump its tally.
    /// The caller resolves the cell via `find_free_cell` first.
    pub(crate) fn place_at(&mut self, kind: FurnitureKind, (x, y): (u8, u8)) {
        self.items.push(Placement { kind, x, y });
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Remove an item by list position, keeping the tally in sync. Returns
    /// the removed placement, or `None` for an out-of-range index.
    pub fn remove(&mut self, index: usize) -> Option<Placement> {
        if index >= self.items.len() {
            return None;
        }
        let placement = self.items.remove(index);
        if let Some(count) = self.counts.get_mut(&placement.kind) {
            *count = count.saturating_sub(1);
        }
        Some(placement)
    }

    /// Move an item to another cell if that cell is free. Returns whether the
    /// move happened.
    pub fn move_item(&mut self, index: usize, x: u8, y: u8) -> bool {
        if index >= self.items.len() || x >= HOME_GRID_WIDTH || y >= HOME_GRID_HEIGHT {
            return false;
        }
        let occupied = self
            .items
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && p.x == x && p.y == y);
        if occupied {
            return false;
        }
        self.items[index].x = x;
        self.items[index].y = y;
        true
    }
}
