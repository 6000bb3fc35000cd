//! Standing trees and harvested logs, tracked per species in catalog order.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{DAILY_REGROWTH_PER_SPECIES, STARTING_TREES_PER_SPECIES};
use crate::error::ActionError;
use crate::species::{SPECIES_ORDER, Species};

/// Per-species unit counts. Keys are fixed to the catalog; the maps are never
/// grown or shrunk after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    standing: BTreeMap<Species, u32>,
    harvested: BTreeMap<Species, u32>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_standing(STARTING_TREES_PER_SPECIES)
    }
}

impl Inventory {
    /// Build an inventory with `count` standing units of every species and
    /// empty harvested stock.
    #[must_use]
    pub fn with_standing(count: u32) -> Self {
        Self {
            standing: SPECIES_ORDER.iter().map(|s| (*s, count)).collect(),
            harvested: SPECIES_ORDER.iter().map(|s| (*s, 0)).collect(),
        }
    }

    #[must_use]
    pub fn standing(&self, species: Species) -> u32 {
        self.standing.get(&species).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn harvested(&self, species: Species) -> u32 {
        self.harvested.get(&species).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_standing(&self) -> u32 {
        self.standing.values().sum()
    }

    #[must_use]
    pub fn total_harvested(&self) -> u32 {
        self.harvested.values().sum()
    }

    /// Iterate harvested counts in catalog order.
    pub fn harvested_counts(&self) -> impl Iterator<Item = (Species, u32)> + '_ {
        self.harvested.iter().map(|(s, c)| (*s, *c))
    }

    /// Iterate standing counts in catalog order.
    pub fn standing_counts(&self) -> impl Iterator<Item = (Species, u32)> + '_ {
        self.standing.iter().map(|(s, c)| (*s, *c))
    }

    /// Fell one standing unit into harvested stock. Yield is fixed at one log.
    ///
    /// # Errors
    ///
    /// Returns `NothingToHarvest` when no standing unit of the species is
    /// left; inventory unchanged.
    pub fn harvest(&mut self, species: Species) -> Result<(), ActionError> {
        let count = self.standing.entry(species).or_insert(0);
        if *count == 0 {
            return Err(ActionError::NothingToHarvest);
        }
        *count -= 1;
        *self.harvested.entry(species).or_insert(0) += 1;
        Ok(())
    }

    /// Remove `count` harvested units of one species.
    ///
    /// # Errors
    ///
    /// Returns `NothingToSell` when stock is short; inventory unchanged.
    pub fn remove_harvested(&mut self, species: Species, count: u32) -> Result<(), ActionError> {
        let held = self.harvested.entry(species).or_insert(0);
        if *held < count {
            return Err(ActionError::NothingToSell);
        }
        *held -= count;
        Ok(())
    }

    /// Draw `amount` harvested units across species, lowest catalog index
    /// first. The draw order is arbitrary economically but fixed for
    /// reproducibility.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` when total stock is short; inventory
    /// unchanged.
    pub fn consume(&mut self, amount: u32) -> Result<BTreeMap<Species, u32>, ActionError> {
        let available = self.total_harvested();
        if available < amount {
            return Err(ActionError::InsufficientStock {
                needed: amount,
                available,
            });
        }
        let mut used = BTreeMap::new();
        let mut remaining = amount;
        for species in SPECIES_ORDER {
            if remaining == 0 {
                break;
            }
            let held = self.harvested.entry(species).or_insert(0);
            let take = (*held).min(remaining);
            if take > 0 {
                *held -= take;
                used.insert(species, take);
                remaining -= take;
            }
        }
        Ok(used)
    }

    /// Empty all harvested stock, returning the removed per-species counts.
    pub fn clear_harvested(&mut self) -> BTreeMap<Species, u32> {
        let mut removed = BTreeMap::new();
        for (species, count) in &mut self.harvested {
            if *count > 0 {
                removed.insert(*species, *count);
                *count = 0;
            }
        }
        removed
    }

    /// Daily regrowth: one new standing unit per species.
    pub fn regrow(&mut self) {
        for count in self.standing.values_mut() {
            *count += DAILY_REGROWTH_PER_SPECIES;
        }
    }

    /// Remove up to `count` harvested units one at a time, each drawn
    /// uniformly among species with remaining stock. Used by inspections.
    pub(crate) fn confiscate_harvested<R: Rng>(
        &mut self,
        count: u32,
        rng: &mut R,
    ) -> BTreeMap<Species, u32> {
        remove_random_units(&mut self.harvested, count, rng)
    }

    /// Remove up to `count` standing units one at a time, each drawn
    /// uniformly among species with remaining stock. Used by fires.
    pub(crate) fn destroy_standing<R: Rng>(
        &mut self,
        count: u32,
        rng: &mut R,
    ) -> BTreeMap<Species, u32> {
        remove_random_units(&mut self.standing, count, rng)
    }
}

fn remove_random_units<R: Rng>(
    map: &mut BTreeMap<Species, u32>,
    count: u32,
    rng: &mut R,
) -> BTreeMap<Species, u32> {
    let mut removed = BTreeMap::new();
    for _ in 0..count {
        let nonzero: Vec<Species> = map
            .iter()
            .filter(|(_, c)| **c > 0)
            .map(|(s, _)| *s)
            .collect();
        if nonzero.is_empty() {
            break;
        }
        let species = nonzero[rng.gen_range(0..nonzero.len())];
        if let Some(c) = map.get_mut(&species) {
            *c -= 1;
        }
        *removed.entry(species).or_insert(0) += 1;
    }
    removed
}
