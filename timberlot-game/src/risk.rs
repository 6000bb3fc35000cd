//! Probabilistic adverse events: inspections, arrests, fires, and bailiff
//! collections.
//!
//! Every trigger is an independent gate over an injectable RNG stream, so a
//! fixed seed reproduces the same event sequence. The gate itself is a pure
//! comparison, testable apart from any RNG.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::{
    BAILIFF_COLLECTION_RATE, BULK_ARREST_BASE_CHANCE, BULK_ARREST_FREE_UNITS,
    BULK_ARREST_PER_UNIT, FIRE_CHANCE_PER_DAY, FIRE_LOSS_DIVISOR, INSPECTION_CHANCE,
    INSPECTION_MAX_SEIZED, JAIL_FINE_MAX, JAIL_FINE_MIN, JAIL_FINE_STEP, SELL_ARREST_CHANCE,
};
use crate::inventory::Inventory;
use crate::ledger::Ledger;
use crate::numbers::{floor_f64_to_i64, i64_to_f64};
use crate::species::Species;

/// Probabilities and bounds for every adverse event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub inspection_chance: f64,
    pub inspection_max_seized: u32,
    pub sell_arrest_chance: f64,
    pub bulk_arrest_base_chance: f64,
    pub bulk_arrest_per_unit: f64,
    pub bulk_arrest_free_units: u32,
    pub fire_chance: f64,
    pub fire_loss_divisor: u32,
    pub jail_fine_min: i64,
    pub jail_fine_max: i64,
    pub jail_fine_step: i64,
    pub bailiff_rate: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            inspection_chance: INSPECTION_CHANCE,
            inspection_max_seized: INSPECTION_MAX_SEIZED,
            sell_arrest_chance: SELL_ARREST_CHANCE,
            bulk_arrest_base_chance: BULK_ARREST_BASE_CHANCE,
            bulk_arrest_per_unit: BULK_ARREST_PER_UNIT,
            bulk_arrest_free_units: BULK_ARREST_FREE_UNITS,
            fire_chance: FIRE_CHANCE_PER_DAY,
            fire_loss_divisor: FIRE_LOSS_DIVISOR,
            jail_fine_min: JAIL_FINE_MIN,
            jail_fine_max: JAIL_FINE_MAX,
            jail_fine_step: JAIL_FINE_STEP,
            bailiff_rate: BAILIFF_COLLECTION_RATE,
        }
    }
}

impl RiskConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Arrest chance for a bulk sale of `units` logs: flat base plus a
    /// per-unit surcharge above the free allowance, uncapped.
    #[must_use]
    pub fn bulk_arrest_chance(&self, units: u32) -> f64 {
        self.bulk_arrest_base_chance
            + self.bulk_arrest_per_unit * f64::from(units.saturating_sub(self.bulk_arrest_free_units))
    }
}

/// Pure probability gate: does a uniform `roll` in [0, 1) clear `threshold`?
#[must_use]
pub fn gate(roll: f64, threshold: f64) -> bool {
    roll < threshold
}

/// Per-species breakdown of units confiscated by a forestry inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seizure {
    pub units: BTreeMap<Species, u32>,
}

impl Seizure {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.units.values().sum()
    }
}

/// Per-species breakdown of standing trees lost to a fire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FireLoss {
    pub units: BTreeMap<Species, u32>,
}

impl FireLoss {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.units.values().sum()
    }
}

/// Outcome of being caught: jail plus a one-time fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrestReport {
    pub fine: i64,
    /// Portion of the fine the balance could not cover, now debt.
    pub fine_shortfall: i64,
}

/// Result of a bailiff collection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BailiffOutcome {
    /// Money covered the attempt; debt shrank by the same amount.
    Collected { amount: i64 },
    /// Money fell short; the attempted amount was added to debt instead.
    Failed { attempted: i64 },
}

/// Roll the post-action inspection. On trigger, confiscates 1..=min(5, total)
/// harvested units, one at a time from random nonzero species.
pub fn inspection_check<R: Rng>(
    inventory: &mut Inventory,
    cfg: &RiskConfig,
    rng: &mut R,
) -> Option<Seizure> {
    if !gate(rng.gen::<f64>(), cfg.inspection_chance) {
        return None;
    }
    let total = inventory.total_harvested();
    if total == 0 {
        return None;
    }
    let count = rng.gen_range(1..=total.min(cfg.inspection_max_seized));
    let units = inventory.confiscate_harvested(count, rng);
    Some(Seizure { units })
}

/// Apply an arrest: set the jail flag and debit a fine drawn uniformly from
/// {min, min+step, ..., max}.
pub fn arrest<R: Rng>(
    ledger: &mut Ledger,
    in_jail: &mut bool,
    cfg: &RiskConfig,
    rng: &mut R,
) -> ArrestReport {
    *in_jail = true;
    let steps = (cfg.jail_fine_max - cfg.jail_fine_min) / cfg.jail_fine_step;
    let fine = cfg.jail_fine_min + cfg.jail_fine_step * rng.gen_range(0..=steps);
    let fine_shortfall = ledger.debit(fine);
    ArrestReport {
        fine,
        fine_shortfall,
    }
}

/// Roll the once-per-day fire. On trigger, destroys 1..=max(1, total/4)
/// standing units from random nonzero species. No draw happens when nothing
/// is standing.
pub fn fire_check<R: Rng>(
    inventory: &mut Inventory,
    cfg: &RiskConfig,
    rng: &mut R,
) -> Option<FireLoss> {
    let total = inventory.total_standing();
    if total == 0 {
        return None;
    }
    if !gate(rng.gen::<f64>(), cfg.fire_chance) {
        return None;
    }
    let max_loss = (total / cfg.fire_loss_divisor).max(1);
    let lost = rng.gen_range(1..=max_loss);
    let units = inventory.destroy_standing(lost, rng);
    Some(FireLoss { units })
}

/// Run the once-per-day bailiff collection. Attempts `floor(debt * rate)`;
/// when the balance cannot cover it the attempt compounds the debt instead
/// of being skipped.
pub fn bailiff_check(ledger: &mut Ledger, cfg: &RiskConfig) -> Option<BailiffOutcome> {
    if ledger.debt() == 0 {
        return None;
    }
    let attempted = floor_f64_to_i64(i64_to_f64(ledger.debt()) * cfg.bailiff_rate);
    if ledger.money() >= attempted {
        ledger.debit(attempted);
        ledger.settle_debt(attempted);
        Some(BailiffOutcome::Collected { amount: attempted })
    } else {
        ledger.accrue_debt(attempted);
        Some(BailiffOutcome::Failed { attempted })
    }
}
