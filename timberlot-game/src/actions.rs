//! Player-facing transactions. Each is a free function over the game state
//! that validates, mutates, and returns a report for presentation.
//!
//! Harvesting, selling, burning, and crafting are blocked while jailed and
//! end with an inspection roll. The financial surface (loans, wagers, market
//! refresh, tax settings, furniture resale) stays open in jail.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ActionError, ConfigError};
use crate::furniture::{FurnitureKind, Placement};
use crate::ledger::LoanReceipt;
use crate::risk::{self, ArrestReport, Seizure};
use crate::species::Species;
use crate::state::GameState;
use crate::tax::TaxSettings;
use crate::wager::{self, WagerGame, WagerReceipt};

/// Result of felling one tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestReport {
    pub species: Species,
    pub inspection: Option<Seizure>,
}

/// Receipt for a completed sale or burn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleReport {
    pub units: u32,
    pub gross: i64,
    pub tax: i64,
    pub net: i64,
    pub inspection: Option<Seizure>,
}

/// A sale either completes or is cut short by an arrest. On arrest nothing
/// was credited and no stock was removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SellOutcome {
    Sold(SaleReport),
    Arrested(ArrestReport),
}

/// Result of crafting one furniture item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftReport {
    pub kind: FurnitureKind,
    pub logs_used: BTreeMap<Species, u32>,
    pub cell: (u8, u8),
    pub inspection: Option<Seizure>,
}

/// Receipt for a furniture resale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnitureSale {
    pub kind: FurnitureKind,
    pub price: i64,
}

fn ensure_free(state: &GameState) -> Result<(), ActionError> {
    if state.in_jail {
        return Err(ActionError::PlayerJailed);
    }
    Ok(())
}

fn run_inspection(state: &mut GameState) -> Option<Seizure> {
    let rng = state.rng();
    let cfg = state.cfg.risk;
    let result = risk::inspection_check(&mut state.inventory, &cfg, &mut *rng.risk());
    result
}

/// Fell one standing tree of the species into harvested stock.
///
/// # Errors
///
/// `PlayerJailed` while jailed; `NothingToHarvest` when the species has no
/// standing units.
pub fn harvest(state: &mut GameState, species: Species) -> Result<HarvestReport, ActionError> {
    ensure_free(state)?;
    state.inventory.harvest(species)?;
    let inspection = run_inspection(state);
    Ok(HarvestReport {
        species,
        inspection,
    })
}

/// Sell one harvested log at the current market price, less income tax.
/// The arrest gate fires before any exchange; an arrested sale moves no
/// stock and no money besides the fine.
///
/// # Errors
///
/// `PlayerJailed` while jailed; `NothingToSell` without stock of the species.
pub fn sell(state: &mut GameState, species: Species) -> Result<SellOutcome, ActionError> {
    ensure_free(state)?;
    if state.inventory.harvested(species) < 1 {
        return Err(ActionError::NothingToSell);
    }
    let rng = state.rng();
    let cfg = state.cfg.risk;
    let roll: f64 = rng.risk().gen();
    if risk::gate(roll, cfg.sell_arrest_chance) {
        let report = risk::arrest(&mut state.ledger, &mut state.in_jail, &cfg, &mut *rng.risk());
        return Ok(SellOutcome::Arrested(report));
    }
    let gross = state.market.quote(species);
    let (tax, net) = state.tax.income_tax(gross);
    state.ledger.credit(net);
    state.inventory.remove_harvested(species, 1)?;
    let inspection = run_inspection(state);
    Ok(SellOutcome::Sold(SaleReport {
        units: 1,
        gross,
        tax,
        net,
        inspection,
    }))
}

/// Burn one harvested log for its fuel value, less income tax. No arrest
/// gate; burning at home draws no attention beyond the usual inspection.
///
/// # Errors
///
/// `PlayerJailed` while jailed; `NothingToSell` without stock of the species.
pub fn burn(state: &mut GameState, species: Species) -> Result<SaleReport, ActionError> {
    ensure_free(state)?;
    if state.inventory.harvested(species) < 1 {
        return Err(ActionError::NothingToSell);
    }
    let gross = species.fuel_value();
    let (tax, net) = state.tax.income_tax(gross);
    state.ledger.credit(net);
    state.inventory.remove_harvested(species, 1)?;
    let inspection = run_inspection(state);
    Ok(SaleReport {
        units: 1,
        gross,
        tax,
        net,
        inspection,
    })
}

/// Sell the entire harvested stock in one pass. The arrest chance scales
/// with volume; an arrest aborts the whole sale with stock and money
/// untouched apart from the fine.
///
/// # Errors
///
/// `PlayerJailed` while jailed; `NothingToSell` with an empty stock.
pub fn sell_all(state: &mut GameState) -> Result<SellOutcome, ActionError> {
    ensure_free(state)?;
    let units = state.inventory.total_harvested();
    if units == 0 {
        return Err(ActionError::NothingToSell);
    }
    let gross: i64 = state
        .inventory
        .harvested_counts()
        .map(|(species, count)| i64::from(count) * state.market.quote(species))
        .sum();
    let rng = state.rng();
    let cfg = state.cfg.risk;
    let chance = cfg.bulk_arrest_chance(units);
    let roll: f64 = rng.risk().gen();
    if risk::gate(roll, chance) {
        let report = risk::arrest(&mut state.ledger, &mut state.in_jail, &cfg, &mut *rng.risk());
        return Ok(SellOutcome::Arrested(report));
    }
    let (tax, net) = state.tax.income_tax(gross);
    state.ledger.credit(net);
    state.inventory.clear_harvested();
    let inspection = run_inspection(state);
    Ok(SellOutcome::Sold(SaleReport {
        units,
        gross,
        tax,
        net,
        inspection,
    }))
}

/// Craft one furniture item from harvested logs and place it on the first
/// free cell. The grid is checked before any log is consumed.
///
/// # Errors
///
/// `PlayerJailed` while jailed; `HomeFull` with no free cell;
/// `InsufficientStock` when total logs fall short of the craft cost.
pub fn craft(state: &mut GameState, kind: FurnitureKind) -> Result<CraftReport, ActionError> {
    ensure_free(state)?;
    let cell = state.home.find_free_cell().ok_or(ActionError::HomeFull)?;
    let logs_used = state.inventory.consume(kind.craft_cost())?;
    state.home.place_at(kind, cell);
    let inspection = run_inspection(state);
    Ok(CraftReport {
        kind,
        logs_used,
        cell,
        inspection,
    })
}

/// Take out a loan against the shared debt pool.
///
/// # Errors
///
/// `InvalidAmount` for a non-positive principal.
pub fn take_loan(state: &mut GameState, principal: i64) -> Result<LoanReceipt, ActionError> {
    let rate = state.cfg.economy.loan_interest_rate;
    state.ledger.borrow(principal, rate)
}

/// Play one wager mini-game for the given stake.
///
/// # Errors
///
/// `InvalidStake` when the stake is non-positive or exceeds cash on hand.
pub fn play_wager<G: WagerGame + ?Sized>(
    state: &mut GameState,
    stake: i64,
    game: &G,
) -> Result<WagerReceipt, ActionError> {
    let rng = state.rng();
    let result = wager::play(&mut state.ledger, stake, game, &mut *rng.wager());
    result
}

/// Re-randomize market prices out of cycle, off the same stream the daily
/// repricing uses.
pub fn refresh_market(state: &mut GameState) {
    let rng = state.rng();
    let cfg = state.cfg.market;
    state.market.reprice(&cfg, &mut *rng.market());
}

/// Apply a tax settings form atomically.
///
/// # Errors
///
/// Returns the first range violation; prior rates stay in effect.
pub fn apply_tax_settings(state: &mut GameState, settings: &TaxSettings) -> Result<(), ConfigError> {
    state.tax.apply_settings(settings)
}

/// Sell a placed furniture item at the flat resale price.
///
/// # Errors
///
/// `NoSuchFurniture` for an out-of-range index.
pub fn sell_furniture(state: &mut GameState, index: usize) -> Result<FurnitureSale, ActionError> {
    let placement = state
        .home
        .remove(index)
        .ok_or(ActionError::NoSuchFurniture)?;
    let price = state.cfg.economy.furniture_sell_price;
    state.ledger.credit(price);
    Ok(FurnitureSale {
        kind: placement.kind,
        price,
    })
}

/// Discard a placed furniture item without compensation.
///
/// # Errors
///
/// `NoSuchFurniture` for an out-of-range index.
pub fn remove_furniture(state: &mut GameState, index: usize) -> Result<Placement, ActionError> {
    state
        .home
        .remove(index)
        .ok_or(ActionError::NoSuchFurniture)
}
