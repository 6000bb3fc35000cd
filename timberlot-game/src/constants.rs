//! Centralized balance and tuning constants for Timberlot game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Starting state -----------------------------------------------------------
pub(crate) const STARTING_MONEY: i64 = 200;
pub(crate) const STARTING_TREES_PER_SPECIES: u32 = 5;

// Ledger tuning ------------------------------------------------------------
pub(crate) const LOAN_INTEREST_RATE: f64 = 0.23;

// Market tuning ------------------------------------------------------------
pub(crate) const MARKET_VOLATILITY: f64 = 0.20;

// Tax defaults -------------------------------------------------------------
pub(crate) const INCOME_TAX_RATE: f64 = 0.10;
pub(crate) const PROPERTY_TAX_PER_TREE: i64 = 1;
pub(crate) const PROPERTY_TAX_PER_FURNITURE: i64 = 2;

// Daily upkeep -------------------------------------------------------------
pub(crate) const UTILITY_CHARGE_MIN: i64 = 10;
pub(crate) const UTILITY_CHARGE_MAX: i64 = 40;
pub(crate) const DAILY_REGROWTH_PER_SPECIES: u32 = 1;

// Risk tuning --------------------------------------------------------------
pub(crate) const INSPECTION_CHANCE: f64 = 0.10;
pub(crate) const INSPECTION_MAX_SEIZED: u32 = 5;
pub(crate) const SELL_ARREST_CHANCE: f64 = 0.12;
pub(crate) const BULK_ARREST_BASE_CHANCE: f64 = 0.06;
pub(crate) const BULK_ARREST_PER_UNIT: f64 = 0.01;
pub(crate) const BULK_ARREST_FREE_UNITS: u32 = 10;
pub(crate) const FIRE_CHANCE_PER_DAY: f64 = 0.08;
pub(crate) const FIRE_LOSS_DIVISOR: u32 = 4;
pub(crate) const JAIL_FINE_MIN: i64 = 5;
pub(crate) const JAIL_FINE_MAX: i64 = 150;
pub(crate) const JAIL_FINE_STEP: i64 = 5;
pub(crate) const BAILIFF_COLLECTION_RATE: f64 = 0.10;

// Home tuning --------------------------------------------------------------
pub(crate) const FURNITURE_SELL_PRICE: i64 = 180;
pub(crate) const HOME_GRID_WIDTH: u8 = 5;
pub(crate) const HOME_GRID_HEIGHT: u8 = 4;
