//! Timberlot Game Engine
//!
//! Platform-agnostic core logic for the Timberlot forestry tycoon game.
//! This crate provides the full economy simulation without UI or
//! platform-specific dependencies.

mod constants;

pub mod actions;
pub mod day;
pub mod error;
pub mod furniture;
pub mod inventory;
pub mod ledger;
pub mod market;
pub mod numbers;
pub mod risk;
pub mod rng;
pub mod species;
pub mod state;
pub mod tax;
pub mod wager;

// Re-export commonly used types
pub use actions::{
    CraftReport, FurnitureSale, HarvestReport, SaleReport, SellOutcome, apply_tax_settings, burn,
    craft, harvest, play_wager, refresh_market, remove_furniture, sell, sell_all, sell_furniture,
    take_loan,
};
pub use day::{DayEvent, DayEvents, DaySummary, end_day};
pub use error::{ActionError, ConfigError};
pub use furniture::{FURNITURE_ORDER, FurnitureKind, Home, Placement};
pub use inventory::Inventory;
pub use ledger::{Ledger, LoanReceipt};
pub use market::{Market, MarketConfig};
pub use risk::{ArrestReport, BailiffOutcome, FireLoss, RiskConfig, Seizure};
pub use rng::RngBundle;
pub use species::{SPECIES_ORDER, Species};
pub use state::{EconomyConfig, GameConfig, GameState, Snapshot, StockLine};
pub use tax::{TaxPolicy, TaxSettings};
pub use wager::{
    Dice, Roulette, RouletteBet, Slots, Spin, WagerGame, WagerReceipt, WheelOfFortune,
};

use anyhow::Context as _;
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations should provide this.
pub trait GameStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Save game state under a slot name.
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be saved.
    fn save_game(&self, save_name: &str, game_state: &GameState) -> Result<(), Self::Error>;

    /// Load game state from a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the game state cannot be loaded.
    fn load_game(&self, save_name: &str) -> Result<Option<GameState>, Self::Error>;

    /// Delete a saved game.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Seconds since the Unix epoch as a string. Good enough for the save
/// timestamp shown in the UI; before-epoch clocks read as zero.
fn now_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
        .to_string()
}

/// Main engine wrapper: owns persistence and wires autosave requests into
/// the actions that call for them (inspections and day advances). All saves
/// triggered by gameplay are best-effort; only explicit save calls surface
/// errors.
pub struct GameEngine<S>
where
    S: GameStorage,
{
    storage: S,
    autosave_slot: String,
}

impl<S> GameEngine<S>
where
    S: GameStorage,
{
    /// Create an engine with the default `"autosave"` slot.
    pub fn new(storage: S) -> Self {
        Self::with_autosave_slot(storage, "autosave")
    }

    pub fn with_autosave_slot(storage: S, slot: impl Into<String>) -> Self {
        Self {
            storage,
            autosave_slot: slot.into(),
        }
    }

    /// Start a new game with the specified seed.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> GameState {
        GameState::new(seed)
    }

    /// Save a game state, stamping its save timestamp on success.
    ///
    /// # Errors
    ///
    /// Returns the storage error; the previous timestamp is restored.
    pub fn save_game(&self, save_name: &str, state: &mut GameState) -> Result<(), S::Error> {
        let previous = state.last_saved_at.take();
        state.last_saved_at = Some(now_timestamp());
        if let Err(err) = self.storage.save_game(save_name, state) {
            state.last_saved_at = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Load a game state.
    ///
    /// # Errors
    ///
    /// Returns the storage error.
    pub fn load_game(&self, save_name: &str) -> Result<Option<GameState>, S::Error> {
        self.storage.load_game(save_name)
    }

    /// Delete a saved game.
    ///
    /// # Errors
    ///
    /// Returns the storage error.
    pub fn delete_save(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_save(save_name)
    }

    /// Resume from a slot, starting a fresh game from `seed` when the slot
    /// is empty.
    ///
    /// # Errors
    ///
    /// Returns the storage error with load context attached.
    pub fn load_or_new(&self, save_name: &str, seed: u64) -> Result<GameState, anyhow::Error> {
        let loaded = self
            .storage
            .load_game(save_name)
            .map_err(anyhow::Error::new)
            .with_context(|| format!("loading save slot {save_name:?}"))?;
        Ok(loaded.unwrap_or_else(|| self.new_game(seed)))
    }

    fn autosave(&self, state: &mut GameState) {
        // Best-effort by contract; a failed autosave never surfaces.
        let _ = self.save_game(&self.autosave_slot, state);
    }

    fn autosave_on_inspection(&self, state: &mut GameState, inspection: Option<&Seizure>) {
        if inspection.is_some() {
            self.autosave(state);
        }
    }

    /// [`actions::harvest`] plus an autosave when an inspection fired.
    ///
    /// # Errors
    ///
    /// See [`actions::harvest`].
    pub fn harvest(
        &self,
        state: &mut GameState,
        species: Species,
    ) -> Result<HarvestReport, ActionError> {
        let report = actions::harvest(state, species)?;
        self.autosave_on_inspection(state, report.inspection.as_ref());
        Ok(report)
    }

    /// [`actions::sell`] plus an autosave when an inspection fired.
    ///
    /// # Errors
    ///
    /// See [`actions::sell`].
    pub fn sell(
        &self,
        state: &mut GameState,
        species: Species,
    ) -> Result<SellOutcome, ActionError> {
        let outcome = actions::sell(state, species)?;
        if let SellOutcome::Sold(report) = &outcome {
            self.autosave_on_inspection(state, report.inspection.as_ref());
        }
        Ok(outcome)
    }

    /// [`actions::burn`] plus an autosave when an inspection fired.
    ///
    /// # Errors
    ///
    /// See [`actions::burn`].
    pub fn burn(
        &self,
        state: &mut GameState,
        species: Species,
    ) -> Result<SaleReport, ActionError> {
        let report = actions::burn(state, species)?;
        self.autosave_on_inspection(state, report.inspection.as_ref());
        Ok(report)
    }

    /// [`actions::sell_all`] plus an autosave when an inspection fired.
    ///
    /// # Errors
    ///
    /// See [`actions::sell_all`].
    pub fn sell_all(&self, state: &mut GameState) -> Result<SellOutcome, ActionError> {
        let outcome = actions::sell_all(state)?;
        if let SellOutcome::Sold(report) = &outcome {
            self.autosave_on_inspection(state, report.inspection.as_ref());
        }
        Ok(outcome)
    }

    /// [`actions::craft`] plus an autosave when an inspection fired.
    ///
    /// # Errors
    ///
    /// See [`actions::craft`].
    pub fn craft(
        &self,
        state: &mut GameState,
        kind: FurnitureKind,
    ) -> Result<CraftReport, ActionError> {
        let report = actions::craft(state, kind)?;
        self.autosave_on_inspection(state, report.inspection.as_ref());
        Ok(report)
    }

    /// Run the end-of-day pipeline with this engine's storage as the save
    /// hook. A successful save stamps the state's timestamp.
    pub fn advance_day(&self, state: &mut GameState) -> DaySummary {
        let summary = day::end_day(state, |s| {
            self.storage.save_game(&self.autosave_slot, s).is_ok()
        });
        if summary.events.contains(&DayEvent::Saved) {
            state.last_saved_at = Some(now_timestamp());
        }
        summary
    }
}
