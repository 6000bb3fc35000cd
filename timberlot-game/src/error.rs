//! Domain error taxonomy. Every variant is a precondition failure raised
//! before any state mutation begins.

use thiserror::Error;

/// Errors raised by player-facing transactions.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("amount must be a positive whole number")]
    InvalidAmount,
    #[error("no standing trees of that species left to harvest")]
    NothingToHarvest,
    #[error("no harvested logs of that species in stock")]
    NothingToSell,
    #[error("need {needed} logs but only {available} in stock")]
    InsufficientStock { needed: u32, available: u32 },
    #[error("actions are blocked while in jail until the next day")]
    PlayerJailed,
    #[error("stake must be positive and no greater than cash on hand")]
    InvalidStake,
    #[error("no free cell left in the home grid")]
    HomeFull,
    #[error("no furniture item at that position")]
    NoSuchFurniture,
}

/// Errors raised when settings violate their documented ranges. Validation
/// rejects the whole form atomically; prior values stay in effect.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ConfigError {
    #[error("income tax must be between 0 and 100 percent (got {0})")]
    IncomeTaxOutOfRange(f64),
    #[error("{field} must be non-negative (got {value})")]
    NegativeRate { field: &'static str, value: i64 },
}
