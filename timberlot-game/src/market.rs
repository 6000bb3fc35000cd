//! Daily log market: per-species prices in a volatility band around base.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::MARKET_VOLATILITY;
use crate::numbers::{i64_to_f64, round_f64_to_i64};
use crate::species::{SPECIES_ORDER, Species};

/// Market tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// How far prices can drift from base each repricing, e.g. 0.2 = ±20%.
    pub volatility: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            volatility: MARKET_VOLATILITY,
        }
    }
}

impl MarketConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }
}

/// Current unit prices. Replaced wholesale at every repricing; never
/// partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    prices: BTreeMap<Species, i64>,
}

impl Default for Market {
    fn default() -> Self {
        Self {
            prices: SPECIES_ORDER.iter().map(|s| (*s, s.base_price())).collect(),
        }
    }
}

impl Market {
    /// Construct a market already randomized for day one.
    #[must_use]
    pub fn new_seeded<R: Rng>(cfg: &MarketConfig, rng: &mut R) -> Self {
        let mut market = Self::default();
        market.reprice(cfg, rng);
        market
    }

    /// Replace every price with a fresh draw in the volatility band. Prices
    /// are floored at 1.
    pub fn reprice<R: Rng>(&mut self, cfg: &MarketConfig, rng: &mut R) {
        for species in SPECIES_ORDER {
            let variation: f64 = rng.gen_range(-cfg.volatility..=cfg.volatility);
            let base = i64_to_f64(species.base_price());
            let price = round_f64_to_i64(base * (1.0 + variation)).max(1);
            self.prices.insert(species, price);
        }
    }

    /// Current unit price, falling back to the base price if the species is
    /// somehow missing from the map.
    #[must_use]
    pub fn quote(&self, species: Species) -> i64 {
        self.prices
            .get(&species)
            .copied()
            .unwrap_or_else(|| species.base_price())
    }

    /// All prices in catalog order.
    pub fn prices(&self) -> impl Iterator<Item = (Species, i64)> + '_ {
        self.prices.iter().map(|(s, p)| (*s, *p))
    }
}
