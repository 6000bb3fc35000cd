//! Income and property tax policy, player-configurable within validated
//! ranges.

use serde::{Deserialize, Serialize};

use crate::constants::{INCOME_TAX_RATE, PROPERTY_TAX_PER_FURNITURE, PROPERTY_TAX_PER_TREE};
use crate::error::ConfigError;
use crate::numbers::{floor_f64_to_i64, i64_to_f64};

/// Active tax rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Fraction of gross sale value withheld, in [0, 1].
    pub income_tax_rate: f64,
    /// Daily charge per standing tree.
    pub property_tax_per_tree: i64,
    /// Daily charge per furniture item.
    pub property_tax_per_furniture: i64,
}

impl Default for TaxPolicy {
    fn default() -> Self {
        Self {
            income_tax_rate: INCOME_TAX_RATE,
            property_tax_per_tree: PROPERTY_TAX_PER_TREE,
            property_tax_per_furniture: PROPERTY_TAX_PER_FURNITURE,
        }
    }
}

impl TaxPolicy {
    /// Split a gross amount into `(tax, net)`. Tax is floored.
    #[must_use]
    pub fn income_tax(&self, gross: i64) -> (i64, i64) {
        let tax = floor_f64_to_i64(i64_to_f64(gross) * self.income_tax_rate);
        (tax, gross - tax)
    }

    /// Daily property tax for the given holdings.
    #[must_use]
    pub fn property_tax(&self, standing_trees: u32, furniture_items: u32) -> i64 {
        self.property_tax_per_tree * i64::from(standing_trees)
            + self.property_tax_per_furniture * i64::from(furniture_items)
    }

    /// Apply a settings form. Every field is validated first; on any failure
    /// nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the first range violation found.
    pub fn apply_settings(&mut self, settings: &TaxSettings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.income_tax_rate = settings.income_tax_percent / 100.0;
        self.property_tax_per_tree = settings.property_tax_per_tree;
        self.property_tax_per_furniture = settings.property_tax_per_furniture;
        Ok(())
    }
}

/// Raw settings-form values as entered by the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Income tax in percent, [0, 100].
    pub income_tax_percent: f64,
    pub property_tax_per_tree: i64,
    pub property_tax_per_furniture: i64,
}

impl TaxSettings {
    /// Check every field against its documented range.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.income_tax_percent.is_finite()
            || !(0.0..=100.0).contains(&self.income_tax_percent)
        {
            return Err(ConfigError::IncomeTaxOutOfRange(self.income_tax_percent));
        }
        if self.property_tax_per_tree < 0 {
            return Err(ConfigError::NegativeRate {
                field: "property tax per tree",
                value: self.property_tax_per_tree,
            });
        }
        if self.property_tax_per_furniture < 0 {
            return Err(ConfigError::NegativeRate {
                field: "property tax per furniture",
                value: self.property_tax_per_furniture,
            });
        }
        Ok(())
    }
}
