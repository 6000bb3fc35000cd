//! Money and debt accounting.
//!
//! The ledger owns the single hard invariant of the simulation: money never
//! goes negative. Any charge that would overdraw the balance clamps money at
//! zero and converts the shortfall into debt. Debt is likewise never negative;
//! overpayments are clamped, not refunded.

use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::numbers::{i64_to_f64, round_f64_to_i64};

/// Receipt returned when a loan is granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanReceipt {
    pub principal: i64,
    /// Principal plus the one-time interest surcharge, added to the debt pool.
    pub debt_added: i64,
}

/// Cash on hand and outstanding debt. Fields are private so that every
/// decrease runs through one of the documented enforcement points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ledger {
    money: i64,
    debt: i64,
}

impl Ledger {
    /// Open a ledger with the given starting balance and no debt.
    #[must_use]
    pub const fn with_money(money: i64) -> Self {
        Self { money, debt: 0 }
    }

    #[must_use]
    pub const fn money(&self) -> i64 {
        self.money
    }

    #[must_use]
    pub const fn debt(&self) -> i64 {
        self.debt
    }

    /// Add to money. Negative amounts are ignored.
    pub fn credit(&mut self, amount: i64) {
        self.money = self.money.saturating_add(amount.max(0));
    }

    /// Subtract from money, converting any overdraft into debt. This is the
    /// sole general-purpose invariant enforcement point; every ordinary
    /// money-decreasing effect (fines, taxes, utilities, collections) runs
    /// through here. Returns the shortfall that became debt, 0 when the
    /// balance covered the charge.
    pub fn debit(&mut self, amount: i64) -> i64 {
        let amount = amount.max(0);
        if amount <= self.money {
            self.money -= amount;
            0
        } else {
            let shortfall = amount - self.money;
            self.money = 0;
            self.debt = self.debt.saturating_add(shortfall);
            shortfall
        }
    }

    /// Charge up to `amount`, clamping money at zero; the uncollected
    /// remainder is accrued as debt. The shortfall is measured against the
    /// balance as it stood before the charge. Used by the property-tax step
    /// of the day pipeline, which deliberately does not share the `debit`
    /// code path. Returns `(paid, shortfall)`.
    pub fn charge_or_accrue(&mut self, amount: i64) -> (i64, i64) {
        let amount = amount.max(0);
        let paid = amount.min(self.money);
        let shortfall = amount - paid;
        self.money -= paid;
        self.debt = self.debt.saturating_add(shortfall);
        (paid, shortfall)
    }

    /// Take out a loan. The principal is credited immediately; the debt pool
    /// grows by `round(principal * (1 + interest_rate))`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a non-positive principal; no state change.
    pub fn borrow(&mut self, principal: i64, interest_rate: f64) -> Result<LoanReceipt, ActionError> {
        if principal <= 0 {
            return Err(ActionError::InvalidAmount);
        }
        let debt_added = round_f64_to_i64(i64_to_f64(principal) * (1.0 + interest_rate));
        self.money = self.money.saturating_add(principal);
        self.debt = self.debt.saturating_add(debt_added);
        Ok(LoanReceipt {
            principal,
            debt_added,
        })
    }

    /// Pre-commit a wager stake. Plain subtraction, not the clamp path: the
    /// precondition already guarantees the balance covers the stake.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStake` when the stake is non-positive or exceeds
    /// money; no state change.
    pub fn stake(&mut self, amount: i64) -> Result<(), ActionError> {
        if amount <= 0 || amount > self.money {
            return Err(ActionError::InvalidStake);
        }
        self.money -= amount;
        Ok(())
    }

    /// Reduce debt, clamped at zero. Excess payment is not refunded.
    pub fn settle_debt(&mut self, amount: i64) {
        self.debt = (self.debt - amount.max(0)).max(0);
    }

    /// Grow the debt pool directly. Used by the bailiff's compounding-failure
    /// policy when a collection attempt cannot be paid.
    pub fn accrue_debt(&mut self, amount: i64) {
        self.debt = self.debt.saturating_add(amount.max(0));
    }
}
