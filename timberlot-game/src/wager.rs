//! Wager mini-games behind one place-resolve-settle contract.
//!
//! Every game, whatever its flavor, reduces to: validate and remove the stake,
//! draw an outcome from the game's declared odds table, credit
//! `stake * multiplier`. A multiplier of 0 is a plain loss; the stake is never
//! refunded.

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::ledger::Ledger;

/// Resolved outcome of one play: the payout multiplier applied to the stake
/// and a human-readable description of what came up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spin {
    pub multiplier: i64,
    pub outcome: String,
}

/// A game that can resolve a wager. Implementations hold the bet parameters;
/// the draw itself comes entirely from the provided RNG stream.
pub trait WagerGame {
    fn spin(&self, rng: &mut dyn RngCore) -> Spin;
}

/// Settled result of one wager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagerReceipt {
    pub stake: i64,
    pub payout: i64,
    pub spin: Spin,
}

impl WagerReceipt {
    /// Net money change from the play.
    #[must_use]
    pub const fn net(&self) -> i64 {
        self.payout - self.stake
    }
}

/// Place a stake, resolve the game, settle the payout.
///
/// # Errors
///
/// Returns `InvalidStake` (no state change, no draw) when the stake is
/// non-positive or exceeds cash on hand.
pub fn play<G: WagerGame + ?Sized>(
    ledger: &mut Ledger,
    stake: i64,
    game: &G,
    rng: &mut dyn RngCore,
) -> Result<WagerReceipt, ActionError> {
    ledger.stake(stake)?;
    let spin = game.spin(rng);
    let payout = stake.saturating_mul(spin.multiplier.max(0));
    ledger.credit(payout);
    Ok(WagerReceipt {
        stake,
        payout,
        spin,
    })
}

const ROULETTE_RED: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// What a roulette player can back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouletteBet {
    /// A single pocket, 0 through 36. Pays 35x.
    Number(u8),
    /// Pays 2x. Zero is neither color.
    Red,
    /// Pays 2x.
    Black,
}

/// European-style single wheel: pockets 0-36.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roulette {
    bet: RouletteBet,
}

impl Roulette {
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a `Number` bet outside 0-36.
    pub fn new(bet: RouletteBet) -> Result<Self, ActionError> {
        if let RouletteBet::Number(n) = bet {
            if n > 36 {
                return Err(ActionError::InvalidAmount);
            }
        }
        Ok(Self { bet })
    }
}

impl WagerGame for Roulette {
    fn spin(&self, rng: &mut dyn RngCore) -> Spin {
        let pocket: u8 = rng.gen_range(0..=36);
        let is_red = ROULETTE_RED.contains(&pocket);
        let multiplier = match self.bet {
            RouletteBet::Number(n) if n == pocket => 35,
            RouletteBet::Red if pocket != 0 && is_red => 2,
            RouletteBet::Black if pocket != 0 && !is_red => 2,
            _ => 0,
        };
        let color = if pocket == 0 {
            "green"
        } else if is_red {
            "red"
        } else {
            "black"
        };
        Spin {
            multiplier,
            outcome: format!("ball landed on {pocket} ({color})"),
        }
    }
}

const SLOT_SYMBOLS: [&str; 6] = ["cherry", "diamond", "bell", "lemon", "clover", "seven"];

/// Three-reel slot machine. Triple match pays 10x, a pair of sevens 5x, any
/// diamond on the reels 2x; rules are checked in that order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slots;

impl WagerGame for Slots {
    fn spin(&self, rng: &mut dyn RngCore) -> Spin {
        let reels: [&str; 3] =
            std::array::from_fn(|_| SLOT_SYMBOLS[rng.gen_range(0..SLOT_SYMBOLS.len())]);
        let sevens = reels.iter().filter(|s| **s == "seven").count();
        let multiplier = if reels[0] == reels[1] && reels[1] == reels[2] {
            10
        } else if sevens == 2 {
            5
        } else if reels.contains(&"diamond") {
            2
        } else {
            0
        };
        Spin {
            multiplier,
            outcome: reels.join(" "),
        }
    }
}

/// Two six-sided dice; an exact sum guess pays 10x.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dice {
    guess: u8,
}

impl Dice {
    /// # Errors
    ///
    /// Returns `InvalidAmount` for a guess outside 2-12.
    pub fn new(guess: u8) -> Result<Self, ActionError> {
        if !(2..=12).contains(&guess) {
            return Err(ActionError::InvalidAmount);
        }
        Ok(Self { guess })
    }
}

impl WagerGame for Dice {
    fn spin(&self, rng: &mut dyn RngCore) -> Spin {
        let first: u8 = rng.gen_range(1..=6);
        let second: u8 = rng.gen_range(1..=6);
        let sum = first + second;
        let multiplier = if sum == self.guess { 10 } else { 0 };
        Spin {
            multiplier,
            outcome: format!("rolled {first}+{second}={sum}"),
        }
    }
}

const WHEEL_SEGMENTS: [i64; 5] = [0, 2, 5, 10, 20];

/// Spin-and-hope wheel: one of {0, 2, 5, 10, 20}x, each equally likely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WheelOfFortune;

impl WagerGame for WheelOfFortune {
    fn spin(&self, rng: &mut dyn RngCore) -> Spin {
        let multiplier = WHEEL_SEGMENTS[rng.gen_range(0..WHEEL_SEGMENTS.len())];
        Spin {
            multiplier,
            outcome: format!("wheel stopped on {multiplier}x"),
        }
    }
}
