//! Deterministic bundle of RNG streams segregated by simulation domain.
//!
//! One user-visible seed fans out into independent streams so that, for
//! example, extra market refreshes never perturb which day the next fire
//! lands on. Stream seeds are domain-separated with HMAC-SHA-256.

use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Independent streams for each randomized subsystem.
#[derive(Debug, Clone)]
pub struct RngBundle {
    market: RefCell<CountingRng<SmallRng>>,
    risk: RefCell<CountingRng<SmallRng>>,
    wager: RefCell<CountingRng<SmallRng>>,
    upkeep: RefCell<CountingRng<SmallRng>>,
}

impl RngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            market: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"market"))),
            risk: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"risk"))),
            wager: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"wager"))),
            upkeep: RefCell::new(CountingRng::new(derive_stream_seed(seed, b"upkeep"))),
        }
    }

    /// Market repricing stream.
    #[must_use]
    pub fn market(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.market.borrow_mut()
    }

    /// Inspection/arrest/fire stream.
    #[must_use]
    pub fn risk(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.risk.borrow_mut()
    }

    /// Mini-game stream.
    #[must_use]
    pub fn wager(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.wager.borrow_mut()
    }

    /// Daily utility-charge stream.
    #[must_use]
    pub fn upkeep(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.upkeep.borrow_mut()
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
