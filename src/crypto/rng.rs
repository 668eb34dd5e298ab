// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cryptographically-secure randomness capability.
//!
//! Every piece of key material and every primality witness in this crate is drawn from this one
//! source. A deterministic, seeded variant is available for tests only; nothing in the crate falls
//! back to a weaker generator.
use std::sync::Mutex;

use num_bigint::{BigUint, RandBigInt};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;

/// Cryptographically-secure random number generator based on the ChaCha algorithm.
///
/// The generator is shared behind a mutex so callers can pass it around by reference. All draws
/// are fresh and independent; the capability itself carries no domain state.
#[derive(Debug)]
pub struct Rng {
    rng: Mutex<ChaCha20Rng>,
}

impl Default for Rng {
    fn default() -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_entropy()),
        }
    }
}

#[cfg(any(test, feature = "test_utils"))]
impl Rng {
    /// Deterministic generator for reproducible tests.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: Mutex::new(ChaCha20Rng::from_seed(seed)),
        }
    }
}

impl Rng {
    /// Samples a uniform integer from the half-open range `[low, high)`.
    ///
    /// Callers must guarantee `low < high`.
    pub fn random_biguint_range(&self, low: &BigUint, high: &BigUint) -> Result<BigUint, RngError> {
        let mut rng = self.rng.lock().map_err(|_| RngError::LockPoisoned)?;
        Ok(rng.gen_biguint_range(low, high))
    }

    /// Samples a random odd integer of exactly `bits` bits.
    ///
    /// The top bit is forced set so the result has the declared bit length, the low bit is forced
    /// set so prime candidates are never even. Callers must guarantee `bits >= 2`.
    pub fn random_odd_biguint(&self, bits: u64) -> Result<BigUint, RngError> {
        let mut rng = self.rng.lock().map_err(|_| RngError::LockPoisoned)?;
        let mut candidate = rng.gen_biguint(bits);
        candidate.set_bit(bits - 1, true);
        candidate.set_bit(0, true);
        Ok(candidate)
    }
}

#[derive(Debug, Error)]
pub enum RngError {
    #[error("rng lock is poisoned")]
    LockPoisoned,
}
