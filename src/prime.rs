// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random prime and safe-prime generation.
//!
//! Both generators retry until a candidate passes [`is_probable_prime`]. Termination is
//! probabilistic, not bounded; expected attempts grow linearly with the bit length. Each attempt
//! is a single loop iteration, so a caller needing a latency bound can wrap the generator and
//! give up between its own retries.
use num_bigint::BigUint;
use thiserror::Error;
use tracing::debug;

use crate::crypto::{Rng, RngError};
use crate::primality::is_probable_prime;

/// Smallest supported candidate bit length. Below this the downstream algorithms (RSA moduli,
/// DH private key ranges) stop making sense.
pub const MIN_PRIME_BITS: u64 = 16;

/// Generates a random probable prime of exactly `bits` bits.
///
/// Candidates are drawn with the top and low bits forced set, so the declared bit length is
/// guaranteed and even numbers are never tested.
pub fn generate_prime(bits: u64, rounds: usize, rng: &Rng) -> Result<BigUint, PrimeError> {
    if bits < MIN_PRIME_BITS {
        return Err(PrimeError::BitsTooSmall { bits });
    }

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let candidate = rng.random_odd_biguint(bits)?;
        if is_probable_prime(&candidate, rounds, rng)? {
            debug!(bits, attempts, "prime candidate accepted");
            return Ok(candidate);
        }
    }
}

/// Generates a safe prime `p = 2q + 1` with both `p` and `q` probable primes.
///
/// `q` is drawn with `bits - 1` bits so `p` lands on exactly `bits` bits. The multiplicative
/// group mod `p` then has order `2q`, which the generator search exploits.
pub fn generate_safe_prime(
    bits: u64,
    rounds: usize,
    rng: &Rng,
) -> Result<(BigUint, BigUint), PrimeError> {
    if bits < MIN_PRIME_BITS {
        return Err(PrimeError::BitsTooSmall { bits });
    }

    let mut attempts: u64 = 0;
    loop {
        attempts += 1;
        let q = rng.random_odd_biguint(bits - 1)?;
        if !is_probable_prime(&q, rounds, rng)? {
            continue;
        }
        let p = &q * 2u32 + 1u32;
        if is_probable_prime(&p, rounds, rng)? {
            debug!(bits, attempts, "safe prime accepted");
            return Ok((p, q));
        }
    }
}

#[derive(Debug, Error)]
pub enum PrimeError {
    #[error("bit length {bits} is too small to generate a usable prime")]
    BitsTooSmall { bits: u64 },

    #[error(transparent)]
    Rng(#[from] RngError),
}
