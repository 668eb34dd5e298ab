// SPDX-License-Identifier: MIT OR Apache-2.0

//! Miller-Rabin probabilistic primality testing.
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::crypto::{Rng, RngError};

/// Fixed trial-division set; candidates divisible by one of these are settled without any
/// modular exponentiation.
const SMALL_PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Miller-Rabin probabilistic primality test.
///
/// Runs `rounds` independent witness rounds with random bases from `[2, n - 2]`. A composite
/// `n` survives all rounds with probability at most `4^-rounds`; a `true` result therefore
/// means "probably prime", never "certainly prime". Witness bases come from the injected
/// cryptographically-secure [`Rng`].
pub fn is_probable_prime(n: &BigUint, rounds: usize, rng: &Rng) -> Result<bool, RngError> {
    let one = BigUint::one();
    let two = BigUint::from(2u32);

    if *n < two {
        return Ok(false);
    }
    for small in SMALL_PRIMES {
        let small = BigUint::from(small);
        if (n % &small).is_zero() {
            return Ok(*n == small);
        }
    }

    // Decompose n - 1 = 2^s * d with d odd.
    let n_minus_one = n - &one;
    let s = n_minus_one
        .trailing_zeros()
        .expect("n - 1 is non-zero for n >= 2");
    let d = &n_minus_one >> s;

    'witness: for _ in 0..rounds {
        let base = rng.random_biguint_range(&two, &n_minus_one)?;
        let mut x = base.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return Ok(false);
    }

    Ok(true)
}
