// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search for a generator of the multiplicative group mod `p`.
use num_bigint::BigUint;
use num_traits::One;
use thiserror::Error;
use tracing::debug;

use crate::crypto::{Rng, RngError};

/// Random draws before the known-order search falls back to a linear scan.
const RANDOM_ATTEMPTS: usize = 1000;

/// Upper bound of the small-candidate scan in the unknown-order fallback.
const SMALL_CANDIDATE_LIMIT: u32 = 1000;

/// Finds a generator `g` with `2 <= g < p` of the multiplicative group mod `p`.
///
/// With `q = Some(..)` the caller asserts that `p = 2q + 1` is a safe prime; the search then
/// verifies actual group order and the returned element generates the full group of order `2q`.
///
/// With `q = None` only a weak fallback is available: small candidates are accepted on a Fermat
/// check `g^(p-1) ≡ 1 (mod p)`, which every element coprime to `p` satisfies. The result is a
/// valid group element but there is no primitive-root guarantee. Prefer safe-prime parameters
/// whenever generator quality matters.
pub fn find_generator(
    p: &BigUint,
    q: Option<&BigUint>,
    rng: &Rng,
) -> Result<BigUint, GeneratorError> {
    match q {
        Some(q) => find_group_generator(p, q, rng),
        None => find_fermat_candidate(p),
    }
}

/// Known subgroup order: `p = 2q + 1`, group order is `2q`.
///
/// Squaring a random `h` forces the candidate out of order `2q` into one of the subgroups of
/// order `q`, `2` or `1`; rejecting `g^q ≡ 1` and `g² ≡ 1` leaves exactly the elements of order
/// `2q`, i.e. generators of the full group.
fn find_group_generator(p: &BigUint, q: &BigUint, rng: &Rng) -> Result<BigUint, GeneratorError> {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let p_minus_one = p - &one;

    for _ in 0..RANDOM_ATTEMPTS {
        let h = rng.random_biguint_range(&two, &p_minus_one)?;
        let g = h.modpow(&two, p);
        if g > one && !g.modpow(q, p).is_one() && !g.modpow(&two, p).is_one() {
            return Ok(g);
        }
    }

    debug!("random generator search exhausted, falling back to linear scan");
    let mut g = two.clone();
    while g < p_minus_one {
        if !g.modpow(q, p).is_one() {
            return Ok(g);
        }
        g += 1u32;
    }

    Err(GeneratorError::NotFound)
}

/// Unknown subgroup order: weak Fermat-membership scan over small candidates.
fn find_fermat_candidate(p: &BigUint) -> Result<BigUint, GeneratorError> {
    let p_minus_one = p - BigUint::one();
    let limit = BigUint::from(SMALL_CANDIDATE_LIMIT);

    let mut g = BigUint::from(2u32);
    while g < limit && g < *p {
        if g.modpow(&p_minus_one, p).is_one() {
            return Ok(g);
        }
        g += 1u32;
    }

    Err(GeneratorError::NotFound)
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("search exhausted without finding a generator")]
    NotFound,

    #[error(transparent)]
    Rng(#[from] RngError),
}
