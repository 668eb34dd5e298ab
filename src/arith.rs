// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extended Euclidean algorithm and modular inverses.
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
use thiserror::Error;

/// Computes `(g, x, y)` such that `g = gcd(a, b) = a·x + b·y`.
///
/// Iterative so the recursion depth of the textbook formulation cannot become a problem at large
/// bit lengths. For non-negative inputs `g` is non-negative.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
        let next_t = &old_t - &quotient * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Returns `x` with `a·x ≡ 1 (mod m)`, normalised into `[0, m)`.
///
/// An inverse exists exactly when `gcd(a, m) = 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint, ArithError> {
    if *m <= BigUint::one() {
        return Err(ArithError::InvalidModulus);
    }

    let a_int = BigInt::from(a % m);
    let m_int = BigInt::from(m.clone());
    let (g, x, _) = extended_gcd(&a_int, &m_int);
    if !g.is_one() {
        return Err(ArithError::NoInverse);
    }

    let mut x = x % &m_int;
    if x.sign() == Sign::Minus {
        x += &m_int;
    }
    Ok(x.to_biguint().expect("remainder is normalised into [0, m)"))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArithError {
    #[error("modulus must be greater than one")]
    InvalidModulus,

    #[error("no modular inverse exists as the arguments are not coprime")]
    NoInverse,
}
