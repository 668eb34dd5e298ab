// SPDX-License-Identifier: MIT OR Apache-2.0

//! Textbook RSA key generation and modular-exponentiation encryption.
//!
//! This is the raw algorithm without padding, exactly as exercised in the lab: plaintexts and
//! ciphertexts are integers in `[0, n)` and the round trip is an identity. Do not mistake it for
//! a production RSA implementation.
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::arith::{ArithError, mod_inverse};
use crate::crypto::Rng;
use crate::prime::{PrimeError, generate_prime};

/// Preferred public exponent, used whenever it is coprime to `φ(n)`.
pub const DEFAULT_PUBLIC_EXPONENT: u32 = 65537;

/// RSA key material `{e, d, n}` with `e·d ≡ 1 (mod φ(n))`.
///
/// The public key is `(e, n)`, the private key `(d, n)`. Immutable once generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaKeyMaterial {
    pub e: BigUint,
    pub d: BigUint,
    pub n: BigUint,
}

impl RsaKeyMaterial {
    /// Generates a fresh key pair from two distinct random primes of `bits` bits each.
    pub fn generate(bits: u64, rounds: usize, rng: &Rng) -> Result<Self, RsaError> {
        generate_keys(bits, rounds, rng)
    }

    pub fn encrypt(&self, plaintext: &BigUint) -> Result<BigUint, RsaError> {
        encrypt(plaintext, &self.e, &self.n)
    }

    pub fn decrypt(&self, ciphertext: &BigUint) -> Result<BigUint, RsaError> {
        decrypt(ciphertext, &self.d, &self.n)
    }
}

/// Generates RSA key material from two distinct primes of `bits` bits each.
///
/// `e` is 65537 when coprime to `φ(n)`, otherwise the smallest odd `e >= 3` coprime to `φ(n)`.
pub fn generate_keys(bits: u64, rounds: usize, rng: &Rng) -> Result<RsaKeyMaterial, RsaError> {
    let p = generate_prime(bits, rounds, rng)?;
    let mut q = generate_prime(bits, rounds, rng)?;
    while q == p {
        q = generate_prime(bits, rounds, rng)?;
    }

    let n = &p * &q;
    let phi = (&p - 1u32) * (&q - 1u32);

    let mut e = BigUint::from(DEFAULT_PUBLIC_EXPONENT);
    if !e.gcd(&phi).is_one() {
        e = BigUint::from(3u32);
        while !e.gcd(&phi).is_one() {
            e += 2u32;
        }
    }

    // gcd(e, phi) = 1 at this point, the inverse always exists.
    let d = mod_inverse(&e, &phi)?;
    debug!(bits, "rsa key material generated");

    Ok(RsaKeyMaterial { e, d, n })
}

/// Computes `m^e mod n`. The plaintext must lie in `[0, n)`.
pub fn encrypt(m: &BigUint, e: &BigUint, n: &BigUint) -> Result<BigUint, RsaError> {
    if m >= n {
        return Err(RsaError::OutOfRange);
    }
    Ok(m.modpow(e, n))
}

/// Computes `c^d mod n`. The ciphertext must lie in `[0, n)`.
pub fn decrypt(c: &BigUint, d: &BigUint, n: &BigUint) -> Result<BigUint, RsaError> {
    if c >= n {
        return Err(RsaError::OutOfRange);
    }
    Ok(c.modpow(d, n))
}

#[derive(Debug, Error)]
pub enum RsaError {
    #[error("value is not in the range [0, n)")]
    OutOfRange,

    #[error(transparent)]
    Prime(#[from] PrimeError),

    #[error(transparent)]
    Arith(#[from] ArithError),
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::One;

    use crate::crypto::Rng;

    use super::{RsaError, RsaKeyMaterial, decrypt, encrypt};

    const ROUNDS: usize = 10;

    #[test]
    fn textbook_fixed_point() {
        // p = 61, q = 53, e = 17.
        let e = BigUint::from(17u32);
        let d = BigUint::from(2753u32);
        let n = BigUint::from(3233u32);

        let m = BigUint::from(65u32);
        let c = encrypt(&m, &e, &n).unwrap();
        assert_eq!(c, BigUint::from(2790u32));
        assert_eq!(decrypt(&c, &d, &n).unwrap(), m);
    }

    #[test]
    fn generated_keys_round_trip() {
        let rng = Rng::from_seed([1; 32]);

        let keys = RsaKeyMaterial::generate(24, ROUNDS, &rng).unwrap();

        for m in [0u64, 1, 42, 65537, 999_983] {
            let m = BigUint::from(m);
            let c = keys.encrypt(&m).unwrap();
            assert_eq!(keys.decrypt(&c).unwrap(), m);
        }
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let rng = Rng::from_seed([2; 32]);

        let keys = RsaKeyMaterial::generate(16, ROUNDS, &rng).unwrap();
        assert!(matches!(keys.encrypt(&keys.n), Err(RsaError::OutOfRange)));

        let beyond = &keys.n + BigUint::one();
        assert!(matches!(keys.decrypt(&beyond), Err(RsaError::OutOfRange)));
    }

    #[test]
    fn key_invariant_holds() {
        let rng = Rng::from_seed([3; 32]);

        let keys = RsaKeyMaterial::generate(20, ROUNDS, &rng).unwrap();
        // e and d invert each other for arbitrary messages.
        let m = BigUint::from(123_456u32) % &keys.n;
        let c = keys.encrypt(&m).unwrap();
        assert_eq!(keys.decrypt(&c).unwrap(), m);
    }
}
