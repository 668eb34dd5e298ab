// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diffie-Hellman key exchange over the multiplicative group mod `p`.
//!
//! Parameters, key pairs and shared secrets are plain immutable values; a session is whatever
//! set of these values the caller threads through its own calls. There is no hidden state.
use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{Rng, RngError};
use crate::generator::{GeneratorError, find_generator};
use crate::kdf::{SymmetricKey, derive_key};
use crate::prime::{PrimeError, generate_prime, generate_safe_prime};

/// Hex digits shown before eliding a large integer in display output.
const SHORT_HEX_DIGITS: usize = 64;

/// Public group parameters `{p, g}` with the subgroup order `q` known only for safe primes.
///
/// When `p = 2q + 1` is a safe prime, `q` is the order of the prime-order subgroup and `g`
/// generates the full group of order `2q`. Without `q` the generator carries no order guarantee
/// (see [`find_generator`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DhParameters {
    p: BigUint,
    g: BigUint,
    q: Option<BigUint>,
}

impl DhParameters {
    /// Generates safe-prime parameters with a verified full-group generator.
    ///
    /// This is the slow but structurally sound path; expect noticeable runtimes above a few
    /// hundred bits.
    pub fn generate(bits: u64, rounds: usize, rng: &Rng) -> Result<Self, DhError> {
        let (p, q) = generate_safe_prime(bits, rounds, rng)?;
        let g = find_generator(&p, Some(&q), rng)?;
        Ok(Self { p, g, q: Some(q) })
    }

    /// Generates a plain (not necessarily safe) prime and pairs it with `g = 2`.
    ///
    /// Quick lab-grade parameters: the subgroup order is unknown and `g = 2` is not validated
    /// as a generator.
    pub fn generate_quick(bits: u64, rounds: usize, rng: &Rng) -> Result<Self, DhError> {
        let p = generate_prime(bits, rounds, rng)?;
        Ok(Self {
            p,
            g: BigUint::from(2u32),
            q: None,
        })
    }

    /// Wraps caller-supplied parameters.
    ///
    /// Beyond a minimal size check nothing is validated; the caller vouches for `p` being prime
    /// and `g` being a group element.
    pub fn from_values(p: BigUint, g: BigUint) -> Result<Self, DhError> {
        if p <= BigUint::from(4u32) {
            return Err(DhError::ModulusTooSmall);
        }
        Ok(Self { p, g, q: None })
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Subgroup order, present only for safe-prime parameters.
    pub fn q(&self) -> Option<&BigUint> {
        self.q.as_ref()
    }
}

impl fmt::Display for DhParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "p = {} ({} bits), g = {}",
            short_hex(&self.p),
            self.p.bits(),
            self.g
        )
    }
}

fn short_hex(value: &BigUint) -> String {
    let hex = value.to_str_radix(16);
    if hex.len() > SHORT_HEX_DIGITS {
        format!("{}..", &hex[..SHORT_HEX_DIGITS])
    } else {
        hex
    }
}

/// One party's private/public key pair under fixed parameters.
///
/// The secret exponent never leaves this value and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
pub struct DhKeyPair {
    secret: BigUint,
    public: BigUint,
}

impl DhKeyPair {
    /// Generates a key pair with the secret exponent uniform in `[2, p - 2]`.
    pub fn generate(params: &DhParameters, rng: &Rng) -> Result<Self, DhError> {
        let secret = generate_private(params.p(), rng)?;
        let public = public_key(params.g(), &secret, params.p());
        Ok(Self { secret, public })
    }

    pub fn public(&self) -> &BigUint {
        &self.public
    }

    /// Computes the shared secret from the peer's public key.
    pub fn shared_secret(&self, peer_public: &BigUint, params: &DhParameters) -> SharedSecret {
        shared_secret(peer_public, &self.secret, params.p())
    }
}

impl fmt::Debug for DhKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DhKeyPair")
            .field("secret", &"***")
            .field("public", &self.public)
            .finish()
    }
}

/// Samples a private exponent uniformly from `[2, p - 2]`.
pub fn generate_private(p: &BigUint, rng: &Rng) -> Result<BigUint, DhError> {
    if *p <= BigUint::from(4u32) {
        return Err(DhError::ModulusTooSmall);
    }
    let low = BigUint::from(2u32);
    let high = p - 1u32;
    Ok(rng.random_biguint_range(&low, &high)?)
}

/// Computes the public key `g^secret mod p`.
pub fn public_key(g: &BigUint, secret: &BigUint, p: &BigUint) -> BigUint {
    g.modpow(secret, p)
}

/// Computes the shared secret `peer_public^secret mod p`.
pub fn shared_secret(peer_public: &BigUint, secret: &BigUint, p: &BigUint) -> SharedSecret {
    SharedSecret(peer_public.modpow(secret, p))
}

/// Computes both parties' view of the shared secret and returns it only when they agree.
///
/// A mismatch is a protocol-verification failure, not an error, so it surfaces as `None`.
pub fn agreed_secret(
    alice: &DhKeyPair,
    bob: &DhKeyPair,
    params: &DhParameters,
) -> Option<SharedSecret> {
    let alice_view = alice.shared_secret(bob.public(), params);
    let bob_view = bob.shared_secret(alice.public(), params);
    (alice_view == bob_view).then_some(alice_view)
}

/// Group element both parties computed independently.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSecret(BigUint);

impl SharedSecret {
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Minimal big-endian encoding; the value zero encodes as a single zero byte.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.0.to_bytes_be()
    }

    /// Derives the 32-byte symmetric key for this secret.
    pub fn derive_key(&self) -> SymmetricKey {
        derive_key(&self.0)
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reveal only the magnitude, never the value.
        f.debug_struct("SharedSecret")
            .field("bits", &self.0.bits())
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum DhError {
    #[error("prime modulus is too small to hold a private key")]
    ModulusTooSmall,

    #[error(transparent)]
    Prime(#[from] PrimeError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Rng(#[from] RngError),
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use crate::crypto::Rng;

    use super::{
        DhError, DhKeyPair, DhParameters, agreed_secret, generate_private, public_key,
        shared_secret,
    };

    const ROUNDS: usize = 10;

    #[test]
    fn textbook_fixed_point() {
        // p = 23, g = 5, a = 6, b = 15.
        let p = BigUint::from(23u32);
        let g = BigUint::from(5u32);
        let a = BigUint::from(6u32);
        let b = BigUint::from(15u32);

        let alice_public = public_key(&g, &a, &p);
        let bob_public = public_key(&g, &b, &p);
        assert_eq!(alice_public, BigUint::from(8u32));
        assert_eq!(bob_public, BigUint::from(19u32));

        let alice_view = shared_secret(&bob_public, &a, &p);
        let bob_view = shared_secret(&alice_public, &b, &p);
        assert_eq!(alice_view, bob_view);
        assert_eq!(*alice_view.as_biguint(), BigUint::from(2u32));
    }

    #[test]
    fn exchange_on_generated_parameters() {
        let rng = Rng::from_seed([1; 32]);

        let params = DhParameters::generate(20, ROUNDS, &rng).unwrap();
        let alice = DhKeyPair::generate(&params, &rng).unwrap();
        let bob = DhKeyPair::generate(&params, &rng).unwrap();

        let secret = agreed_secret(&alice, &bob, &params).unwrap();
        assert_eq!(
            secret,
            alice.shared_secret(bob.public(), &params)
        );
    }

    #[test]
    fn quick_parameters_support_exchange() {
        let rng = Rng::from_seed([2; 32]);

        let params = DhParameters::generate_quick(24, ROUNDS, &rng).unwrap();
        assert!(params.q().is_none());

        let alice = DhKeyPair::generate(&params, &rng).unwrap();
        let bob = DhKeyPair::generate(&params, &rng).unwrap();
        assert!(agreed_secret(&alice, &bob, &params).is_some());
    }

    #[test]
    fn private_keys_stay_in_range() {
        let rng = Rng::from_seed([3; 32]);

        let p = BigUint::from(23u32);
        for _ in 0..50 {
            let secret = generate_private(&p, &rng).unwrap();
            assert!(secret >= BigUint::from(2u32));
            assert!(secret <= &p - BigUint::from(2u32));
        }
    }

    #[test]
    fn degenerate_modulus_is_rejected() {
        let rng = Rng::from_seed([4; 32]);

        let p = BigUint::from(4u32);
        assert!(matches!(
            generate_private(&p, &rng),
            Err(DhError::ModulusTooSmall)
        ));
        assert!(matches!(
            DhParameters::from_values(p, BigUint::from(2u32)),
            Err(DhError::ModulusTooSmall)
        ));
    }

    #[test]
    fn custom_parameters_round_trip() {
        let rng = Rng::from_seed([5; 32]);

        let params =
            DhParameters::from_values(BigUint::from(23u32), BigUint::from(5u32)).unwrap();
        let alice = DhKeyPair::generate(&params, &rng).unwrap();
        let bob = DhKeyPair::generate(&params, &rng).unwrap();
        assert!(agreed_secret(&alice, &bob, &params).is_some());
    }

    #[test]
    fn display_elides_large_moduli() {
        let params =
            DhParameters::from_values(BigUint::from(2u32).pow(521) - 1u32, BigUint::from(3u32))
                .unwrap();
        let rendered = params.to_string();
        assert!(rendered.contains(".."));
        assert!(rendered.contains("521 bits"));
    }
}
