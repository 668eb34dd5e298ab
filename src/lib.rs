// SPDX-License-Identifier: MIT OR Apache-2.0

//! `primelab` provides the number-theoretic machinery behind the RSA and Diffie-Hellman lab
//! exercises: probabilistic primality testing, prime and safe-prime generation, generator
//! search, modular inverses, RSA key generation and encryption, Diffie-Hellman key exchange,
//! hash-based key derivation and a demo stream cipher.
//!
//! ## Design
//!
//! Everything is a pure, synchronous computation over arbitrary-precision integers
//! ([`num_bigint::BigUint`]). Values are immutable once produced and never mutated in place, so
//! parameters and key material can be shared freely between threads. The only external
//! capability is randomness, modelled by [`Rng`]: a single cryptographically-secure ChaCha20
//! source used for all key material *and* all primality witnesses. Tests inject a seeded
//! variant; there is no weaker default anywhere.
//!
//! Prime, safe-prime and generator searches are randomized retry loops with probabilistic
//! termination. They run until they succeed; expected attempts grow with the bit length, so
//! generating large safe primes can take a while.
//!
//! ## Typical exchange
//!
//! ```
//! use primelab::{DhKeyPair, DhParameters, Rng, agreed_secret, stream_xor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rng = Rng::default();
//!
//! let params = DhParameters::generate(32, 10, &rng)?;
//! let alice = DhKeyPair::generate(&params, &rng)?;
//! let bob = DhKeyPair::generate(&params, &rng)?;
//!
//! let secret = agreed_secret(&alice, &bob, &params).expect("both views agree");
//! let key = secret.derive_key();
//!
//! let ciphertext = stream_xor(&key, b"hello");
//! assert_eq!(stream_xor(&key, &ciphertext), b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Security
//!
//! This crate reproduces the *lab's* algorithmic contracts, not production-grade guarantees.
//! Arithmetic is not constant-time, RSA is textbook (no padding) and the stream cipher has no
//! nonce management. Use a vetted cryptography library for anything real.
pub mod arith;
mod crypto;
pub mod dh;
pub mod generator;
pub mod kdf;
pub mod primality;
pub mod prime;
pub mod rsa;
pub mod stream;

pub use crypto::{Rng, RngError};
pub use dh::{DhError, DhKeyPair, DhParameters, SharedSecret, agreed_secret};
pub use kdf::{KEY_SIZE, SymmetricKey, derive_key};
pub use rsa::{RsaError, RsaKeyMaterial};
pub use stream::stream_xor;
