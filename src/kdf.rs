// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hash-based key derivation from a shared-secret integer.
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::crypto::secret::Secret;
use crate::crypto::sha2::{SHA256_DIGEST_SIZE, sha2_256};

/// Size of derived symmetric keys.
pub const KEY_SIZE: usize = SHA256_DIGEST_SIZE;

/// Opaque 32-byte symmetric key, usable only as cipher input.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SymmetricKey(Secret<KEY_SIZE>);

impl SymmetricKey {
    pub(crate) fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(Secret::from_bytes(bytes))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        self.0.as_bytes()
    }
}

/// Derives a symmetric key as SHA-256 over the minimal big-endian encoding of `secret`.
///
/// The value zero encodes as a single zero byte, never as an empty sequence. Deterministic:
/// equal secrets always derive equal keys.
pub fn derive_key(secret: &BigUint) -> SymmetricKey {
    let encoded = if secret.is_zero() {
        vec![0u8]
    } else {
        secret.to_bytes_be()
    };
    SymmetricKey::from_bytes(sha2_256(&[&encoded]))
}
