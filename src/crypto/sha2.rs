// SPDX-License-Identifier: MIT OR Apache-2.0

//! SHA2 hashing helper.
use sha2::{Digest, Sha256};

pub const SHA256_DIGEST_SIZE: usize = 32;

/// SHA2-256 over the concatenation of all given parts.
pub fn sha2_256(parts: &[&[u8]]) -> [u8; SHA256_DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    result[..].try_into().expect("sha256 digest size")
}
