// SPDX-License-Identifier: MIT OR Apache-2.0

//! Demo XOR stream cipher with a hash-counter keystream.
//!
//! Keystream block `i` is `SHA-256(key ‖ BE64(i))`; the keystream is truncated to the input
//! length and XORed byte-for-byte. Applying the function twice with the same key is the
//! identity.
//!
//! Pedagogical construct only: there is no nonce, so two messages under the same key reuse the
//! keystream. Never use this where confidentiality actually matters.
use crate::crypto::sha2::{SHA256_DIGEST_SIZE, sha2_256};
use crate::kdf::SymmetricKey;

/// XORs `data` with the hash-counter keystream for `key`.
///
/// Output length always equals input length; the empty input maps to the empty output.
pub fn stream_xor(key: &SymmetricKey, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for (block_index, chunk) in data.chunks(SHA256_DIGEST_SIZE).enumerate() {
        let counter = (block_index as u64).to_be_bytes();
        let block = sha2_256(&[key.as_bytes(), &counter]);
        out.extend(chunk.iter().zip(block.iter()).map(|(byte, pad)| byte ^ pad));
    }
    out
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use crate::kdf::derive_key;

    use super::stream_xor;

    #[test]
    fn involution() {
        let key = derive_key(&BigUint::from(42u32));

        for data in [
            &b""[..],
            &b"a"[..],
            &b"Hello from Alice -> Bob"[..],
            &[0u8; 100][..],
            &[0xffu8; 65][..],
        ] {
            let ciphertext = stream_xor(&key, data);
            assert_eq!(ciphertext.len(), data.len());
            assert_eq!(stream_xor(&key, &ciphertext), data);
        }
    }

    #[test]
    fn fixed_vector() {
        // Key derived from the textbook DH shared secret 2.
        let key = derive_key(&BigUint::from(2u32));

        let ciphertext = stream_xor(&key, b"Hello from Alice -> Bob");
        assert_eq!(
            hex::encode(&ciphertext),
            "a0c9f67b28884a256aa5e83df531dea06728e7cd3641b7"
        );
    }

    #[test]
    fn multi_block_fixed_vector() {
        let key = derive_key(&BigUint::from(2u32));

        let data: Vec<u8> = (0u8..40).collect();
        let ciphertext = stream_xor(&key, &data);
        assert_eq!(
            hex::encode(&ciphertext),
            "e8ad981443ad2a500dc1c2779555b3ca5714cbfe603bc3700b18d818d56ce57eb5ded7e275058a1e"
        );
        assert_eq!(stream_xor(&key, &ciphertext), data);
    }

    #[test]
    fn different_keys_differ() {
        let key_1 = derive_key(&BigUint::from(1u32));
        let key_2 = derive_key(&BigUint::from(2u32));

        let data = b"same plaintext";
        assert_ne!(stream_xor(&key_1, data), stream_xor(&key_2, data));
    }
}
