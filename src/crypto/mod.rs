// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared cryptographic support: randomness, secret containers and hashing.
mod rng;
pub mod secret;
pub mod sha2;

pub use rng::{Rng, RngError};
