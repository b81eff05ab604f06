// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use rand::RngCore;
use starknet::core::types::Felt;

/// Length of a deployment salt in bytes.
pub const SALT_LENGTH: usize = 32;

/// Random value mixed into the contract address so redeploys never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Salt([u8; SALT_LENGTH]);

impl Salt {
    /// Draws a salt from the operating system backed thread rng.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// `0x` followed by 64 hex characters.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// The salt as a field element, reduced modulo the field prime.
    pub fn to_felt(&self) -> Felt {
        Felt::from_bytes_be(&self.0)
    }
}
