// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use starknet::core::types::Felt;

pub mod color;
pub mod sys;

#[cfg(test)]
pub(crate) mod testing;

/// Formats a felt as `0x`-prefixed lowercase hex without padding.
pub fn format_felt(felt: Felt) -> String {
    format!("{felt:#x}")
}

/// Parses a `0x`-prefixed (or bare) hex string into a felt.
pub fn parse_felt(text: &str) -> Result<Felt, String> {
    let text = text.trim();
    let hex = text.strip_prefix("0x").unwrap_or(text);
    if hex.is_empty() {
        return Err("empty hex string".to_owned());
    }
    Felt::from_hex(&format!("0x{hex}")).map_err(|err| format!("invalid felt {text:?}: {err}"))
}

/// Shortens a secret for display, keeping only the first few characters.
pub fn truncate_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(10).collect();
    format!("{prefix}... (truncated)")
}
