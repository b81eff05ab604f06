// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

/// Primary environment variable naming the node RPC endpoint.
pub const RPC_URL_ENV: &str = "STARKNET_RPC_URL";

/// Endpoint variable set by the devnet docker compose setup, read when [`RPC_URL_ENV`] is unset.
pub const DEVNET_URL_ENV: &str = "STARKNET_DEVNET_URL";

pub const ACCOUNT_ADDRESS_ENV: &str = "STARKNET_ACCOUNT_ADDRESS";
pub const PRIVATE_KEY_ENV: &str = "STARKNET_PRIVATE_KEY";
