// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! Signing identity selection.
//!
//! Devnet exposes its pre-funded accounts over plain HTTP. When that endpoint is missing (for
//! example on a non-devnet node) an identity supplied by the operator is used instead.

use std::fmt;

use serde::Deserialize;
use starknet::core::types::Felt;
use url::Url;

use crate::utils::{format_felt, parse_felt, truncate_secret};

/// Path of the devnet endpoint listing pre-funded accounts.
pub const PREDEPLOYED_ACCOUNTS_PATH: &str = "predeployed_accounts";

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("no account available: the node lists no pre-funded accounts and no fallback account is configured")]
    NoAccountAvailable,
    #[error("invalid {field}: {reason}")]
    InvalidFelt { field: &'static str, reason: String },
}

/// Address and key signing declare and deploy transactions for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningIdentity {
    pub address: Felt,
    pub private_key: Felt,
}

impl SigningIdentity {
    pub fn from_hex(address: &str, private_key: &str) -> Result<Self, AccountError> {
        let address = parse_felt(address).map_err(|reason| AccountError::InvalidFelt {
            field: "account address",
            reason,
        })?;
        let private_key = parse_felt(private_key).map_err(|reason| AccountError::InvalidFelt {
            field: "private key",
            reason,
        })?;
        Ok(Self {
            address,
            private_key,
        })
    }
}

impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("address", &format_felt(self.address))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// An entry of the devnet `/predeployed_accounts` response.
#[derive(Debug, Deserialize)]
pub struct PredeployedAccount {
    pub address: String,
    pub private_key: String,
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Picks the identity used for this run: the node's first pre-funded account, else `fallback`.
pub async fn provision(
    node_url: &Url,
    fallback: Option<&SigningIdentity>,
    http: &reqwest::Client,
) -> Result<SigningIdentity, AccountError> {
    info!(@grey, "Fetching pre-funded accounts from {node_url}...");
    let predeployed = fetch_predeployed(node_url, http).await.and_then(|account| {
        SigningIdentity::from_hex(&account.address, &account.private_key)
            .map(|identity| (account, identity))
            .map_err(|err| format!("unusable pre-funded account: {err}"))
    });
    match predeployed {
        Ok((account, identity)) => {
            info!(@grey, "Using pre-funded account: {}", account.address);
            debug!(@grey, "Private key: {}", truncate_secret(&account.private_key));
            Ok(identity)
        }
        Err(reason) => {
            warn!(@yellow, "No pre-funded account from node ({reason}), using fallback account");
            let identity = fallback.cloned().ok_or(AccountError::NoAccountAvailable)?;
            info!(@grey, "Using fallback account: {}", format_felt(identity.address));
            Ok(identity)
        }
    }
}

async fn fetch_predeployed(
    node_url: &Url,
    http: &reqwest::Client,
) -> Result<PredeployedAccount, String> {
    let endpoint = predeployed_accounts_url(node_url)?;
    let response = http
        .get(endpoint.clone())
        .send()
        .await
        .map_err(|err| format!("request to {endpoint} failed: {err}"))?;
    let status = response.status();
    debug!(@grey, "Response status from {endpoint}: {status}");
    if !status.is_success() {
        return Err(format!("{endpoint} returned {status}"));
    }
    let accounts: Vec<PredeployedAccount> = response
        .json()
        .await
        .map_err(|err| format!("could not decode accounts: {err}"))?;
    accounts
        .into_iter()
        .next()
        .ok_or_else(|| "account list is empty".to_owned())
}

fn predeployed_accounts_url(node_url: &Url) -> Result<Url, String> {
    let mut base = node_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PREDEPLOYED_ACCOUNTS_PATH)
        .map_err(|err| format!("invalid accounts url: {err}"))
}
