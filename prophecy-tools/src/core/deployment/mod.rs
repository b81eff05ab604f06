// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::time::Duration;

use serde::{Deserialize, Serialize};
use starknet::{core::types::Felt, providers::ProviderError};

use crate::{
    core::{artifacts::ArtifactPair, role::ContractRole},
    utils::format_felt,
};
use chain::{Chain, DeclareVersion};
use salt::Salt;
use waiter::{wait_for_acceptance, WaitConfig};

pub mod chain;
pub mod network;
pub mod salt;
pub mod waiter;

#[cfg(test)]
pub(crate) mod testing;

#[derive(Clone, Debug)]
pub struct DeploymentConfig {
    pub declare_version: DeclareVersion,
    /// Retry a declare once with [`DeclareVersion::fallback`] when the node refuses the version.
    pub version_fallback: bool,
    pub wait: WaitConfig,
    pub unique: bool,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            declare_version: DeclareVersion::default(),
            version_fallback: true,
            wait: WaitConfig::default(),
            unique: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Provider(#[from] ProviderError),
    #[error("invalid contract class: {0}")]
    InvalidClass(String),
    #[error("failed to compute class hash: {0}")]
    ClassHash(String),
    #[error("account error: {0}")]
    Account(String),
    #[error("node does not support {0} declare transactions")]
    UnsupportedVersion(DeclareVersion),
    #[error("transaction rejected {transaction_hash:#x}")]
    Rejected { transaction_hash: Felt },
    #[error("transaction reverted {transaction_hash:#x}")]
    Reverted { transaction_hash: Felt },
    #[error("transaction {transaction_hash:#x} not accepted after {}s", .timeout.as_secs())]
    Stuck {
        transaction_hash: Felt,
        timeout: Duration,
    },
}

/// A deployed contract as recorded in the deployment manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResult {
    pub class_hash: String,
    pub address: String,
    pub transaction_hash: String,
}

/// Declares the class of `pair` if the node does not know it yet, then deploys one instance.
pub async fn deploy(
    chain: &impl Chain,
    role: ContractRole,
    pair: &ArtifactPair,
    config: &DeploymentConfig,
) -> Result<DeploymentResult, DeploymentError> {
    let class_hash = chain.class_hash(pair)?;
    debug!(@grey, "{} class hash: {}", role.label(), format_felt(class_hash).lavender());

    if chain.is_declared(class_hash).await? {
        info!(@grey, "{} already declared with class hash {}", role.label(), format_felt(class_hash));
    } else {
        let transaction_hash = declare(chain, pair, config).await?;
        wait_for_acceptance(chain, transaction_hash, &config.wait).await?;
        info!(
            @grey,
            "{} declared with transaction hash {}",
            role.label(),
            format_felt(transaction_hash)
        );
    }

    let salt = Salt::random();
    debug!(@grey, "Deploy salt: {}", salt.to_hex());
    let submitted = chain
        .deploy(class_hash, salt.to_felt(), Vec::new(), config.unique)
        .await?;
    debug!(@grey, "sent deploy tx: {}", format_felt(submitted.transaction_hash).lavender());
    wait_for_acceptance(chain, submitted.transaction_hash, &config.wait).await?;

    Ok(DeploymentResult {
        class_hash: format_felt(class_hash),
        address: format_felt(submitted.address),
        transaction_hash: format_felt(submitted.transaction_hash),
    })
}

async fn declare(
    chain: &impl Chain,
    pair: &ArtifactPair,
    config: &DeploymentConfig,
) -> Result<Felt, DeploymentError> {
    let version = config.declare_version;
    match chain.declare(pair, version).await {
        Err(DeploymentError::UnsupportedVersion(_)) if config.version_fallback => {
            let Some(fallback) = version.fallback() else {
                return Err(DeploymentError::UnsupportedVersion(version));
            };
            warn!(@yellow, "Node refused {version} declare, retrying with {fallback}");
            chain.declare(pair, fallback).await
        }
        result => result,
    }
}
