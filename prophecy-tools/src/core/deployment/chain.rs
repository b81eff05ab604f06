// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! The node operations a deployment needs.

use std::fmt;

use starknet::core::types::Felt;

use super::DeploymentError;
use crate::core::artifacts::ArtifactPair;

/// Transaction version used for declare transactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DeclareVersion {
    #[default]
    V3,
    V2,
}

impl DeclareVersion {
    /// The version tried once when the node rejects this one as unsupported.
    pub fn fallback(self) -> Option<Self> {
        match self {
            Self::V3 => Some(Self::V2),
            Self::V2 => None,
        }
    }
}

impl fmt::Display for DeclareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V3 => f.write_str("v3"),
            Self::V2 => f.write_str("v2"),
        }
    }
}

/// Observed state of a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStatus {
    /// Not yet known to the node, or received but not yet in a block.
    Pending,
    /// Included in a block and executed successfully.
    Accepted,
    /// Included in a block but execution reverted.
    Reverted,
    /// Refused by the sequencer.
    Rejected,
}

/// A deploy transaction that was submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmittedDeploy {
    pub address: Felt,
    pub transaction_hash: Felt,
}

/// Node operations used to declare and deploy a class.
///
/// All calls are made sequentially by one signer, so implementations may rely on the account
/// nonce advancing between calls.
#[allow(async_fn_in_trait)]
pub trait Chain {
    /// Computes the class hash of the Sierra half of `pair`.
    fn class_hash(&self, pair: &ArtifactPair) -> Result<Felt, DeploymentError>;

    /// Whether a class with this hash is already declared.
    async fn is_declared(&self, class_hash: Felt) -> Result<bool, DeploymentError>;

    /// Submits a declare transaction, returning its hash.
    ///
    /// Must return [`DeploymentError::UnsupportedVersion`] when the node refuses `version`.
    async fn declare(
        &self,
        pair: &ArtifactPair,
        version: DeclareVersion,
    ) -> Result<Felt, DeploymentError>;

    /// Submits a deploy transaction for a declared class.
    async fn deploy(
        &self,
        class_hash: Felt,
        salt: Felt,
        constructor_calldata: Vec<Felt>,
        unique: bool,
    ) -> Result<SubmittedDeploy, DeploymentError>;

    async fn transaction_status(&self, transaction_hash: Felt)
        -> Result<TxStatus, DeploymentError>;
}
