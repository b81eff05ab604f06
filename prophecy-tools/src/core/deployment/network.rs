// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! [`Chain`] backed by a Starknet JSON-RPC node.

use std::sync::Arc;

use starknet::{
    accounts::{Account, AccountError, ExecutionEncoding, SingleOwnerAccount},
    contract::ContractFactory,
    core::types::{
        contract::{CompiledClass, SierraClass},
        BlockId, BlockTag, Felt, FlattenedSierraClass, StarknetError, TransactionExecutionStatus,
        TransactionStatus,
    },
    providers::{Provider, ProviderError},
    signers::{LocalWallet, SigningKey},
};

use super::{
    chain::{Chain, DeclareVersion, SubmittedDeploy, TxStatus},
    DeploymentError,
};
use crate::core::{
    account::SigningIdentity,
    artifacts::ArtifactPair,
    node::{Node, RpcProvider},
};

type NodeAccount = SingleOwnerAccount<RpcProvider, LocalWallet>;

pub struct StarknetChain {
    provider: RpcProvider,
    account: NodeAccount,
}

impl StarknetChain {
    pub fn new(node: &Node, identity: &SigningIdentity) -> Self {
        let signer =
            LocalWallet::from_signing_key(SigningKey::from_secret_scalar(identity.private_key));
        let mut account = SingleOwnerAccount::new(
            node.provider().clone(),
            signer,
            identity.address,
            node.chain_id(),
            ExecutionEncoding::New,
        );
        // Nonces must account for transactions sent earlier in the same run.
        account.set_block_id(BlockId::Tag(BlockTag::Pending));
        Self {
            provider: node.provider().clone(),
            account,
        }
    }
}

impl Chain for StarknetChain {
    fn class_hash(&self, pair: &ArtifactPair) -> Result<Felt, DeploymentError> {
        sierra_class(pair)?
            .class_hash()
            .map_err(|err| DeploymentError::ClassHash(err.to_string()))
    }

    async fn is_declared(&self, class_hash: Felt) -> Result<bool, DeploymentError> {
        match self
            .provider
            .get_class(BlockId::Tag(BlockTag::Pending), class_hash)
            .await
        {
            Ok(_) => Ok(true),
            Err(ProviderError::StarknetError(StarknetError::ClassHashNotFound)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn declare(
        &self,
        pair: &ArtifactPair,
        version: DeclareVersion,
    ) -> Result<Felt, DeploymentError> {
        let flattened = Arc::new(flattened_class(pair)?);
        let compiled_class_hash = compiled_class_hash(pair)?;
        let result = match version {
            DeclareVersion::V3 => {
                self.account
                    .declare_v3(flattened, compiled_class_hash)
                    .send()
                    .await
            }
            #[allow(deprecated)]
            DeclareVersion::V2 => {
                self.account
                    .declare_v2(flattened, compiled_class_hash)
                    .send()
                    .await
            }
        };
        match result {
            Ok(declared) => Ok(declared.transaction_hash),
            Err(err) => Err(account_error(err, Some(version))),
        }
    }

    async fn deploy(
        &self,
        class_hash: Felt,
        salt: Felt,
        constructor_calldata: Vec<Felt>,
        unique: bool,
    ) -> Result<SubmittedDeploy, DeploymentError> {
        let factory = ContractFactory::new(class_hash, self.account.clone());
        let deployment = factory.deploy_v3(constructor_calldata, salt, unique);
        let address = deployment.deployed_address();
        let sent = deployment
            .send()
            .await
            .map_err(|err| account_error(err, None))?;
        Ok(SubmittedDeploy {
            address,
            transaction_hash: sent.transaction_hash,
        })
    }

    async fn transaction_status(
        &self,
        transaction_hash: Felt,
    ) -> Result<TxStatus, DeploymentError> {
        match self.provider.get_transaction_status(transaction_hash).await {
            Ok(status) => Ok(tx_status(status)),
            Err(ProviderError::StarknetError(StarknetError::TransactionHashNotFound)) => {
                Ok(TxStatus::Pending)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn sierra_class(pair: &ArtifactPair) -> Result<SierraClass, DeploymentError> {
    serde_json::from_value(pair.high_level.clone())
        .map_err(|err| DeploymentError::InvalidClass(format!("sierra: {err}")))
}

fn flattened_class(pair: &ArtifactPair) -> Result<FlattenedSierraClass, DeploymentError> {
    sierra_class(pair)?
        .flatten()
        .map_err(|err| DeploymentError::InvalidClass(format!("sierra: {err}")))
}

fn compiled_class_hash(pair: &ArtifactPair) -> Result<Felt, DeploymentError> {
    let compiled: CompiledClass = serde_json::from_value(pair.low_level.clone())
        .map_err(|err| DeploymentError::InvalidClass(format!("casm: {err}")))?;
    compiled
        .class_hash()
        .map_err(|err| DeploymentError::ClassHash(err.to_string()))
}

fn tx_status(status: TransactionStatus) -> TxStatus {
    match status {
        TransactionStatus::Received => TxStatus::Pending,
        TransactionStatus::Rejected => TxStatus::Rejected,
        TransactionStatus::AcceptedOnL2(execution) | TransactionStatus::AcceptedOnL1(execution) => {
            match execution {
                TransactionExecutionStatus::Succeeded => TxStatus::Accepted,
                TransactionExecutionStatus::Reverted => TxStatus::Reverted,
            }
        }
    }
}

fn account_error<S: std::error::Error>(
    err: AccountError<S>,
    version: Option<DeclareVersion>,
) -> DeploymentError {
    match (err, version) {
        (
            AccountError::Provider(ProviderError::StarknetError(
                StarknetError::UnsupportedTxVersion,
            )),
            Some(version),
        ) => DeploymentError::UnsupportedVersion(version),
        (AccountError::Provider(err), _) => DeploymentError::Provider(err),
        (err, _) => DeploymentError::Account(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_transaction_status() {
        assert_eq!(tx_status(TransactionStatus::Received), TxStatus::Pending);
        assert_eq!(tx_status(TransactionStatus::Rejected), TxStatus::Rejected);
        assert_eq!(
            tx_status(TransactionStatus::AcceptedOnL2(
                TransactionExecutionStatus::Succeeded
            )),
            TxStatus::Accepted
        );
        assert_eq!(
            tx_status(TransactionStatus::AcceptedOnL1(
                TransactionExecutionStatus::Reverted
            )),
            TxStatus::Reverted
        );
    }

    #[test]
    fn unsupported_version_only_for_declares() {
        let unsupported = || {
            AccountError::<std::io::Error>::Provider(ProviderError::StarknetError(
                StarknetError::UnsupportedTxVersion,
            ))
        };
        assert!(matches!(
            account_error(unsupported(), Some(DeclareVersion::V3)),
            DeploymentError::UnsupportedVersion(DeclareVersion::V3)
        ));
        assert!(matches!(
            account_error(unsupported(), None),
            DeploymentError::Provider(_)
        ));
    }

    #[test]
    fn malformed_classes_are_invalid() {
        let pair = ArtifactPair {
            high_level: serde_json::json!({ "abi": "nope" }),
            low_level: serde_json::json!({}),
        };
        assert!(matches!(
            sierra_class(&pair),
            Err(DeploymentError::InvalidClass(_))
        ));
        assert!(matches!(
            compiled_class_hash(&pair),
            Err(DeploymentError::InvalidClass(_))
        ));
    }
}
