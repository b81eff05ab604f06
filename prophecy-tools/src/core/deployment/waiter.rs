// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::time::Duration;

use starknet::core::types::Felt;

use super::{
    chain::{Chain, TxStatus},
    DeploymentError,
};
use crate::utils::format_felt;

#[derive(Clone, Copy, Debug)]
pub struct WaitConfig {
    pub poll_interval: Duration,
    /// Upper bound on the wait for one transaction; exceeding it is reported as stuck.
    pub timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Polls until the transaction is accepted, failing on rejection, revert, or timeout.
pub async fn wait_for_acceptance(
    chain: &impl Chain,
    transaction_hash: Felt,
    config: &WaitConfig,
) -> Result<(), DeploymentError> {
    debug!(@grey, "Waiting for transaction {}", format_felt(transaction_hash));
    let poll = async {
        loop {
            match chain.transaction_status(transaction_hash).await? {
                TxStatus::Accepted => return Ok(()),
                TxStatus::Reverted => {
                    return Err(DeploymentError::Reverted { transaction_hash })
                }
                TxStatus::Rejected => {
                    return Err(DeploymentError::Rejected { transaction_hash })
                }
                TxStatus::Pending => tokio::time::sleep(config.poll_interval).await,
            }
        }
    };
    match tokio::time::timeout(config.timeout, poll).await {
        Ok(result) => result,
        Err(_) => Err(DeploymentError::Stuck {
            transaction_hash,
            timeout: config.timeout,
        }),
    }
}
