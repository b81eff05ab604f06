// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use eyre::{Result, WrapErr};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

const DEVNET_IMAGE_NAME: &str = "shardlabs/starknet-devnet-rs";
const DEVNET_IMAGE_TAG: &str = "0.2.4";
const DEVNET_PORT: u16 = 5050;

/// Seed giving reproducible pre-funded accounts.
pub const DEVNET_SEED: &str = "0";

/// Manage a Starknet devnet for deploying contracts.
pub struct Devnet {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Devnet {
    /// Starts a devnet in the background; it is shut down when this struct is dropped.
    pub async fn new() -> Result<Self> {
        let wait_strategy = HttpWaitStrategy::new("/is_alive")
            .with_port(DEVNET_PORT.into())
            .with_expected_status_code(200u16);
        let container = GenericImage::new(DEVNET_IMAGE_NAME, DEVNET_IMAGE_TAG)
            .with_exposed_port(DEVNET_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_cmd(vec!["--seed", DEVNET_SEED, "--accounts", "3"])
            .start()
            .await
            .wrap_err("failed to start devnet container")?;
        let port = container
            .get_host_port_ipv4(DEVNET_PORT)
            .await
            .wrap_err("failed to get devnet RPC port")?;
        Ok(Self {
            _container: container,
            rpc: format!("http://localhost:{port}"),
        })
    }

    /// Get the devnet RPC.
    pub fn rpc(&self) -> &str {
        &self.rpc
    }
}

#[cfg(test)]
mod tests {
    use starknet::core::types::Felt;

    use super::*;
    use crate::core::{
        account,
        deployment::{
            chain::{Chain, TxStatus},
            network::StarknetChain,
        },
        node::Node,
    };

    #[tokio::test]
    async fn devnet_provides_node_and_account() -> Result<()> {
        let devnet = Devnet::new().await?;
        let node = Node::connect(devnet.rpc()).await?;
        let identity = account::provision(node.url(), None, &reqwest::Client::new()).await?;
        let chain = StarknetChain::new(&node, &identity);
        assert_eq!(
            chain.transaction_status(Felt::ONE).await?,
            TxStatus::Pending
        );
        Ok(())
    }
}
