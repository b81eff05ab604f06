// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::sync::Arc;

use starknet::{
    core::{types::Felt, utils::parse_cairo_short_string},
    providers::{
        jsonrpc::{HttpTransport, JsonRpcClient},
        Provider, ProviderError,
    },
};
use url::Url;

use crate::utils::format_felt;

pub type RpcProvider = Arc<JsonRpcClient<HttpTransport>>;

#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("invalid node url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("node at {url} is unreachable: {source}")]
    Unreachable {
        url: String,
        source: ProviderError,
    },
}

/// A live connection to a Starknet node.
#[derive(Debug, Clone)]
pub struct Node {
    url: Url,
    provider: RpcProvider,
    chain_id: Felt,
}

impl Node {
    /// Connects to the node and checks it is alive by asking for its chain id.
    pub async fn connect(url: &str) -> Result<Self, NodeError> {
        let parsed = Url::parse(url).map_err(|source| NodeError::InvalidUrl {
            url: url.to_owned(),
            source,
        })?;
        info!(@grey, "Connecting to Starknet node at {parsed}...");
        let provider = Arc::new(JsonRpcClient::new(HttpTransport::new(parsed.clone())));
        let chain_id = provider
            .chain_id()
            .await
            .map_err(|source| NodeError::Unreachable {
                url: url.to_owned(),
                source,
            })?;
        info!(@grey, "Connected to chain {}", display_chain_id(chain_id));
        Ok(Self {
            url: parsed,
            provider,
            chain_id,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn provider(&self) -> &RpcProvider {
        &self.provider
    }

    pub fn chain_id(&self) -> Felt {
        self.chain_id
    }
}

/// Chain ids are short strings such as `SN_SEPOLIA`; fall back to hex otherwise.
pub fn display_chain_id(chain_id: Felt) -> String {
    match parse_cairo_short_string(&chain_id) {
        Ok(name) if !name.is_empty() => name,
        _ => format_felt(chain_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_displays_as_short_string() {
        let sepolia = Felt::from_bytes_be_slice(b"SN_SEPOLIA");
        assert_eq!(display_chain_id(sepolia), "SN_SEPOLIA");
        assert_eq!(display_chain_id(Felt::ZERO), "0x0");
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        let err = Node::connect("not a url").await.unwrap_err();
        assert!(matches!(err, NodeError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn unreachable_node_is_an_error() {
        // Port 9 (discard) is not expected to host a JSON-RPC server.
        let err = Node::connect("http://127.0.0.1:9").await.unwrap_err();
        assert!(matches!(err, NodeError::Unreachable { .. }));
    }
}
