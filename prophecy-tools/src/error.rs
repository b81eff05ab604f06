// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Node(#[from] crate::core::node::NodeError),
    #[error("{0}")]
    Account(#[from] crate::core::account::AccountError),
    #[error("{0}")]
    Locate(#[from] crate::core::artifacts::LocateError),
    #[error("{0}")]
    Extract(#[from] crate::core::artifacts::ExtractError),
    #[error("{0}")]
    Deployment(#[from] crate::core::deployment::DeploymentError),
    #[error("{0}")]
    Manifest(#[from] crate::core::manifest::ManifestError),
    #[error("{0}")]
    Build(#[from] crate::core::build::BuildError),

    #[error("no contracts were deployed")]
    NothingDeployed,
}
