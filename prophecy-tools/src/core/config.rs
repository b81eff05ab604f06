// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use typed_builder::TypedBuilder;

use crate::core::{
    account::SigningIdentity, artifacts::ArtifactConfig, deployment::DeploymentConfig,
    role::ContractRole,
};

/// Default RPC endpoint of the Starknet devnet inside the docker compose network.
pub const DEFAULT_RPC_URL: &str = "http://starknet-devnet:5050";

/// Default location of the deployment manifest, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "deployments/devnet_latest.json";

/// Default location of diagnostic snapshots, relative to the project root.
pub const DEFAULT_DEBUG_DIR: &str = "temp_debug";

/// Everything needed to run a deployment.
///
/// Environment lookups happen before this is built; nothing below reads the environment.
#[derive(Clone, Debug, TypedBuilder)]
pub struct DeployConfig {
    #[builder(default = DEFAULT_RPC_URL.to_owned(), setter(into))]
    pub rpc_url: String,

    #[builder(default = PathBuf::from("."), setter(into))]
    pub project_root: PathBuf,

    /// Identity used when the node does not list pre-funded accounts.
    #[builder(default, setter(strip_option))]
    pub fallback_account: Option<SigningIdentity>,

    #[builder(default)]
    pub artifacts: ArtifactConfig,

    #[builder(default)]
    pub deployment: DeploymentConfig,

    #[builder(default = ContractRole::ALL.to_vec())]
    pub roles: Vec<ContractRole>,

    #[builder(default = PathBuf::from(DEFAULT_OUTPUT), setter(into))]
    pub output: PathBuf,

    #[builder(default = PathBuf::from(DEFAULT_DEBUG_DIR), setter(into))]
    pub debug_dir: PathBuf,

    #[builder(default = true)]
    pub diagnostics: bool,
}

impl DeployConfig {
    /// Path of the deployment manifest.
    pub fn output_path(&self) -> PathBuf {
        self.project_root.join(&self.output)
    }

    /// Directory diagnostics are written to.
    pub fn debug_path(&self) -> PathBuf {
        self.project_root.join(&self.debug_dir)
    }

    /// Root of the compiler output tree.
    pub fn target_path(&self) -> PathBuf {
        self.project_root.join(&self.artifacts.target_dir)
    }
}
