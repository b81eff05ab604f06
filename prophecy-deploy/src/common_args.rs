// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::{path::PathBuf, time::Duration};

use eyre::bail;
use prophecy_tools::core::{
    account::SigningIdentity,
    artifacts::ArtifactConfig,
    config::DEFAULT_RPC_URL,
    deployment::{chain::DeclareVersion, waiter::WaitConfig, DeploymentConfig},
};

use crate::{
    constants::{ACCOUNT_ADDRESS_ENV, DEVNET_URL_ENV, PRIVATE_KEY_ENV, RPC_URL_ENV},
    utils::parse_compiler,
};

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Starknet node RPC endpoint; falls back to $STARKNET_DEVNET_URL, then the devnet default
    #[arg(short, long, env = RPC_URL_ENV)]
    endpoint: Option<String>,
}

impl ProviderArgs {
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .or_else(|| std::env::var(DEVNET_URL_ENV).ok())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_owned())
    }
}

#[derive(Debug, clap::Args)]
pub struct AuthArgs {
    /// Account used when the node lists no pre-funded accounts
    #[arg(long, env = ACCOUNT_ADDRESS_ENV)]
    account_address: Option<String>,
    /// Private key of --account-address as a hex string. Warning: this exposes your key to shell history
    #[arg(long, env = PRIVATE_KEY_ENV, hide_env_values = true)]
    private_key: Option<String>,
}

impl AuthArgs {
    /// The fallback identity, if one was given.
    pub fn fallback_identity(&self) -> eyre::Result<Option<SigningIdentity>> {
        match (&self.account_address, &self.private_key) {
            (Some(address), Some(key)) => Ok(Some(SigningIdentity::from_hex(address, key)?)),
            (None, None) => Ok(None),
            (Some(_), None) => bail!("--account-address requires --private-key"),
            (None, Some(_)) => bail!("--private-key requires --account-address"),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Root of the Scarb project
    #[arg(long, default_value = ".")]
    pub project_root: PathBuf,
    /// Compiler output directory, relative to the project root
    #[arg(long, default_value = "target")]
    pub target_dir: PathBuf,
    /// Only search the standard output directories, not their subdirectories
    #[arg(long)]
    pub no_scan_subdirectories: bool,
}

impl ArtifactArgs {
    pub fn config(&self) -> ArtifactConfig {
        ArtifactConfig {
            target_dir: self.target_dir.clone(),
            scan_subdirectories: !self.no_scan_subdirectories,
            compiler: None,
            ..Default::default()
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct BuildArgs {
    /// Never run the compiler, even when no build manifest is found
    #[arg(long)]
    no_compile: bool,
    /// Compiler command run once when no build manifest is found
    #[arg(long, default_value = "scarb build")]
    compiler: String,
}

impl BuildArgs {
    pub fn apply(&self, config: &mut ArtifactConfig) -> eyre::Result<()> {
        config.compiler = if self.no_compile {
            None
        } else {
            Some(parse_compiler(&self.compiler)?)
        };
        Ok(())
    }
}

#[derive(Debug, clap::Args)]
pub struct TxArgs {
    /// Seconds to wait for a transaction to be accepted
    #[arg(long, default_value = "120")]
    tx_timeout: u64,
    /// Milliseconds between transaction status polls
    #[arg(long, default_value = "1000")]
    poll_interval: u64,
    /// Transaction version used to declare classes
    #[arg(long, value_enum, default_value_t = DeclareVersion::V3)]
    declare_version: DeclareVersion,
    /// Do not retry a refused declare with the older transaction version
    #[arg(long)]
    no_version_fallback: bool,
}

impl TxArgs {
    pub fn config(&self) -> eyre::Result<DeploymentConfig> {
        if self.poll_interval == 0 {
            bail!("--poll-interval must be positive");
        }
        Ok(DeploymentConfig {
            declare_version: self.declare_version,
            version_fallback: !self.no_version_fallback,
            wait: WaitConfig {
                poll_interval: Duration::from_millis(self.poll_interval),
                timeout: Duration::from_secs(self.tx_timeout),
            },
            ..Default::default()
        })
    }
}
