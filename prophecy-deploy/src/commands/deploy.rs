// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use prophecy_tools::{
    core::{
        config::{DeployConfig, DEFAULT_DEBUG_DIR, DEFAULT_OUTPUT},
        role::ContractRole,
    },
    ops,
};

use crate::{
    common_args::{ArtifactArgs, AuthArgs, BuildArgs, ProviderArgs, TxArgs},
    error::DeployCliResult,
    utils::{DIM, OK},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contracts to deploy, in order; all of them when omitted
    #[arg(long = "role", value_enum, value_name = "ROLE")]
    roles: Vec<ContractRole>,
    /// Deployment manifest path, relative to the project root
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Diagnostics directory, relative to the project root
    #[arg(long, default_value = DEFAULT_DEBUG_DIR)]
    debug_dir: PathBuf,
    /// Do not write diagnostic snapshots
    #[arg(long)]
    no_diagnostics: bool,

    #[command(flatten)]
    artifacts: ArtifactArgs,
    #[command(flatten)]
    auth: AuthArgs,
    #[command(flatten)]
    build: BuildArgs,
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(flatten)]
    tx: TxArgs,
}

impl Args {
    fn config(&self) -> eyre::Result<DeployConfig> {
        let mut artifacts = self.artifacts.config();
        self.build.apply(&mut artifacts)?;
        let roles = if self.roles.is_empty() {
            ContractRole::ALL.to_vec()
        } else {
            self.roles.clone()
        };
        let mut config = DeployConfig::builder()
            .rpc_url(self.provider.endpoint())
            .project_root(self.artifacts.project_root.clone())
            .artifacts(artifacts)
            .deployment(self.tx.config()?)
            .roles(roles)
            .output(self.output.clone())
            .debug_dir(self.debug_dir.clone())
            .diagnostics(!self.no_diagnostics)
            .build();
        config.fallback_account = self.auth.fallback_identity()?;
        Ok(config)
    }
}

pub async fn exec(args: Args) -> DeployCliResult {
    let config = args.config()?;
    let report = ops::deploy(&config).await?;
    println!(
        "{OK}Deployed {} of {} contracts{OK:#} {DIM}({}){DIM:#}",
        report.manifest.len(),
        config.roles.len(),
        report.output.display()
    );
    Ok(())
}
