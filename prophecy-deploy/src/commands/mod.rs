// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use crate::error::DeployCliResult;

mod deploy;
mod resolve;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Declare and deploy the contracts, writing the deployment manifest
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// Show which build output each contract resolves to, without compiling or deploying
    #[clap(visible_alias = "r")]
    Resolve(resolve::Args),
}

pub async fn exec(cmd: Command) -> DeployCliResult {
    match cmd {
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Resolve(args) => resolve::exec(args),
    }
}
