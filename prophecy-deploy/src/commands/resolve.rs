// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use prophecy_tools::{
    core::role::ContractRole,
    ops::{self, ResolvedRole},
};
use serde_json::{json, Value};

use crate::{
    common_args::ArtifactArgs,
    error::DeployCliResult,
    utils::{DIM, ERROR, OK},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Contracts to resolve; all of them when omitted
    #[arg(long = "role", value_enum, value_name = "ROLE")]
    roles: Vec<ContractRole>,
    /// Print the resolution as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    artifacts: ArtifactArgs,
}

pub fn exec(args: Args) -> DeployCliResult {
    let roles = if args.roles.is_empty() {
        ContractRole::ALL.to_vec()
    } else {
        args.roles.clone()
    };
    let resolution = ops::resolve(
        &args.artifacts.project_root,
        args.artifacts.config(),
        &roles,
    )?;

    if args.json {
        let roles: Vec<Value> = resolution.roles.iter().map(to_json).collect();
        let output = json!({
            "manifest": resolution.manifest.display().to_string(),
            "roles": roles,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{DIM}build manifest: {}{DIM:#}", resolution.manifest.display());
    for resolved in &resolution.roles {
        match (&resolved.key, resolved.shape) {
            (Some((key, matcher)), Some(shape)) => println!(
                "{:<12} {OK}{key}{OK:#} {DIM}({matcher} match, {shape}){DIM:#}",
                resolved.role.label()
            ),
            (Some((key, _)), None) => println!(
                "{:<12} {key} {ERROR}{}{ERROR:#}",
                resolved.role.label(),
                resolved.error.as_deref().unwrap_or("no sierra/casm pair")
            ),
            (None, _) => println!(
                "{:<12} {ERROR}unresolved{ERROR:#}",
                resolved.role.label()
            ),
        }
    }
    Ok(())
}

fn to_json(resolved: &ResolvedRole) -> Value {
    json!({
        "role": resolved.role,
        "key": resolved.key.as_ref().map(|(key, _)| key),
        "matcher": resolved.key.as_ref().map(|(_, matcher)| matcher.to_string()),
        "shape": resolved.shape.map(|shape| shape.to_string()),
        "error": resolved.error,
    })
}
