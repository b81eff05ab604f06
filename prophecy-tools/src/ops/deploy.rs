// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use std::{error::Error as StdError, path::PathBuf};

use crate::{
    core::{
        account,
        artifacts::{self, ArtifactLocator, BuildManifest, ExtractError, SearchPaths},
        config::DeployConfig,
        deployment::{
            self, chain::Chain, network::StarknetChain, DeploymentConfig, DeploymentError,
            DeploymentResult,
        },
        diagnostics::Diagnostics,
        manifest::DeploymentManifest,
        node::Node,
        resolver,
        role::ContractRole,
    },
    error::{Error, Result},
    utils::color::Color,
};

/// Why one role was not deployed.
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("no build manifest entry matches {0}")]
    Unresolved(ContractRole),
    #[error("entry {key:?} has no recognised sierra/casm layout")]
    NoArtifacts { key: String },
    #[error("{0}")]
    Extract(#[from] ExtractError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
}

#[derive(Debug)]
pub struct RoleFailure {
    pub role: ContractRole,
    pub error: RoleError,
}

/// Outcome of a run with at least one deployed contract.
#[derive(Debug)]
pub struct DeploymentReport {
    pub manifest: DeploymentManifest,
    pub failures: Vec<RoleFailure>,
    pub output: PathBuf,
}

/// Connects, provisions an account, locates artifacts, then deploys every configured role.
///
/// Pre-flight failures are fatal and recorded to diagnostics. Per-role failures are collected
/// in the report; the manifest is written either way and an empty one is
/// [`Error::NothingDeployed`].
pub async fn deploy(config: &DeployConfig) -> Result<DeploymentReport> {
    let diagnostics = if config.diagnostics {
        Diagnostics::new(config.debug_path())
    } else {
        Diagnostics::disabled()
    };
    let target = config.target_path();
    let fatal = |stage: &str, err: &(dyn StdError + 'static)| {
        error!(@red, "{stage} failed: {err}");
        diagnostics.record_failure(stage, err, &target);
    };

    let node = Node::connect(&config.rpc_url)
        .await
        .inspect_err(|err| fatal("connect", err))?;

    let http = reqwest::Client::new();
    let identity = account::provision(node.url(), config.fallback_account.as_ref(), &http)
        .await
        .inspect_err(|err| fatal("account", err))?;

    let locator = ArtifactLocator::new(
        &config.project_root,
        config.artifacts.clone(),
        diagnostics.clone(),
    );
    let build_manifest = locator
        .find_manifest()
        .inspect_err(|err| fatal("locate", err))?;
    info!(
        @grey,
        "Found build manifest {} with {} contracts",
        build_manifest.path().display(),
        build_manifest.len()
    );
    let paths = locator.search_paths(&build_manifest);

    let chain = StarknetChain::new(&node, &identity);
    let (manifest, failures) = deploy_roles(
        &chain,
        &build_manifest,
        &paths,
        &config.roles,
        &config.deployment,
        &diagnostics,
    )
    .await;

    let output = config.output_path();
    manifest
        .write(&output)
        .inspect_err(|err| fatal("write", err))?;
    print_summary(&manifest, &failures);

    if manifest.is_empty() {
        return Err(Error::NothingDeployed);
    }
    Ok(DeploymentReport {
        manifest,
        failures,
        output,
    })
}

/// Deploys `roles` in order; a failing role is recorded and never stops the others.
pub async fn deploy_roles(
    chain: &impl Chain,
    build_manifest: &BuildManifest,
    paths: &SearchPaths,
    roles: &[ContractRole],
    config: &DeploymentConfig,
    diagnostics: &Diagnostics,
) -> (DeploymentManifest, Vec<RoleFailure>) {
    let mut manifest = DeploymentManifest::default();
    let mut failures = Vec::new();
    for &role in roles {
        info!(@grey, "Deploying {} contract...", role.label());
        match deploy_role(chain, role, build_manifest, paths, config).await {
            Ok(result) => {
                info!(@grey, "{} deployed at {}", role.label(), result.address);
                manifest.insert(role, result);
            }
            Err(error) => {
                warn!(@yellow, "Skipping {}: {error}", role.label());
                diagnostics.record_role_failure(role, &error);
                failures.push(RoleFailure { role, error });
            }
        }
    }
    (manifest, failures)
}

async fn deploy_role(
    chain: &impl Chain,
    role: ContractRole,
    build_manifest: &BuildManifest,
    paths: &SearchPaths,
    config: &DeploymentConfig,
) -> Result<DeploymentResult, RoleError> {
    let key = resolver::resolve_key(role, build_manifest).ok_or(RoleError::Unresolved(role))?;
    let artifact = build_manifest
        .get(&key)
        .ok_or_else(|| RoleError::NoArtifacts { key: key.clone() })?;
    let (_, pair) =
        artifacts::extract(artifact, paths)?.ok_or_else(|| RoleError::NoArtifacts { key })?;
    Ok(deployment::deploy(chain, role, &pair, config).await?)
}

fn print_summary(manifest: &DeploymentManifest, failures: &[RoleFailure]) {
    info!(@grey, "Deployment summary:");
    for (role, result) in manifest.iter() {
        mintln!("  {:<12} {}", role.label(), result.address);
    }
    for failure in failures {
        println!("  {:<12} {}", failure.role.label(), failure.error.to_string().red());
    }
}
