// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! Offline preview of how each role maps onto the current build output.

use std::path::{Path, PathBuf};

use crate::{
    core::{
        artifacts::{self, ArtifactConfig, ArtifactLocator, ArtifactShape, BuildManifest},
        diagnostics::Diagnostics,
        resolver::{self, Matcher},
        role::ContractRole,
    },
    error::Result,
};

#[derive(Debug)]
pub struct ResolvedRole {
    pub role: ContractRole,
    /// Manifest key and the matcher that picked it.
    pub key: Option<(String, Matcher)>,
    pub shape: Option<ArtifactShape>,
    /// Extraction failure for the resolved entry.
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct Resolution {
    pub manifest: PathBuf,
    pub roles: Vec<ResolvedRole>,
}

/// Locates the build manifest without compiling and resolves `roles` against it.
pub fn resolve(
    project_root: impl AsRef<Path>,
    config: ArtifactConfig,
    roles: &[ContractRole],
) -> Result<Resolution> {
    let locator = ArtifactLocator::new(project_root.as_ref(), config, Diagnostics::disabled());
    let build_manifest = locator.find_existing()?;
    let paths = locator.search_paths(&build_manifest);
    let roles = roles
        .iter()
        .map(|&role| resolve_role(role, &build_manifest, &paths))
        .collect();
    Ok(Resolution {
        manifest: build_manifest.path().to_path_buf(),
        roles,
    })
}

fn resolve_role(
    role: ContractRole,
    build_manifest: &BuildManifest,
    paths: &artifacts::SearchPaths,
) -> ResolvedRole {
    let key = resolver::resolve_with_matcher(role, build_manifest);
    let extracted = key
        .as_ref()
        .and_then(|(key, _)| build_manifest.get(key))
        .map(|artifact| artifacts::extract(artifact, paths));
    let (shape, error) = match extracted {
        Some(Ok(found)) => (found.map(|(shape, _)| shape), None),
        Some(Err(err)) => (None, Some(err.to_string())),
        None => (None, None),
    };
    ResolvedRole {
        role,
        key,
        shape,
        error,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;

    #[test]
    fn resolves_roles_offline() {
        let root = tempfile::tempdir().unwrap();
        let dev = root.path().join("target/dev");
        fs::create_dir_all(&dev).unwrap();
        fs::write(
            dev.join("prophecy_sunya.starknet_artifacts.json"),
            json!({
                "contracts": {
                    "prophecy_sunya_nft": { "sierra": { "a": 1 }, "casm": { "b": 2 } },
                    "prophecy_sunya_oracle": { "sierra": "not json", "casm": { "b": 2 } },
                }
            })
            .to_string(),
        )
        .unwrap();

        let resolution = resolve(
            root.path(),
            ArtifactConfig::default(),
            &[ContractRole::Nft, ContractRole::Oracle, ContractRole::Bridge],
        )
        .unwrap();

        let [nft, oracle, bridge] = &resolution.roles[..] else {
            panic!("three roles expected");
        };
        assert_eq!(
            nft.key,
            Some(("prophecy_sunya_nft".to_owned(), Matcher::Exact))
        );
        assert_eq!(nft.shape, Some(ArtifactShape::Direct));
        assert!(oracle.shape.is_none());
        assert!(oracle.error.is_some());
        assert!(bridge.key.is_none());
    }

    #[test]
    fn never_compiles() {
        let root = tempfile::tempdir().unwrap();
        let config = ArtifactConfig {
            compiler: Some(crate::core::build::CompilerConfig {
                program: "sh".into(),
                args: vec!["-c".into(), "touch compiled".into()],
            }),
            ..Default::default()
        };
        assert!(resolve(root.path(), config, &ContractRole::ALL).is_err());
        assert!(!root.path().join("compiled").exists());
    }
}
