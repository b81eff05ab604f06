// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! The deployment manifest consumed by the rest of the stack.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::{deployment::DeploymentResult, role::ContractRole};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to write deployment manifest {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read deployment manifest {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid deployment manifest {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Role to deployed contract, keyed by the camelCase role name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentManifest {
    contracts: BTreeMap<ContractRole, DeploymentResult>,
}

impl DeploymentManifest {
    pub fn insert(&mut self, role: ContractRole, result: DeploymentResult) {
        self.contracts.insert(role, result);
    }

    pub fn get(&self, role: ContractRole) -> Option<&DeploymentResult> {
        self.contracts.get(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContractRole, &DeploymentResult)> {
        self.contracts.iter().map(|(role, result)| (*role, result))
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Writes the manifest as pretty JSON, replacing any previous file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let path = path.as_ref();
        let write_err = |source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(write_err)?;
        info!(@grey, "Deployment info saved to {}", path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn result(n: u8) -> DeploymentResult {
        DeploymentResult {
            class_hash: format!("0x{n}1"),
            address: format!("0x{n}2"),
            transaction_hash: format!("0x{n}3"),
        }
    }

    #[test]
    fn writes_camel_case_roles_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployments/devnet_latest.json");
        let mut manifest = DeploymentManifest::default();
        manifest.insert(ContractRole::Bridge, result(6));
        manifest.insert(ContractRole::GasTank, result(3));
        manifest.insert(ContractRole::Prediction, result(1));
        manifest.write(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains('\n'), "pretty printed");
        let value: Value = serde_json::from_str(&raw).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["prediction", "gasTank", "bridge"]);
        assert_eq!(
            value["gasTank"],
            json!({ "classHash": "0x31", "address": "0x32", "transactionHash": "0x33" })
        );
        assert_eq!(DeploymentManifest::load(&path).unwrap(), manifest);
    }

    #[test]
    fn empty_manifest_is_an_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        DeploymentManifest::default().write(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn overwrites_previous_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, r#"{"stale": true, "padding": "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx"}"#)
            .unwrap();
        let mut manifest = DeploymentManifest::default();
        manifest.insert(ContractRole::Nft, result(2));
        manifest.write(&path).unwrap();
        let loaded = DeploymentManifest::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.get(ContractRole::Nft).is_some());
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            DeploymentManifest::load(&path),
            Err(ManifestError::Json { .. })
        ));
    }
}
