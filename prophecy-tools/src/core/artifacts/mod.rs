// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! Compiler output: the build manifest and the per-contract Sierra/CASM pairs it points to.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::core::build::CompilerConfig;

pub use extract::{extract, ArtifactPair, ArtifactShape, ExtractError};
pub use locator::{ArtifactLocator, SearchPaths};

pub mod extract;
pub mod load;
pub mod locator;

/// Suffix of the aggregate manifest Scarb writes next to the compiled classes.
pub const MANIFEST_SUFFIX: &str = ".starknet_artifacts.json";
/// Suffix of a Sierra (high level) contract class file.
pub const SIERRA_SUFFIX: &str = ".contract_class.json";
/// Suffix of a CASM (low level) compiled contract class file.
pub const CASM_SUFFIX: &str = ".compiled_contract_class.json";

/// Identifies one compiled unit in a build manifest. Not stable across builds.
pub type ContractKey = String;

/// One compiled unit's payload, in any of the shapes understood by [`extract`].
pub type ContractArtifact = Value;

#[derive(Clone, Debug)]
pub struct ArtifactConfig {
    /// Root of the compiler output, relative to the project root.
    pub target_dir: PathBuf,
    pub manifest_suffix: String,
    /// Also search the immediate subdirectories of the standard output directories.
    pub scan_subdirectories: bool,
    /// Compiler run once when no manifest is found; `None` disables the retry.
    pub compiler: Option<CompilerConfig>,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("target"),
            manifest_suffix: MANIFEST_SUFFIX.to_owned(),
            scan_subdirectories: true,
            compiler: Some(CompilerConfig::default()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse build manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid build manifest {0}: it contains no contracts, rebuild with `scarb build`")]
    EmptyManifest(PathBuf),
    #[error("could not find a `*{suffix}` build manifest in {searched}; make sure contracts are built with `scarb build`")]
    NotFound { suffix: String, searched: String },
}

/// Root artifact descriptor produced by the compiler.
#[derive(Clone, Debug)]
pub struct BuildManifest {
    path: PathBuf,
    contracts: Map<ContractKey, ContractArtifact>,
}

impl BuildManifest {
    /// Builds a manifest from parsed JSON, rejecting manifests without contracts.
    ///
    /// `contracts` may be a key → artifact object, or the array of entries Scarb emits, in
    /// which case entries are keyed by `module_path`, `id`, then `contract_name`.
    pub fn from_value(path: impl Into<PathBuf>, value: Value) -> Result<Self, LocateError> {
        let path = path.into();
        let contracts = match value {
            Value::Object(mut root) => match root.remove("contracts") {
                Some(Value::Object(contracts)) => contracts,
                Some(Value::Array(entries)) => key_entries(entries),
                _ => Map::new(),
            },
            _ => Map::new(),
        };
        if contracts.is_empty() {
            return Err(LocateError::EmptyManifest(path));
        }
        Ok(Self { path, contracts })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Contract keys in manifest order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.contracts.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&ContractArtifact> {
        self.contracts.get(key)
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

fn key_entries(entries: Vec<Value>) -> Map<ContractKey, ContractArtifact> {
    let mut contracts = Map::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let key = ["module_path", "id", "contract_name"]
            .iter()
            .find_map(|field| entry.get(*field).and_then(Value::as_str))
            .map(str::to_owned)
            .unwrap_or_else(|| index.to_string());
        contracts.insert(key, entry);
    }
    contracts
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn object_contracts_keep_file_order() {
        let manifest = BuildManifest::from_value(
            "target/dev/p.starknet_artifacts.json",
            json!({ "contracts": { "zeta": {}, "alpha": {}, "mid": {} } }),
        )
        .unwrap();
        assert_eq!(manifest.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
        assert_eq!(manifest.dir(), Path::new("target/dev"));
    }

    #[test]
    fn scarb_array_entries_are_keyed_by_module_path() {
        let manifest = BuildManifest::from_value(
            "m.json",
            json!({
                "version": 1,
                "contracts": [
                    {
                        "id": "abc",
                        "package_name": "prophecy_sunya",
                        "contract_name": "PredictionMarket",
                        "module_path": "prophecy_sunya::prediction::PredictionMarket",
                        "artifacts": { "sierra": "a.json", "casm": "b.json" }
                    },
                    { "id": "def" },
                    { "contract_name": "Bridge" },
                    {}
                ]
            }),
        )
        .unwrap();
        assert_eq!(
            manifest.keys().collect::<Vec<_>>(),
            [
                "prophecy_sunya::prediction::PredictionMarket",
                "def",
                "Bridge",
                "3"
            ]
        );
    }

    #[test]
    fn missing_or_empty_contracts_are_rejected() {
        for value in [
            json!({}),
            json!({ "contracts": {} }),
            json!({ "contracts": [] }),
            json!({ "contracts": 3 }),
            json!([]),
        ] {
            assert!(matches!(
                BuildManifest::from_value("m.json", value),
                Err(LocateError::EmptyManifest(_))
            ));
        }
    }
}
