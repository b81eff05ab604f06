// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! Forensic snapshots written when things go wrong.
//!
//! Everything here is best effort: a failed write is logged and otherwise ignored, so the
//! recorder can be called from any error path without changing its outcome.

use std::{
    error::Error as StdError,
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{json, Value};

use crate::{core::role::ContractRole, utils::sys};

/// Substrings of environment variable names whose values are never written to disk.
const SECRET_MARKERS: &[&str] = &["KEY", "SECRET", "PASSWORD", "TOKEN", "MNEMONIC"];

#[derive(Clone, Debug)]
pub struct Diagnostics {
    dir: PathBuf,
    enabled: bool,
}

impl Diagnostics {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            dir: PathBuf::new(),
            enabled: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Records the entries of a directory that was searched.
    pub fn snapshot_listing(&self, label: &str, dir: &Path, entries: &[PathBuf]) {
        let files: Vec<String> = entries
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        self.write(
            &format!("listing_{}.json", sanitize(label)),
            &json!({
                "directory": dir.display().to_string(),
                "files": files,
                "timestamp": timestamp(),
            }),
        );
    }

    /// Records raw build manifest content exactly as parsed.
    pub fn snapshot_artifacts(&self, source: &Path, content: &Value) {
        self.write("artifact_content.json", content);
        self.write(
            "artifact_source.json",
            &json!({ "path": source.display().to_string(), "timestamp": timestamp() }),
        );
    }

    /// Records why a single role failed.
    pub fn record_role_failure(&self, role: ContractRole, err: &(dyn StdError + 'static)) {
        self.write(
            &format!("error_{}.json", role.name()),
            &json!({
                "contract_type": role.name(),
                "error": err.to_string(),
                "error_chain": error_chain(err),
                "debug": format!("{err:?}"),
                "timestamp": timestamp(),
            }),
        );
    }

    /// Records a fatal failure along with the filesystem and environment around it.
    pub fn record_failure(
        &self,
        stage: &str,
        err: &(dyn StdError + 'static),
        target: &Path,
    ) {
        let context = FailureContext {
            stage,
            error: err.to_string(),
            error_chain: error_chain(err),
            timestamp: timestamp(),
            working_directory: std::env::current_dir()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            target_directory: target.display().to_string(),
            target_listing: sys::list_tree(target),
            environment: redacted_env(std::env::vars()),
        };
        self.write("failure_context.json", &context);
    }

    fn write(&self, name: &str, value: &impl Serialize) {
        if !self.enabled {
            return;
        }
        let path = self.dir.join(name);
        let result = fs::create_dir_all(&self.dir)
            .and_then(|_| serde_json::to_string_pretty(value).map_err(Into::into))
            .and_then(|text| fs::write(&path, text));
        match result {
            Ok(()) => debug!(@grey, "Wrote diagnostics: {}", path.display()),
            Err(err) => warn!(@yellow, "Could not write diagnostics {}: {err}", path.display()),
        }
    }
}

#[derive(Serialize)]
struct FailureContext<'a> {
    stage: &'a str,
    error: String,
    error_chain: Vec<String>,
    timestamp: String,
    working_directory: String,
    target_directory: String,
    target_listing: Vec<String>,
    environment: serde_json::Map<String, Value>,
}

/// The error followed by each of its sources.
pub fn error_chain(err: &(dyn StdError + 'static)) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut source = err.source();
    while let Some(err) = source {
        chain.push(err.to_string());
        source = err.source();
    }
    chain
}

fn redacted_env(vars: impl Iterator<Item = (String, String)>) -> serde_json::Map<String, Value> {
    let mut vars: Vec<_> = vars.collect();
    vars.sort();
    vars.into_iter()
        .map(|(name, value)| {
            let upper = name.to_uppercase();
            let value = if SECRET_MARKERS.iter().any(|marker| upper.contains(marker)) {
                "<redacted>".to_owned()
            } else {
                value
            };
            (name, Value::String(value))
        })
        .collect()
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
