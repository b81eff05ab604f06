// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use super::{ArtifactConfig, BuildManifest, LocateError};
use crate::{
    core::{build, diagnostics::Diagnostics},
    utils::sys,
};

/// Finds the build manifest in the compiler output tree.
///
/// The layout of that tree drifts between compiler versions, so several directories are tried
/// in a fixed order and every listing is snapshotted.
#[derive(Debug)]
pub struct ArtifactLocator {
    project_root: PathBuf,
    config: ArtifactConfig,
    diagnostics: Diagnostics,
}

impl ArtifactLocator {
    pub fn new(
        project_root: impl Into<PathBuf>,
        config: ArtifactConfig,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            config,
            diagnostics,
        }
    }

    pub fn target(&self) -> PathBuf {
        self.project_root.join(&self.config.target_dir)
    }

    /// Directories searched for the manifest, in priority order.
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        let target = self.target();
        let mut dirs = vec![target.join("dev"), target.join("release"), target.clone()];
        if self.config.scan_subdirectories {
            let roots = dirs.clone();
            for root in roots {
                let Ok(entries) = sys::list_dir(&root) else {
                    continue;
                };
                for entry in entries {
                    if entry.is_dir() && !dirs.contains(&entry) {
                        dirs.push(entry);
                    }
                }
            }
        }
        dirs
    }

    /// Locates and validates the build manifest, running the compiler once if it is missing.
    pub fn find_manifest(&self) -> Result<BuildManifest, LocateError> {
        if let Some(manifest) = self.search()? {
            return Ok(manifest);
        }
        if let Some(compiler) = &self.config.compiler {
            warn!(@yellow, "No build manifest found, running `{}` once", compiler.command_line());
            if let Err(err) = build::run_compiler(compiler, &self.project_root) {
                warn!(@yellow, "Compiler failed: {err}");
            }
            if let Some(manifest) = self.search()? {
                return Ok(manifest);
            }
        }
        Err(LocateError::NotFound {
            suffix: self.config.manifest_suffix.clone(),
            searched: self
                .candidate_dirs()
                .iter()
                .map(|dir| dir.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Locates the manifest without ever invoking the compiler.
    pub fn find_existing(&self) -> Result<BuildManifest, LocateError> {
        self.search()?.ok_or_else(|| LocateError::NotFound {
            suffix: self.config.manifest_suffix.clone(),
            searched: self.target().display().to_string(),
        })
    }

    /// Directories used to resolve artifact files referenced by `manifest`.
    pub fn search_paths(&self, manifest: &BuildManifest) -> SearchPaths {
        let mut dirs = vec![manifest.dir().to_path_buf()];
        for dir in self.candidate_dirs() {
            if !dirs.contains(&dir) {
                dirs.push(dir);
            }
        }
        SearchPaths::new(dirs)
    }

    fn search(&self) -> Result<Option<BuildManifest>, LocateError> {
        debug!(@grey, "Checking for artifacts in: {:?}", self.candidate_dirs());
        for dir in self.candidate_dirs() {
            if !dir.is_dir() {
                continue;
            }
            let entries = sys::list_dir(&dir).map_err(|source| LocateError::Io {
                path: dir.clone(),
                source,
            })?;
            self.diagnostics
                .snapshot_listing(&self.label(&dir), &dir, &entries);

            let Some(path) = entries.iter().find(|path| self.is_manifest(path)) else {
                debug!(@grey, "No *{} file in {}", self.config.manifest_suffix, dir.display());
                continue;
            };
            info!(@grey, "Found artifacts file: {}", path.display());

            let text = fs::read_to_string(path).map_err(|source| LocateError::Io {
                path: path.clone(),
                source,
            })?;
            let value: Value = serde_json::from_str(&text).map_err(|source| LocateError::Parse {
                path: path.clone(),
                source,
            })?;
            self.diagnostics.snapshot_artifacts(path, &value);

            let manifest = BuildManifest::from_value(path.clone(), value)?;
            info!(@grey, "Loaded {} compiled contract(s)", manifest.len());
            return Ok(Some(manifest));
        }
        Ok(None)
    }

    fn is_manifest(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .file_name()
                .map(|name| {
                    name.to_string_lossy()
                        .ends_with(self.config.manifest_suffix.as_str())
                })
                .unwrap_or(false)
    }

    fn label(&self, dir: &Path) -> String {
        dir.strip_prefix(&self.project_root)
            .unwrap_or(dir)
            .display()
            .to_string()
    }
}

/// Ordered directories for resolving artifact files by name.
#[derive(Clone, Debug, Default)]
pub struct SearchPaths {
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Finds the first existing file named `name` in the search directories.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|path| path.is_file())
    }
}
