// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::{path::Path, process::Command};

use crate::{core::message::ProcessOutput, utils::sys};

/// External compiler producing the build artifact tree.
#[derive(Clone, Debug)]
pub struct CompilerConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: "scarb".to_owned(),
            args: vec!["build".to_owned()],
        }
    }
}

impl CompilerConfig {
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Errors which can occur while running the contract compiler.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`{command}` failed (exit code: {code:?}): {stderr}", code = .output.exit_code, stderr = .output.stderr.trim())]
    CommandFailure {
        command: String,
        output: ProcessOutput,
    },
}

/// Runs the compiler in `project_root`.
pub fn run_compiler(config: &CompilerConfig, project_root: &Path) -> Result<(), BuildError> {
    let command = config.command_line();
    if !sys::command_exists(&config.program) {
        warn!(@yellow, "`{}` does not answer to --version, trying anyway", config.program);
    }
    info!(@grey, "Running `{command}` in {}", project_root.display());
    let output = Command::new(&config.program)
        .args(&config.args)
        .current_dir(project_root)
        .output()
        .map_err(|source| BuildError::Spawn {
            command: command.clone(),
            source,
        })?;
    let stdout = ProcessOutput::check(&config.program, output)
        .map_err(|output| BuildError::CommandFailure {
            command: command.clone(),
            output,
        })?;
    for line in stdout.lines() {
        debug!(@grey, "{line}");
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CompilerConfig {
        CompilerConfig {
            program: "sh".to_owned(),
            args: vec!["-c".to_owned(), script.to_owned()],
        }
    }

    #[test]
    fn runs_in_project_root() {
        let dir = tempfile::tempdir().unwrap();
        run_compiler(&sh("touch built"), dir.path()).unwrap();
        assert!(dir.path().join("built").exists());
    }

    #[test]
    fn reports_failure_with_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_compiler(&sh("echo broken >&2; exit 3"), dir.path()).unwrap_err();
        match err {
            BuildError::CommandFailure { output, .. } => {
                assert_eq!(output.exit_code, Some(3));
                assert_eq!(output.stderr.trim(), "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let config = CompilerConfig {
            program: "definitely-not-a-compiler".to_owned(),
            args: vec![],
        };
        assert!(matches!(
            run_compiler(&config, dir.path()),
            Err(BuildError::Spawn { .. })
        ));
    }

    #[test]
    fn command_line_joins_args() {
        assert_eq!(CompilerConfig::default().command_line(), "scarb build");
    }
}
