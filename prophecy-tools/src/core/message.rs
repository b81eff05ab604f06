// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

use std::process::Output;

use serde::{Deserialize, Serialize};

/// Captured output of an external process.
#[derive(Debug, Deserialize, Serialize)]
pub struct ProcessOutput {
    pub process_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn new(process_name: impl Into<String>, output: &Output) -> Self {
        Self {
            process_name: process_name.into(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        }
    }

    /// Returns stdout on success, or the full capture on failure.
    pub fn check(process_name: impl Into<String>, output: Output) -> Result<String, Self> {
        let process_output = Self::new(process_name, &output);
        if output.status.success() {
            Ok(process_output.stdout)
        } else {
            Err(process_output)
        }
    }
}
