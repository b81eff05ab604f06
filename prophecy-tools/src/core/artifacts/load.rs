// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! Load-or-parse for artifact values.
//!
//! A manifest field may hold the class itself, the class serialized as a JSON string, or the
//! path of a file containing the class.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use super::{ExtractError, SearchPaths};

/// Resolves a raw manifest value to a JSON object.
pub fn load_or_parse(raw: &Value, paths: &SearchPaths) -> Result<Value, ExtractError> {
    match raw {
        Value::Object(_) => Ok(raw.clone()),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(value @ Value::Object(_)) => Ok(value),
            Ok(_) => Err(ExtractError::InvalidJson(preview(text))),
            Err(_) => match locate(text, paths) {
                Some(path) => read_json(&path),
                None => Err(ExtractError::InvalidJson(preview(text))),
            },
        },
        other => Err(ExtractError::InvalidJson(preview(&other.to_string()))),
    }
}

/// Reads and parses a JSON object from disk.
pub fn read_json(path: &Path) -> Result<Value, ExtractError> {
    let text = fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str::<Value>(&text) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(ExtractError::InvalidJson(path.display().to_string())),
        Err(source) => Err(ExtractError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Treats `text` as a path, then as a bare file name in the search directories.
fn locate(text: &str, paths: &SearchPaths) -> Option<PathBuf> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let direct = Path::new(text);
    if direct.is_absolute() && direct.is_file() {
        return Some(direct.to_path_buf());
    }
    if let Some(found) = paths.find(text) {
        return Some(found);
    }
    let name = direct.file_name()?.to_str()?;
    paths.find(name)
}

fn preview(text: &str) -> String {
    const MAX: usize = 80;
    if text.chars().count() <= MAX {
        text.to_owned()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{head}...")
    }
}
