// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

//! Extraction of the Sierra/CASM pair from a manifest entry.
//!
//! Compiler versions disagree on where the two classes live inside an entry. Each known layout
//! is an [`ArtifactShape`] with its own extraction function; shapes are tried in
//! [`ArtifactShape::ALL`] order and the first one yielding both halves wins.

use std::{fmt, path::PathBuf};

use serde_json::{Map, Value};

use super::{
    load::{load_or_parse, read_json},
    SearchPaths, CASM_SUFFIX, SIERRA_SUFFIX,
};

const CANONICAL_FIELDS: (&str, &str) = ("sierra", "casm");
const PROGRAM_FIELDS: (&str, &str) = ("sierra_program", "casm_program");
const TAG_FIELDS: &[&str] = &["type", "name", "kind"];
const CONTENT_FIELDS: &[&str] = &["content", "value", "data"];

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The two build outputs needed to declare a class.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtifactPair {
    /// Sierra contract class, used for the class hash and the declare payload.
    pub high_level: Value,
    /// CASM compiled contract class, declared alongside the Sierra class.
    pub low_level: Value,
}

/// Known layouts of a manifest entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactShape {
    /// `{ "sierra": .., "casm": .. }`
    Direct,
    /// `{ "sierra_program": .., "casm_program": .. }`
    AliasedFields,
    /// Either of the above one level down, e.g. `{ "artifacts": { "sierra": .., "casm": .. } }`
    Nested,
    /// `{ "artifacts": [{ "type": "sierra", "content": .. }, { "type": "casm", "content": .. }] }`
    ArrayOfEntries,
    /// `<contract_name>.contract_class.json` next to `<contract_name>.compiled_contract_class.json`
    SiblingFiles,
}

impl ArtifactShape {
    pub const ALL: [ArtifactShape; 5] = [
        ArtifactShape::Direct,
        ArtifactShape::AliasedFields,
        ArtifactShape::Nested,
        ArtifactShape::ArrayOfEntries,
        ArtifactShape::SiblingFiles,
    ];

    /// Extracts the pair if `artifact` has this shape.
    pub fn extract(
        self,
        artifact: &Value,
        paths: &SearchPaths,
    ) -> Result<Option<ArtifactPair>, ExtractError> {
        let Some(entry) = artifact.as_object() else {
            return Ok(None);
        };
        match self {
            Self::Direct => load_fields(entry, CANONICAL_FIELDS, paths),
            Self::AliasedFields => load_fields(entry, PROGRAM_FIELDS, paths),
            Self::Nested => nested(entry, paths),
            Self::ArrayOfEntries => array_of_entries(entry, paths),
            Self::SiblingFiles => sibling_files(entry, paths),
        }
    }
}

impl fmt::Display for ArtifactShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Direct => "direct fields",
            Self::AliasedFields => "*_program fields",
            Self::Nested => "nested object",
            Self::ArrayOfEntries => "array of typed entries",
            Self::SiblingFiles => "sibling class files",
        };
        f.write_str(name)
    }
}

/// Tries every shape in order. `Ok(None)` means no shape matched.
pub fn extract(
    artifact: &Value,
    paths: &SearchPaths,
) -> Result<Option<(ArtifactShape, ArtifactPair)>, ExtractError> {
    for shape in ArtifactShape::ALL {
        if let Some(pair) = shape.extract(artifact, paths)? {
            debug!(@grey, "Extracted artifacts from {shape}");
            return Ok(Some((shape, pair)));
        }
    }
    Ok(None)
}

fn raw_fields<'a>(entry: &'a Map<String, Value>, (high, low): (&str, &str)) -> Option<(&'a Value, &'a Value)> {
    let high = entry.get(high).filter(|value| !value.is_null())?;
    let low = entry.get(low).filter(|value| !value.is_null())?;
    Some((high, low))
}

fn load_pair(
    (high, low): (&Value, &Value),
    paths: &SearchPaths,
) -> Result<ArtifactPair, ExtractError> {
    Ok(ArtifactPair {
        high_level: load_or_parse(high, paths)?,
        low_level: load_or_parse(low, paths)?,
    })
}

fn load_fields(
    entry: &Map<String, Value>,
    fields: (&str, &str),
    paths: &SearchPaths,
) -> Result<Option<ArtifactPair>, ExtractError> {
    raw_fields(entry, fields)
        .map(|raw| load_pair(raw, paths))
        .transpose()
}

fn nested(
    entry: &Map<String, Value>,
    paths: &SearchPaths,
) -> Result<Option<ArtifactPair>, ExtractError> {
    for inner in entry.values().filter_map(Value::as_object) {
        for fields in [CANONICAL_FIELDS, PROGRAM_FIELDS] {
            if let Some(pair) = load_fields(inner, fields, paths)? {
                return Ok(Some(pair));
            }
        }
    }
    Ok(None)
}

fn array_of_entries(
    entry: &Map<String, Value>,
    paths: &SearchPaths,
) -> Result<Option<ArtifactPair>, ExtractError> {
    for items in entry.values().filter_map(Value::as_array) {
        let high = tagged_content(items, "sierra");
        let low = tagged_content(items, "casm");
        if let (Some(high), Some(low)) = (high, low) {
            return load_pair((high, low), paths).map(Some);
        }
    }
    Ok(None)
}

fn tagged_content<'a>(items: &'a [Value], tag: &str) -> Option<&'a Value> {
    items.iter().filter_map(Value::as_object).find_map(|item| {
        let tagged = TAG_FIELDS.iter().any(|field| {
            item.get(*field)
                .and_then(Value::as_str)
                .is_some_and(|value| value.to_lowercase().contains(tag))
        });
        if !tagged {
            return None;
        }
        CONTENT_FIELDS
            .iter()
            .find_map(|field| item.get(*field).filter(|value| !value.is_null()))
    })
}

fn sibling_files(
    entry: &Map<String, Value>,
    paths: &SearchPaths,
) -> Result<Option<ArtifactPair>, ExtractError> {
    let Some(contract_name) = entry.get("contract_name").and_then(Value::as_str) else {
        return Ok(None);
    };
    let mut stems = Vec::new();
    if let Some(package) = entry.get("package_name").and_then(Value::as_str) {
        stems.push(format!("{package}_{contract_name}"));
    }
    stems.push(contract_name.to_owned());

    for stem in stems {
        let high = paths.find(&format!("{stem}{SIERRA_SUFFIX}"));
        let low = paths.find(&format!("{stem}{CASM_SUFFIX}"));
        if let (Some(high), Some(low)) = (high, low) {
            debug!(@grey, "Using class files {} and {}", high.display(), low.display());
            return Ok(Some(ArtifactPair {
                high_level: read_json(&high)?,
                low_level: read_json(&low)?,
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;

    fn sierra() -> Value {
        json!({ "sierra_program": ["0x1"], "abi": [] })
    }

    fn casm() -> Value {
        json!({ "bytecode": ["0x2"], "compiler_version": "2.6.0" })
    }

    fn expected() -> ArtifactPair {
        ArtifactPair {
            high_level: sierra(),
            low_level: casm(),
        }
    }

    fn shape_of(artifact: &Value, paths: &SearchPaths) -> Option<ArtifactShape> {
        extract(artifact, paths).unwrap().map(|(shape, pair)| {
            assert_eq!(pair, expected());
            shape
        })
    }

    #[test]
    fn direct_fields() {
        let artifact = json!({ "sierra": sierra(), "casm": casm() });
        assert_eq!(
            shape_of(&artifact, &SearchPaths::default()),
            Some(ArtifactShape::Direct)
        );
    }

    #[test]
    fn program_fields_as_json_strings() {
        let artifact = json!({
            "sierra_program": sierra().to_string(),
            "casm_program": casm().to_string(),
        });
        assert_eq!(
            shape_of(&artifact, &SearchPaths::default()),
            Some(ArtifactShape::AliasedFields)
        );
    }

    #[test]
    fn nested_object() {
        let artifact = json!({
            "contract_name": "Oracle",
            "compiled": { "sierra_program": sierra(), "casm_program": casm() },
        });
        assert_eq!(
            shape_of(&artifact, &SearchPaths::default()),
            Some(ArtifactShape::Nested)
        );
    }

    #[test]
    fn array_of_typed_entries() {
        let artifact = json!({
            "outputs": [
                { "type": "Sierra", "data": sierra() },
                { "kind": "CASM", "value": casm().to_string() },
            ]
        });
        assert_eq!(
            shape_of(&artifact, &SearchPaths::default()),
            Some(ArtifactShape::ArrayOfEntries)
        );
    }

    #[test]
    fn sibling_files_prefer_package_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, value: &Value| {
            fs::write(dir.path().join(name), value.to_string()).unwrap();
        };
        write("prophecy_sunya_Bridge.contract_class.json", &sierra());
        write("prophecy_sunya_Bridge.compiled_contract_class.json", &casm());
        write("Bridge.contract_class.json", &json!({ "stale": true }));
        write("Bridge.compiled_contract_class.json", &json!({ "stale": true }));

        let artifact = json!({ "contract_name": "Bridge", "package_name": "prophecy_sunya" });
        let paths = SearchPaths::new(vec![dir.path().to_path_buf()]);
        assert_eq!(shape_of(&artifact, &paths), Some(ArtifactShape::SiblingFiles));
    }

    #[test]
    fn scarb_entry_resolves_file_references() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("p_Nft.contract_class.json"), sierra().to_string()).unwrap();
        fs::write(
            dir.path().join("p_Nft.compiled_contract_class.json"),
            casm().to_string(),
        )
        .unwrap();
        let artifact = json!({
            "contract_name": "Nft",
            "artifacts": {
                "sierra": "p_Nft.contract_class.json",
                "casm": "p_Nft.compiled_contract_class.json",
            }
        });
        let paths = SearchPaths::new(vec![dir.path().to_path_buf()]);
        assert_eq!(shape_of(&artifact, &paths), Some(ArtifactShape::Nested));
    }

    #[test]
    fn unknown_shape_yields_none() {
        for artifact in [
            json!({ "abi": [], "entry_points_by_type": {} }),
            json!({ "sierra": sierra() }),
            json!({ "outputs": [{ "type": "sierra", "content": sierra() }] }),
            json!({ "contract_name": "Missing" }),
            json!("just a string"),
        ] {
            assert_eq!(extract(&artifact, &SearchPaths::default()).unwrap(), None);
        }
    }

    #[test]
    fn half_pair_is_never_used() {
        let artifact = json!({ "sierra": sierra(), "casm": null });
        assert_eq!(extract(&artifact, &SearchPaths::default()).unwrap(), None);
    }

    #[test]
    fn invalid_content_is_an_error() {
        let artifact = json!({ "sierra": "not json", "casm": casm() });
        assert!(matches!(
            extract(&artifact, &SearchPaths::default()),
            Err(ExtractError::InvalidJson(_))
        ));
    }
}
