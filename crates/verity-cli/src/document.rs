//! JSON documents of values and their declared constraints.
//!
//! ```json
//! {
//!   "email": { "value": "ada@example.com", "constraints": [{ "kind": "email" }] },
//!   "product": {
//!     "constraints": [{ "kind": "notNull" }],
//!     "value": true,
//!     "fields": {
//!       "name":   { "value": "Lamp", "constraints": [{ "kind": "stringRange", "min": 2, "max": 50 }] },
//!       "images": [{ "value": { "path": "lamp.png" }, "constraints": [{ "kind": "image" }] }]
//!     }
//!   }
//! }
//! ```
//!
//! A top-level array holds entries addressed by position. Constraint
//! parameters sit beside `kind` and are handed to `Constraint::from_params`.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use verity_core::domain::{
    Children, ConstrainableValue, Constraint, ConstraintKind, ConstraintSet, DomainError, RawValue,
};

use crate::error::{CliError, CliResult, IntoCli};

/// A parsed document.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    pub entries: Entries,
}

/// Top-level entries of a document.
#[derive(Debug)]
pub enum Entries {
    Named(Vec<(String, Entry)>),
    Positional(Vec<Entry>),
}

impl Entries {
    pub fn len(&self) -> usize {
        match self {
            Self::Named(entries) => entries.len(),
            Self::Positional(entries) => entries.len(),
        }
    }
}

/// One value with its constraints and, optionally, nested fields.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Entry {
    #[serde(default)]
    pub value: RawValue,
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
    #[serde(default)]
    pub fields: BTreeMap<String, Field>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Single(Entry),
    Many(Vec<Entry>),
}

/// A constraint as written in a document.
#[derive(Debug, Deserialize)]
pub struct ConstraintSpec {
    pub kind: String,
    #[serde(flatten)]
    pub params: BTreeMap<String, RawValue>,
}

impl ConstraintSpec {
    pub fn build(self) -> Result<Constraint, DomainError> {
        let kind = self.kind.parse::<ConstraintKind>()?;
        Constraint::from_params(kind, self.params)
    }
}

impl Document {
    /// Read a document from `path`, or from stdin when `path` is `-`.
    pub fn load(path: &Path) -> CliResult<Self> {
        let text = if path == Path::new("-") {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .with_cli_context(|| "reading document from stdin")?;
            text
        } else {
            if !path.is_file() {
                return Err(CliError::DocumentNotFound {
                    path: path.to_path_buf(),
                });
            }
            fs::read_to_string(path)
                .with_cli_context(|| format!("reading {}", path.display()))?
        };
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> CliResult<Self> {
        let invalid = |message: String, source: Option<serde_json::Error>| CliError::InvalidDocument {
            path: path.to_path_buf(),
            message,
            source,
        };

        let json: Value =
            serde_json::from_str(text).map_err(|e| invalid(e.to_string(), Some(e)))?;

        let entries = match json {
            Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (name, value) in map {
                    let entry = serde_json::from_value(value)
                        .map_err(|e| invalid(format!("entry '{name}': {e}"), Some(e)))?;
                    entries.push((name, entry));
                }
                Entries::Named(entries)
            }
            Value::Array(items) => {
                let mut entries = Vec::with_capacity(items.len());
                for (index, value) in items.into_iter().enumerate() {
                    let entry = serde_json::from_value(value)
                        .map_err(|e| invalid(format!("entry [{index}]: {e}"), Some(e)))?;
                    entries.push(entry);
                }
                Entries::Positional(entries)
            }
            other => {
                return Err(invalid(
                    format!("expected an object or an array, found {}", json_type(&other)),
                    None,
                ));
            }
        };

        debug!(path = %path.display(), entries = entries.len(), "document parsed");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory relative file paths resolve against by default.
    pub fn base_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() && self.path != Path::new("-") => {
                dir.to_path_buf()
            }
            _ => PathBuf::from("."),
        }
    }
}

impl Entry {
    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Build the constrainable value, resolving relative file paths against
    /// `base`. `location` names the entry in error messages.
    pub fn into_value(self, location: &str, base: &Path) -> CliResult<ConstrainableValue> {
        let constraints = self
            .constraints
            .into_iter()
            .enumerate()
            .map(|(index, spec)| {
                spec.build().map_err(|source| CliError::InvalidDescriptor {
                    location: format!("{location}.constraints[{index}]"),
                    source,
                })
            })
            .collect::<CliResult<ConstraintSet>>()?;

        let value = ConstrainableValue::with_constraints(resolve_files(self.value, base), constraints);
        if self.fields.is_empty() {
            return Ok(value);
        }

        let mut children = Children::new();
        for (name, field) in self.fields {
            let path = format!("{location}.{name}");
            children = match field {
                Field::Single(entry) => {
                    let child = entry.into_value(&path, base)?;
                    children.single(name, child)
                }
                Field::Many(entries) => {
                    let values = entries
                        .into_iter()
                        .enumerate()
                        .map(|(index, entry)| entry.into_value(&format!("{path}[{index}]"), base))
                        .collect::<CliResult<Vec<_>>>()?;
                    children.many(name, values)
                }
            };
        }
        Ok(value.with_children(children))
    }
}

fn resolve_files(raw: RawValue, base: &Path) -> RawValue {
    match raw {
        RawValue::File(mut file) if file.path.is_relative() => {
            file.path = base.join(&file.path);
            RawValue::File(file)
        }
        RawValue::List(items) => {
            RawValue::List(items.into_iter().map(|v| resolve_files(v, base)).collect())
        }
        other => other,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_core::domain::{Child, FileRef};

    fn parse(text: &str) -> CliResult<Document> {
        Document::parse(Path::new("docs/values.json"), text)
    }

    #[test]
    fn named_entries_keep_their_names() {
        let doc = parse(
            r#"{
                "email": { "value": "ada@example.com", "constraints": [{ "kind": "email" }] },
                "age":   { "value": 36, "constraints": [{ "kind": "range", "min": 18 }] }
            }"#,
        )
        .unwrap();
        let Entries::Named(entries) = doc.entries else {
            panic!("expected named entries");
        };
        let mut names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, ["age", "email"]);
        let age = entries.iter().find(|(n, _)| n == "age").map(|(_, e)| &e.value);
        assert_eq!(age, Some(&RawValue::Int(36)));
    }

    #[test]
    fn arrays_are_positional() {
        let doc = parse(r#"[{ "value": "a" }, { "value": null, "constraints": [] }]"#).unwrap();
        assert!(matches!(doc.entries, Entries::Positional(ref e) if e.len() == 2));
    }

    #[test]
    fn params_build_descriptors() {
        let doc = parse(
            r#"[{ "value": "ab", "constraints": [{ "kind": "stringRange", "min": 3, "max": 5 }] }]"#,
        )
        .unwrap();
        let Entries::Positional(mut entries) = doc.entries else {
            panic!("expected positional entries");
        };
        let value = entries.remove(0).into_value("[0]", Path::new(".")).unwrap();
        assert_eq!(value.constraints().as_slice(), [Constraint::string_range(3, 5)]);
    }

    #[test]
    fn unknown_kind_reports_its_location() {
        let doc = parse(r#"{ "email": { "value": "x", "constraints": [{ "kind": "emial" }] } }"#)
            .unwrap();
        let Entries::Named(mut entries) = doc.entries else {
            panic!("expected named entries");
        };
        let (name, entry) = entries.remove(0);
        let err = entry.into_value(&name, Path::new(".")).unwrap_err();
        assert!(
            matches!(err, CliError::InvalidDescriptor { ref location, .. } if location == "email.constraints[0]")
        );
    }

    #[test]
    fn unknown_entry_keys_are_rejected() {
        let err = parse(r#"{ "email": { "valeu": "x" } }"#).unwrap_err();
        assert!(matches!(err, CliError::InvalidDocument { .. }));
        assert!(err.to_string().contains("entry 'email'"));
    }

    #[test]
    fn scalar_documents_are_rejected() {
        let err = parse("42").unwrap_err();
        assert!(err.to_string().contains("found a number"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn relative_files_resolve_against_base() {
        let doc = parse(
            r#"[{ "value": [{ "path": "a.png" }, { "path": "/abs/b.png" }], "constraints": [] }]"#,
        )
        .unwrap();
        let Entries::Positional(mut entries) = doc.entries else {
            panic!("expected positional entries");
        };
        let value = entries.remove(0).into_value("[0]", Path::new("uploads")).unwrap();
        assert_eq!(
            value.raw(),
            &RawValue::List(vec![
                RawValue::File(FileRef::new("uploads/a.png")),
                RawValue::File(FileRef::new("/abs/b.png")),
            ])
        );
    }

    #[test]
    fn nested_fields_become_children() {
        let doc = parse(
            r#"{ "product": {
                "fields": {
                    "name": { "value": "Lamp", "constraints": [{ "kind": "notBlank" }] },
                    "images": [{ "value": null }, { "value": null }]
                }
            } }"#,
        )
        .unwrap();
        let Entries::Named(mut entries) = doc.entries else {
            panic!("expected named entries");
        };
        let (name, entry) = entries.remove(0);
        assert!(entry.has_fields());
        let value = entry.into_value(&name, Path::new(".")).unwrap();
        assert!(value.is_composite());
        assert!(matches!(value.children().get("images"), Some(Child::Many(v)) if v.len() == 2));
        assert!(matches!(value.children().get("name"), Some(Child::Single(_))));
    }

    #[test]
    fn base_dir_defaults_to_document_directory() {
        assert_eq!(parse("[]").unwrap().base_dir(), PathBuf::from("docs"));
        let stdin = Document::parse(Path::new("-"), "[]").unwrap();
        assert_eq!(stdin.base_dir(), PathBuf::from("."));
    }
}
