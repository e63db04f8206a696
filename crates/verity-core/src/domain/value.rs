//! Raw values: what a constrainable value exposes to the engine.
//!
//! `RawValue` is deliberately small. It covers what domain value objects hand
//! over for checking (scalars, lists, file references) and nothing more.
//! Structural `PartialEq` is strict identity; [`RawValue::loose_eq`] is the
//! value equality used by `EqualTo`-style constraints.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A value under validation, or a constraint parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<RawValue>),
    File(FileRef),
}

/// A reference to a file, optionally carrying the transport failure that
/// occurred while it was uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileRef {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_error: Option<UploadError>,
}

/// Upload-transport failures, as reported by the HTTP layer that received the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadError {
    /// Exceeds the server-wide upload size limit.
    IniSize,
    /// Exceeds the limit declared by the submitting form.
    FormSize,
    Partial,
    NoFile,
    NoTmpDir,
    CantWrite,
    /// Rejected by a server extension.
    Extension,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            upload_error: None,
        }
    }

    pub fn with_upload_error(mut self, error: UploadError) -> Self {
        self.upload_error = Some(error);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RawValue {
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(FileRef::new(path))
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Blank means null, `false`, the empty string, or an empty list.
    ///
    /// Numeric zero is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Str(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::File(file) => file.path.as_os_str().is_empty(),
            Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// `true` for null and the empty string, the values most checks skip.
    pub fn is_null_or_empty_str(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::File(_) => "file",
        }
    }

    /// Textual form of scalar values; `None` for null, booleans, lists and files.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Str(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Int(i) => Some(Cow::Owned(i.to_string())),
            Self::Float(f) => Some(Cow::Owned(f.to_string())),
            _ => None,
        }
    }

    /// Numeric view: integers, floats, and strings that parse as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Str(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RawValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileRef> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    /// Value equality: numbers compare numerically across representations,
    /// everything else compares structurally.
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.loose_eq(y))
            }
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => self == other,
            },
        }
    }

    /// Ordering used by the comparison constraints.
    ///
    /// Two numbers compare numerically, two strings lexicographically;
    /// anything else is incomparable.
    pub fn loose_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Str(a), Self::Str(b))
                if a.trim().parse::<f64>().is_err() || b.trim().parse::<f64>().is_err() =>
            {
                Some(a.cmp(b))
            }
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::File(file) => write!(f, "file({})", file.path.display()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<FileRef> for RawValue {
    fn from(value: FileRef) -> Self {
        Self::File(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}
