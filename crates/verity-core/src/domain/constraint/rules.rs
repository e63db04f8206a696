//! Parameter types shared by several constraint kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::value::RawValue;

// ── ValueType ────────────────────────────────────────────────────────────────

/// The type a `type` constraint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Integer,
    Float,
    /// Integer, float, or a numeric string.
    Numeric,
    Bool,
    List,
    /// Any non-null, non-list, non-file value.
    Scalar,
    File,
}

impl ValueType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Numeric => "numeric",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Scalar => "scalar",
            Self::File => "file",
        }
    }

    pub fn matches(self, value: &RawValue) -> bool {
        match self {
            Self::String => matches!(value, RawValue::Str(_)),
            Self::Integer => matches!(value, RawValue::Int(_)),
            Self::Float => matches!(value, RawValue::Float(_)),
            Self::Numeric => value.as_number().is_some(),
            Self::Bool => matches!(value, RawValue::Bool(_)),
            Self::List => matches!(value, RawValue::List(_)),
            Self::Scalar => matches!(
                value,
                RawValue::Bool(_) | RawValue::Int(_) | RawValue::Float(_) | RawValue::Str(_)
            ),
            Self::File => matches!(value, RawValue::File(_)),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "float" | "double" => Ok(Self::Float),
            "numeric" | "number" => Ok(Self::Numeric),
            "bool" | "boolean" => Ok(Self::Bool),
            "list" | "array" | "iterable" => Ok(Self::List),
            "scalar" => Ok(Self::Scalar),
            "file" => Ok(Self::File),
            other => Err(DomainError::UnknownIdentifier {
                what: "value type",
                value: other.to_owned(),
            }),
        }
    }
}

// ── TimezoneZone ─────────────────────────────────────────────────────────────

/// Geographical region a timezone identifier may be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneZone {
    Africa,
    America,
    Antarctica,
    Arctic,
    Asia,
    Atlantic,
    Australia,
    Europe,
    Indian,
    Pacific,
    Utc,
}

impl TimezoneZone {
    pub const ALL: &'static [TimezoneZone] = &[
        Self::Africa,
        Self::America,
        Self::Antarctica,
        Self::Arctic,
        Self::Asia,
        Self::Atlantic,
        Self::Australia,
        Self::Europe,
        Self::Indian,
        Self::Pacific,
        Self::Utc,
    ];

    /// Identifier prefix of the region (`"Europe"` for `Europe/Paris`).
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::America => "America",
            Self::Antarctica => "Antarctica",
            Self::Arctic => "Arctic",
            Self::Asia => "Asia",
            Self::Atlantic => "Atlantic",
            Self::Australia => "Australia",
            Self::Europe => "Europe",
            Self::Indian => "Indian",
            Self::Pacific => "Pacific",
            Self::Utc => "UTC",
        }
    }

    pub fn contains(self, identifier: &str) -> bool {
        match self {
            Self::Utc => identifier == "UTC",
            _ => identifier
                .strip_prefix(self.prefix())
                .is_some_and(|rest| rest.starts_with('/')),
        }
    }
}

impl FromStr for TimezoneZone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|zone| zone.prefix().eq_ignore_ascii_case(s))
            .ok_or(DomainError::UnknownIdentifier {
                what: "timezone zone",
                value: s.to_owned(),
            })
    }
}

// ── Charset ──────────────────────────────────────────────────────────────────

/// Character set a string-length constraint requires.
///
/// Values are always valid UTF-8, so `Utf8` accepts everything; the narrower
/// sets reject characters they cannot encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Charset {
    #[default]
    #[serde(rename = "UTF-8")]
    Utf8,
    #[serde(rename = "ASCII")]
    Ascii,
    #[serde(rename = "ISO-8859-1")]
    Latin1,
}

impl Charset {
    pub const ALL: &'static [Charset] = &[Self::Utf8, Self::Ascii, Self::Latin1];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "ASCII",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Whether every character of `text` is encodable in this set.
    pub fn accepts(self, text: &str) -> bool {
        match self {
            Self::Utf8 => true,
            Self::Ascii => text.is_ascii(),
            Self::Latin1 => text.chars().all(|c| u32::from(c) <= 0xFF),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charset {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Ok(Self::Utf8),
            "ASCII" | "US-ASCII" => Ok(Self::Ascii),
            "ISO-8859-1" | "LATIN1" | "LATIN-1" => Ok(Self::Latin1),
            _ => Err(DomainError::UnknownIdentifier {
                what: "charset",
                value: s.to_owned(),
            }),
        }
    }
}

// ── CountryCode ──────────────────────────────────────────────────────────────

/// ISO 3166-1 alpha-2 country code, stored uppercase.
///
/// Only the shape is checked here. Which zones a country has is the checking
/// engine's knowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII uppercase letters by construction.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Ok(Self([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
            }
            _ => Err(DomainError::UnknownIdentifier {
                what: "country code",
                value: s.to_owned(),
            }),
        }
    }
}

// ── DateTimeFormat ───────────────────────────────────────────────────────────

/// One element of a date-time format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatToken {
    /// `%Y`, four digits.
    Year,
    /// `%m`, two digits.
    Month,
    /// `%d`, two digits.
    Day,
    /// `%H`, two digits.
    Hour,
    /// `%M`, two digits.
    Minute,
    /// `%S`, two digits.
    Second,
    Literal(char),
}

/// A strftime-style format restricted to numeric fields.
///
/// Only `%Y %m %d %H %M %S` and `%%` are understood; anything else is
/// rejected when the format is parsed, so a descriptor never carries a
/// format the engine cannot apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormat {
    source: String,
    tokens: Vec<FormatToken>,
}

impl DateTimeFormat {
    pub const DEFAULT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn parse(source: &str) -> Result<Self, String> {
        let mut tokens = Vec::new();
        let mut chars = source.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                tokens.push(FormatToken::Literal(c));
                continue;
            }
            let token = match chars.next() {
                Some('Y') => FormatToken::Year,
                Some('m') => FormatToken::Month,
                Some('d') => FormatToken::Day,
                Some('H') => FormatToken::Hour,
                Some('M') => FormatToken::Minute,
                Some('S') => FormatToken::Second,
                Some('%') => FormatToken::Literal('%'),
                Some(other) => return Err(format!("unsupported format specifier '%{other}'")),
                None => return Err("format ends with a dangling '%'".into()),
            };
            tokens.push(token);
        }
        if !tokens.iter().any(|t| !matches!(t, FormatToken::Literal(_))) {
            return Err(format!("format '{source}' contains no date or time field"));
        }
        Ok(Self {
            source: source.to_owned(),
            tokens,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[FormatToken] {
        &self.tokens
    }
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self {
            source: Self::DEFAULT.to_owned(),
            tokens: vec![
                FormatToken::Year,
                FormatToken::Literal('-'),
                FormatToken::Month,
                FormatToken::Literal('-'),
                FormatToken::Day,
                FormatToken::Literal(' '),
                FormatToken::Hour,
                FormatToken::Literal(':'),
                FormatToken::Minute,
                FormatToken::Literal(':'),
                FormatToken::Second,
            ],
        }
    }
}

// ── File / image rules ───────────────────────────────────────────────────────

/// Parameters of the `file` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileRules {
    /// Maximum size in bytes.
    pub max_size: Option<u64>,
    /// Accepted MIME types; `image/*` style wildcards allowed. Empty accepts all.
    pub mime_types: Vec<String>,
}

impl FileRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    pub fn mime_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mime_types = types.into_iter().map(Into::into).collect();
        self
    }
}

/// Parameters of the `image` constraint: every file rule plus dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRules {
    pub file: FileRules,
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_height: Option<u32>,
    pub min_pixels: Option<u64>,
    pub max_pixels: Option<u64>,
    pub min_ratio: Option<f64>,
    pub max_ratio: Option<f64>,
    pub allow_square: bool,
    pub allow_landscape: bool,
    pub allow_portrait: bool,
    pub detect_corrupted: bool,
}

impl Default for ImageRules {
    fn default() -> Self {
        Self {
            file: FileRules {
                max_size: None,
                mime_types: vec!["image/*".into()],
            },
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            min_pixels: None,
            max_pixels: None,
            min_ratio: None,
            max_ratio: None,
            allow_square: true,
            allow_landscape: true,
            allow_portrait: true,
            detect_corrupted: false,
        }
    }
}

impl ImageRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, file: FileRules) -> Self {
        self.file = file;
        self
    }

    pub fn width(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    pub fn height(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    pub fn pixels(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_pixels = min;
        self.max_pixels = max;
        self
    }

    pub fn ratio(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_ratio = min;
        self.max_ratio = max;
        self
    }

    pub fn orientations(mut self, square: bool, landscape: bool, portrait: bool) -> Self {
        self.allow_square = square;
        self.allow_landscape = landscape;
        self.allow_portrait = portrait;
        self
    }

    pub fn detect_corrupted(mut self, detect: bool) -> Self {
        self.detect_corrupted = detect;
        self
    }
}

// ── Choice ───────────────────────────────────────────────────────────────────

/// Parameters of the `choice` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceRules {
    pub choices: Vec<RawValue>,
    /// The value is a list whose every element must be a choice.
    pub multiple: bool,
    /// Minimum number of selected choices (multiple only).
    pub min: Option<usize>,
    /// Maximum number of selected choices (multiple only).
    pub max: Option<usize>,
}

impl ChoiceRules {
    pub fn new<I, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RawValue>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            multiple: false,
            min: None,
            max: None,
        }
    }

    pub fn multiple(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.multiple = true;
        self.min = min;
        self.max = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charsets_parse_common_spellings() {
        assert_eq!("utf8".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("us-ascii".parse::<Charset>().unwrap(), Charset::Ascii);
        assert_eq!("latin1".parse::<Charset>().unwrap(), Charset::Latin1);
        assert!("EBCDIC".parse::<Charset>().is_err());
        for charset in Charset::ALL {
            assert_eq!(charset.as_str().parse::<Charset>().unwrap(), *charset);
        }
    }

    #[test]
    fn charsets_reject_what_they_cannot_encode() {
        assert!(Charset::Utf8.accepts("😀"));
        assert!(Charset::Ascii.accepts("cafe"));
        assert!(!Charset::Ascii.accepts("café"));
        assert!(Charset::Latin1.accepts("café"));
        assert!(!Charset::Latin1.accepts("€"));
    }

    #[test]
    fn country_codes_are_two_letters_uppercased() {
        assert_eq!("fr".parse::<CountryCode>().unwrap().as_str(), "FR");
        assert!("FRA".parse::<CountryCode>().is_err());
        assert!("F1".parse::<CountryCode>().is_err());
        assert!("".parse::<CountryCode>().is_err());
    }

    #[test]
    fn format_parses_supported_tokens() {
        let format = DateTimeFormat::parse("%d/%m/%Y %H:%M").unwrap();
        assert_eq!(format.tokens().len(), 9);
        assert_eq!(format.tokens()[0], FormatToken::Day);
        assert_eq!(format.as_str(), "%d/%m/%Y %H:%M");
    }

    #[test]
    fn format_rejects_unknown_specifier() {
        assert!(DateTimeFormat::parse("%Y-%j").is_err());
        assert!(DateTimeFormat::parse("%Y-%").is_err());
        assert!(DateTimeFormat::parse("plain").is_err());
    }

    #[test]
    fn default_format_matches_its_source() {
        let parsed = DateTimeFormat::parse(DateTimeFormat::DEFAULT).unwrap();
        assert_eq!(parsed, DateTimeFormat::default());
    }

    #[test]
    fn zone_membership_requires_separator() {
        assert!(TimezoneZone::Europe.contains("Europe/Paris"));
        assert!(!TimezoneZone::Europe.contains("EuropeX/Paris"));
        assert!(TimezoneZone::Utc.contains("UTC"));
        assert!(!TimezoneZone::Asia.contains("UTC"));
    }

    #[test]
    fn value_type_matching() {
        assert!(ValueType::Numeric.matches(&RawValue::str("4.5")));
        assert!(!ValueType::Integer.matches(&RawValue::Float(4.0)));
        assert!(ValueType::Scalar.matches(&RawValue::Bool(false)));
        assert!(!ValueType::Scalar.matches(&RawValue::Null));
    }
}
