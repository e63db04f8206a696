//! Constraint descriptors.
//!
//! A [`Constraint`] is an immutable, engine-agnostic declaration of one rule
//! and its parameters. It says nothing about *how* the rule is checked; the
//! constraint adapters translate it for the checking engine.
//!
//! # Adding a New Kind
//!
//! 1. Add the [`ConstraintKind`] variant and its `as_str` / `ALL` entries
//! 2. Add the [`Constraint`] variant and its factory
//! 3. Teach `params()` and `from_params()` about its parameters
//! 4. Add an adapter arm and a registry entry in
//!    `application::constraint_adapters` (the compiler points at both)

mod params;
mod rules;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::value::RawValue;

pub use params::Params;
pub use rules::{
    Charset, ChoiceRules, CountryCode, DateTimeFormat, FileRules, FormatToken, ImageRules,
    TimezoneZone, ValueType,
};

// ── ConstraintKind ───────────────────────────────────────────────────────────

/// The closed set of constraint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKind {
    NotBlank,
    NotNull,
    Type,
    Email,
    StringLength,
    StringMin,
    StringMax,
    StringRange,
    Uuid,
    Regex,
    Alphanumeric,
    AlphanumericWithWhitespace,
    Url,
    Language,
    Json,
    EqualTo,
    NotEqualTo,
    IdenticalTo,
    NotIdenticalTo,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Range,
    Count,
    CountRange,
    CountDivisibleBy,
    Unique,
    Positive,
    PositiveOrZero,
    Negative,
    NegativeOrZero,
    Date,
    DateTime,
    Time,
    TimeZone,
    File,
    Image,
    Choice,
}

impl ConstraintKind {
    pub const ALL: &'static [ConstraintKind] = &[
        Self::NotBlank,
        Self::NotNull,
        Self::Type,
        Self::Email,
        Self::StringLength,
        Self::StringMin,
        Self::StringMax,
        Self::StringRange,
        Self::Uuid,
        Self::Regex,
        Self::Alphanumeric,
        Self::AlphanumericWithWhitespace,
        Self::Url,
        Self::Language,
        Self::Json,
        Self::EqualTo,
        Self::NotEqualTo,
        Self::IdenticalTo,
        Self::NotIdenticalTo,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::Range,
        Self::Count,
        Self::CountRange,
        Self::CountDivisibleBy,
        Self::Unique,
        Self::Positive,
        Self::PositiveOrZero,
        Self::Negative,
        Self::NegativeOrZero,
        Self::Date,
        Self::DateTime,
        Self::Time,
        Self::TimeZone,
        Self::File,
        Self::Image,
        Self::Choice,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotBlank => "notBlank",
            Self::NotNull => "notNull",
            Self::Type => "type",
            Self::Email => "email",
            Self::StringLength => "stringLength",
            Self::StringMin => "stringMin",
            Self::StringMax => "stringMax",
            Self::StringRange => "stringRange",
            Self::Uuid => "uuid",
            Self::Regex => "regex",
            Self::Alphanumeric => "alphanumeric",
            Self::AlphanumericWithWhitespace => "alphanumericWithWhitespace",
            Self::Url => "url",
            Self::Language => "language",
            Self::Json => "json",
            Self::EqualTo => "equalTo",
            Self::NotEqualTo => "notEqualTo",
            Self::IdenticalTo => "identicalTo",
            Self::NotIdenticalTo => "notIdenticalTo",
            Self::LessThan => "lessThan",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::Range => "range",
            Self::Count => "count",
            Self::CountRange => "countRange",
            Self::CountDivisibleBy => "countDivisibleBy",
            Self::Unique => "unique",
            Self::Positive => "positive",
            Self::PositiveOrZero => "positiveOrZero",
            Self::Negative => "negative",
            Self::NegativeOrZero => "negativeOrZero",
            Self::Date => "date",
            Self::DateTime => "dateTime",
            Self::Time => "time",
            Self::TimeZone => "timeZone",
            Self::File => "file",
            Self::Image => "image",
            Self::Choice => "choice",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or(DomainError::UnknownIdentifier {
                what: "constraint kind",
                value: s.to_owned(),
            })
    }
}

// ── Constraint ───────────────────────────────────────────────────────────────

/// One declared rule with its parameters.
///
/// Built through the associated factory functions; there is no way to attach
/// a parameter a kind does not define. Variants carrying parameters are
/// `#[non_exhaustive]`, so other crates cannot bypass the factories.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    NotBlank,
    NotNull,
    #[non_exhaustive]
    Type { expected: ValueType },
    Email,
    #[non_exhaustive]
    StringLength { exact: usize, charset: Charset },
    #[non_exhaustive]
    StringMin { min: usize, charset: Charset },
    #[non_exhaustive]
    StringMax { max: usize, charset: Charset },
    #[non_exhaustive]
    StringRange {
        min: usize,
        max: usize,
        charset: Charset,
    },
    Uuid,
    #[non_exhaustive]
    Regex { pattern: String, matches: bool },
    Alphanumeric,
    AlphanumericWithWhitespace,
    Url,
    Language,
    Json,
    #[non_exhaustive]
    EqualTo { value: RawValue },
    #[non_exhaustive]
    NotEqualTo { value: RawValue },
    #[non_exhaustive]
    IdenticalTo { value: RawValue },
    #[non_exhaustive]
    NotIdenticalTo { value: RawValue },
    #[non_exhaustive]
    LessThan { value: RawValue },
    #[non_exhaustive]
    LessThanOrEqual { value: RawValue },
    #[non_exhaustive]
    GreaterThan { value: RawValue },
    #[non_exhaustive]
    GreaterThanOrEqual { value: RawValue },
    #[non_exhaustive]
    Range { min: Option<f64>, max: Option<f64> },
    #[non_exhaustive]
    Count { exact: usize },
    #[non_exhaustive]
    CountRange { min: Option<usize>, max: Option<usize> },
    #[non_exhaustive]
    CountDivisibleBy { divisor: usize },
    Unique,
    Positive,
    PositiveOrZero,
    Negative,
    NegativeOrZero,
    Date,
    #[non_exhaustive]
    DateTime { format: DateTimeFormat },
    #[non_exhaustive]
    Time { with_seconds: bool },
    /// `zone` and `country` are never both set.
    #[non_exhaustive]
    TimeZone {
        zone: Option<TimezoneZone>,
        country: Option<CountryCode>,
        intl: bool,
    },
    #[non_exhaustive]
    File(FileRules),
    #[non_exhaustive]
    Image(ImageRules),
    #[non_exhaustive]
    Choice(ChoiceRules),
}

impl Constraint {
    // ── factories ───────────────────────────────────────────────────────────

    pub const fn not_blank() -> Self {
        Self::NotBlank
    }

    pub const fn not_null() -> Self {
        Self::NotNull
    }

    pub const fn of_type(expected: ValueType) -> Self {
        Self::Type { expected }
    }

    pub const fn email() -> Self {
        Self::Email
    }

    pub const fn string_length(exact: usize) -> Self {
        Self::StringLength {
            exact,
            charset: Charset::Utf8,
        }
    }

    pub const fn string_min(min: usize) -> Self {
        Self::StringMin {
            min,
            charset: Charset::Utf8,
        }
    }

    pub const fn string_max(max: usize) -> Self {
        Self::StringMax {
            max,
            charset: Charset::Utf8,
        }
    }

    /// Inclusive length bounds. `min > max` is not rejected here; such a
    /// descriptor simply rejects every value.
    pub const fn string_range(min: usize, max: usize) -> Self {
        Self::StringRange {
            min,
            max,
            charset: Charset::Utf8,
        }
    }

    /// Restrict a string-length descriptor to `charset`. Values with
    /// characters outside it fail before their length is looked at.
    pub fn with_charset(self, charset: Charset) -> Result<Self, DomainError> {
        match self {
            Self::StringLength { exact, .. } => Ok(Self::StringLength { exact, charset }),
            Self::StringMin { min, .. } => Ok(Self::StringMin { min, charset }),
            Self::StringMax { max, .. } => Ok(Self::StringMax { max, charset }),
            Self::StringRange { min, max, .. } => Ok(Self::StringRange { min, max, charset }),
            other => Err(DomainError::malformed(
                other.kind(),
                "only string length kinds take a charset",
            )),
        }
    }

    pub const fn uuid() -> Self {
        Self::Uuid
    }

    /// The value must match `pattern`.
    pub fn regex(pattern: impl Into<String>) -> Result<Self, DomainError> {
        Self::regex_with(pattern, true)
    }

    /// With `matches = false` the value must *not* match `pattern`.
    pub fn regex_with(pattern: impl Into<String>, matches: bool) -> Result<Self, DomainError> {
        let pattern = pattern.into();
        regex::Regex::new(&pattern)
            .map_err(|e| DomainError::malformed(ConstraintKind::Regex, e.to_string()))?;
        Ok(Self::Regex { pattern, matches })
    }

    pub const fn alphanumeric() -> Self {
        Self::Alphanumeric
    }

    pub const fn alphanumeric_with_whitespace() -> Self {
        Self::AlphanumericWithWhitespace
    }

    pub const fn url() -> Self {
        Self::Url
    }

    pub const fn language() -> Self {
        Self::Language
    }

    pub const fn json() -> Self {
        Self::Json
    }

    pub fn equal_to(value: impl Into<RawValue>) -> Self {
        Self::EqualTo {
            value: value.into(),
        }
    }

    pub fn not_equal_to(value: impl Into<RawValue>) -> Self {
        Self::NotEqualTo {
            value: value.into(),
        }
    }

    pub fn identical_to(value: impl Into<RawValue>) -> Self {
        Self::IdenticalTo {
            value: value.into(),
        }
    }

    pub fn not_identical_to(value: impl Into<RawValue>) -> Self {
        Self::NotIdenticalTo {
            value: value.into(),
        }
    }

    pub fn less_than(value: impl Into<RawValue>) -> Self {
        Self::LessThan {
            value: value.into(),
        }
    }

    pub fn less_than_or_equal(value: impl Into<RawValue>) -> Self {
        Self::LessThanOrEqual {
            value: value.into(),
        }
    }

    pub fn greater_than(value: impl Into<RawValue>) -> Self {
        Self::GreaterThan {
            value: value.into(),
        }
    }

    pub fn greater_than_or_equal(value: impl Into<RawValue>) -> Self {
        Self::GreaterThanOrEqual {
            value: value.into(),
        }
    }

    /// Numeric range; each bound is optional but at least one is required.
    /// `min <= max` is the engine's concern, not the factory's.
    pub fn range(min: Option<f64>, max: Option<f64>) -> Result<Self, DomainError> {
        if min.is_none() && max.is_none() {
            return Err(DomainError::malformed(
                ConstraintKind::Range,
                "at least one of 'min' or 'max' must be set",
            ));
        }
        Ok(Self::Range { min, max })
    }

    pub const fn count(exact: usize) -> Self {
        Self::Count { exact }
    }

    pub const fn count_min(min: usize) -> Self {
        Self::CountRange {
            min: Some(min),
            max: None,
        }
    }

    pub const fn count_max(max: usize) -> Self {
        Self::CountRange {
            min: None,
            max: Some(max),
        }
    }

    pub fn count_range(min: Option<usize>, max: Option<usize>) -> Result<Self, DomainError> {
        if min.is_none() && max.is_none() {
            return Err(DomainError::malformed(
                ConstraintKind::CountRange,
                "at least one of 'min' or 'max' must be set",
            ));
        }
        Ok(Self::CountRange { min, max })
    }

    pub fn count_divisible_by(divisor: usize) -> Result<Self, DomainError> {
        if divisor == 0 {
            return Err(DomainError::malformed(
                ConstraintKind::CountDivisibleBy,
                "divisor must be greater than zero",
            ));
        }
        Ok(Self::CountDivisibleBy { divisor })
    }

    pub const fn unique() -> Self {
        Self::Unique
    }

    pub const fn positive() -> Self {
        Self::Positive
    }

    pub const fn positive_or_zero() -> Self {
        Self::PositiveOrZero
    }

    pub const fn negative() -> Self {
        Self::Negative
    }

    pub const fn negative_or_zero() -> Self {
        Self::NegativeOrZero
    }

    /// `YYYY-MM-DD`.
    pub const fn date() -> Self {
        Self::Date
    }

    pub fn date_time() -> Self {
        Self::DateTime {
            format: DateTimeFormat::default(),
        }
    }

    pub fn date_time_with_format(format: &str) -> Result<Self, DomainError> {
        let format = DateTimeFormat::parse(format)
            .map_err(|reason| DomainError::malformed(ConstraintKind::DateTime, reason))?;
        Ok(Self::DateTime { format })
    }

    /// `HH:MM:SS`, or `HH:MM` when `with_seconds` is false.
    pub const fn time(with_seconds: bool) -> Self {
        Self::Time { with_seconds }
    }

    pub const fn time_zone() -> Self {
        Self::TimeZone {
            zone: None,
            country: None,
            intl: false,
        }
    }

    pub const fn time_zone_in(zone: Option<TimezoneZone>, intl: bool) -> Self {
        Self::TimeZone {
            zone,
            country: None,
            intl,
        }
    }

    /// Only the zones in use in `country` pass.
    pub const fn time_zone_in_country(country: CountryCode, intl: bool) -> Self {
        Self::TimeZone {
            zone: None,
            country: Some(country),
            intl,
        }
    }

    pub const fn file(rules: FileRules) -> Self {
        Self::File(rules)
    }

    pub const fn image(rules: ImageRules) -> Self {
        Self::Image(rules)
    }

    pub fn choice(rules: ChoiceRules) -> Result<Self, DomainError> {
        if rules.choices.is_empty() {
            return Err(DomainError::malformed(
                ConstraintKind::Choice,
                "the choice list must not be empty",
            ));
        }
        Ok(Self::Choice(rules))
    }

    /// A single-choice descriptor over a fixed, non-empty list. An empty
    /// array fails to compile.
    pub fn choice_of<V, const N: usize>(choices: [V; N]) -> Self
    where
        V: Into<RawValue>,
    {
        const { assert!(N > 0, "the choice list must not be empty") };
        Self::Choice(ChoiceRules::new(choices))
    }

    // ── introspection ───────────────────────────────────────────────────────

    pub const fn kind(&self) -> ConstraintKind {
        match self {
            Self::NotBlank => ConstraintKind::NotBlank,
            Self::NotNull => ConstraintKind::NotNull,
            Self::Type { .. } => ConstraintKind::Type,
            Self::Email => ConstraintKind::Email,
            Self::StringLength { .. } => ConstraintKind::StringLength,
            Self::StringMin { .. } => ConstraintKind::StringMin,
            Self::StringMax { .. } => ConstraintKind::StringMax,
            Self::StringRange { .. } => ConstraintKind::StringRange,
            Self::Uuid => ConstraintKind::Uuid,
            Self::Regex { .. } => ConstraintKind::Regex,
            Self::Alphanumeric => ConstraintKind::Alphanumeric,
            Self::AlphanumericWithWhitespace => ConstraintKind::AlphanumericWithWhitespace,
            Self::Url => ConstraintKind::Url,
            Self::Language => ConstraintKind::Language,
            Self::Json => ConstraintKind::Json,
            Self::EqualTo { .. } => ConstraintKind::EqualTo,
            Self::NotEqualTo { .. } => ConstraintKind::NotEqualTo,
            Self::IdenticalTo { .. } => ConstraintKind::IdenticalTo,
            Self::NotIdenticalTo { .. } => ConstraintKind::NotIdenticalTo,
            Self::LessThan { .. } => ConstraintKind::LessThan,
            Self::LessThanOrEqual { .. } => ConstraintKind::LessThanOrEqual,
            Self::GreaterThan { .. } => ConstraintKind::GreaterThan,
            Self::GreaterThanOrEqual { .. } => ConstraintKind::GreaterThanOrEqual,
            Self::Range { .. } => ConstraintKind::Range,
            Self::Count { .. } => ConstraintKind::Count,
            Self::CountRange { .. } => ConstraintKind::CountRange,
            Self::CountDivisibleBy { .. } => ConstraintKind::CountDivisibleBy,
            Self::Unique => ConstraintKind::Unique,
            Self::Positive => ConstraintKind::Positive,
            Self::PositiveOrZero => ConstraintKind::PositiveOrZero,
            Self::Negative => ConstraintKind::Negative,
            Self::NegativeOrZero => ConstraintKind::NegativeOrZero,
            Self::Date => ConstraintKind::Date,
            Self::DateTime { .. } => ConstraintKind::DateTime,
            Self::Time { .. } => ConstraintKind::Time,
            Self::TimeZone { .. } => ConstraintKind::TimeZone,
            Self::File(_) => ConstraintKind::File,
            Self::Image(_) => ConstraintKind::Image,
            Self::Choice(_) => ConstraintKind::Choice,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        let params = self.params();
        if params.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, (name, value)) in params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}
