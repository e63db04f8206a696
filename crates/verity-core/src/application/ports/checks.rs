//! The checking engine's language.
//!
//! A [`Check`] is what the engine executes; it is coarser than a descriptor
//! (several descriptor kinds share one check, e.g. every string-length kind
//! becomes [`Check::Length`]). An [`EngineCode`] is what the engine reports;
//! it only gains domain meaning through an adapter's error map.

use std::fmt;

use thiserror::Error;

use crate::domain::{
    Charset, ChoiceRules, CountryCode, DateTimeFormat, FileRules, ImageRules, RawValue,
    TimezoneZone, UploadError, ValueType,
};

// ── Check ────────────────────────────────────────────────────────────────────

/// Comparison operator of [`Check::Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// Loose equality.
    Equal,
    NotEqual,
    /// Strict identity (same representation and value).
    Identical,
    NotIdentical,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl CompareOp {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Identical => "===",
            Self::NotIdentical => "!==",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

/// A concrete, executable check.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    NotBlank,
    NotNull,
    Type(ValueType),
    Email,
    /// Character count bounds; `min == max` is an exact-length check.
    Length {
        min: Option<usize>,
        max: Option<usize>,
        charset: Charset,
    },
    Uuid,
    Regex {
        pattern: String,
        matches: bool,
    },
    Url,
    Language,
    Json,
    Comparison {
        op: CompareOp,
        value: RawValue,
    },
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Element count bounds; `min == max` is an exact-count check.
    Count {
        min: Option<usize>,
        max: Option<usize>,
    },
    DivisibleBy {
        divisor: usize,
    },
    Unique,
    Date,
    DateTime {
        format: DateTimeFormat,
    },
    Time {
        with_seconds: bool,
    },
    Timezone {
        zone: Option<TimezoneZone>,
        country: Option<CountryCode>,
        intl: bool,
    },
    File(FileRules),
    Image(ImageRules),
    Choice(ChoiceRules),
}

impl Check {
    /// Stable name used in violations and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotBlank => "NotBlank",
            Self::NotNull => "NotNull",
            Self::Type(_) => "Type",
            Self::Email => "Email",
            Self::Length { .. } => "Length",
            Self::Uuid => "Uuid",
            Self::Regex { .. } => "Regex",
            Self::Url => "Url",
            Self::Language => "Language",
            Self::Json => "Json",
            Self::Comparison { .. } => "Comparison",
            Self::Range { .. } => "Range",
            Self::Count { .. } => "Count",
            Self::DivisibleBy { .. } => "DivisibleBy",
            Self::Unique => "Unique",
            Self::Date => "Date",
            Self::DateTime { .. } => "DateTime",
            Self::Time { .. } => "Time",
            Self::Timezone { .. } => "Timezone",
            Self::File(_) => "File",
            Self::Image(_) => "Image",
            Self::Choice(_) => "Choice",
        }
    }
}

// ── EngineCode ───────────────────────────────────────────────────────────────

/// Every violation identifier the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineCode {
    NotBlank,
    NotNull,
    InvalidType,
    InvalidEmail,
    TooShort,
    TooLong,
    NotEqualLength,
    InvalidCharacters,
    InvalidHyphenPlacement,
    InvalidVersion,
    InvalidVariant,
    RegexFailed,
    InvalidUrl,
    NoSuchLanguage,
    InvalidJson,
    NotEqual,
    Equal,
    NotIdentical,
    Identical,
    TooLow,
    TooHigh,
    NotInRange,
    TooFew,
    TooMany,
    NotEqualCount,
    NotDivisibleBy,
    NotUnique,
    InvalidFormat,
    InvalidDate,
    InvalidTime,
    TimezoneIdentifier,
    TimezoneIdentifierInZone,
    TimezoneIdentifierInCountry,
    TimezoneIdentifierIntl,
    NoSuchChoice,
    NotFound,
    NotReadable,
    Empty,
    TooLarge,
    InvalidMimeType,
    Upload(UploadError),
    SizeNotDetected,
    TooWide,
    TooNarrow,
    TooFewPixels,
    TooManyPixels,
    RatioTooBig,
    RatioTooSmall,
    SquareNotAllowed,
    LandscapeNotAllowed,
    PortraitNotAllowed,
    CorruptedImage,
}

impl EngineCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotBlank => "not-blank",
            Self::NotNull => "not-null",
            Self::InvalidType => "invalid-type",
            Self::InvalidEmail => "invalid-email",
            Self::TooShort => "too-short",
            Self::TooLong => "too-long",
            Self::NotEqualLength => "not-equal-length",
            Self::InvalidCharacters => "invalid-characters",
            Self::InvalidHyphenPlacement => "invalid-hyphen-placement",
            Self::InvalidVersion => "invalid-version",
            Self::InvalidVariant => "invalid-variant",
            Self::RegexFailed => "regex-failed",
            Self::InvalidUrl => "invalid-url",
            Self::NoSuchLanguage => "no-such-language",
            Self::InvalidJson => "invalid-json",
            Self::NotEqual => "not-equal",
            Self::Equal => "equal",
            Self::NotIdentical => "not-identical",
            Self::Identical => "identical",
            Self::TooLow => "too-low",
            Self::TooHigh => "too-high",
            Self::NotInRange => "not-in-range",
            Self::TooFew => "too-few",
            Self::TooMany => "too-many",
            Self::NotEqualCount => "not-equal-count",
            Self::NotDivisibleBy => "not-divisible-by",
            Self::NotUnique => "not-unique",
            Self::InvalidFormat => "invalid-format",
            Self::InvalidDate => "invalid-date",
            Self::InvalidTime => "invalid-time",
            Self::TimezoneIdentifier => "timezone-identifier",
            Self::TimezoneIdentifierInZone => "timezone-identifier-in-zone",
            Self::TimezoneIdentifierInCountry => "timezone-identifier-in-country",
            Self::TimezoneIdentifierIntl => "timezone-identifier-intl",
            Self::NoSuchChoice => "no-such-choice",
            Self::NotFound => "not-found",
            Self::NotReadable => "not-readable",
            Self::Empty => "empty",
            Self::TooLarge => "too-large",
            Self::InvalidMimeType => "invalid-mime-type",
            Self::Upload(UploadError::IniSize) => "upload-ini-size",
            Self::Upload(UploadError::FormSize) => "upload-form-size",
            Self::Upload(UploadError::Partial) => "upload-partial",
            Self::Upload(UploadError::NoFile) => "upload-no-file",
            Self::Upload(UploadError::NoTmpDir) => "upload-no-tmp-dir",
            Self::Upload(UploadError::CantWrite) => "upload-cant-write",
            Self::Upload(UploadError::Extension) => "upload-extension",
            Self::SizeNotDetected => "size-not-detected",
            Self::TooWide => "too-wide",
            Self::TooNarrow => "too-narrow",
            Self::TooFewPixels => "too-few-pixels",
            Self::TooManyPixels => "too-many-pixels",
            Self::RatioTooBig => "ratio-too-big",
            Self::RatioTooSmall => "ratio-too-small",
            Self::SquareNotAllowed => "square-not-allowed",
            Self::LandscapeNotAllowed => "landscape-not-allowed",
            Self::PortraitNotAllowed => "portrait-not-allowed",
            Self::CorruptedImage => "corrupted-image",
        }
    }
}

impl fmt::Display for EngineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Violation / CheckError ───────────────────────────────────────────────────

/// One failure reported by the engine. Never leaves the application layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub code: EngineCode,
    pub invalid_value: RawValue,
    /// Name of the check that produced it (see [`Check::name`]).
    pub check: &'static str,
}

impl Violation {
    pub fn new(code: EngineCode, invalid_value: RawValue, check: &Check) -> Self {
        Self {
            code,
            invalid_value,
            check: check.name(),
        }
    }
}

/// A check that could not be executed at all. Always fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckError {
    #[error("{check} cannot inspect a {found} value (expected {expected})")]
    UnexpectedValue {
        check: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid {check} check: {reason}")]
    InvalidCheck { check: &'static str, reason: String },
}

impl CheckError {
    pub fn unexpected(check: &Check, expected: &'static str, found: &RawValue) -> Self {
        Self::UnexpectedValue {
            check: check.name(),
            expected,
            found: found.type_name(),
        }
    }
}

// ── File metadata ────────────────────────────────────────────────────────────

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Why image dimensions could not be read.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DimensionError {
    #[error("image size could not be detected")]
    Undetectable,
    #[error("image data is corrupted")]
    Corrupted,
}
