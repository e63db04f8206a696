//! The domain error vocabulary.
//!
//! Every validation outcome the engine can report is one of these codes. The
//! set is closed: adapters translate checking-engine identifiers into it and
//! nothing else ever reaches callers.
//!
//! # Ordering
//!
//! `Ord` follows declaration order, not the alphabet. Results are ordered by
//! discovery (see `Validator`), never sorted; the derive exists so codes can
//! key ordered collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A stable, machine-readable validation outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ── general ─────────────────────────────────────────────────────────────
    NotBlank,
    NotNull,
    Type,
    Email,
    Unique,
    Positive,
    PositiveOrZero,
    Negative,
    NegativeOrZero,
    RegexFailed,
    Alphanumeric,
    AlphanumericWithWhitespace,
    Url,
    Language,
    Json,

    // ── string ──────────────────────────────────────────────────────────────
    StringTooLong,
    StringTooShort,
    StringNotEqualLength,
    StringInvalidCharacters,

    // ── uuid ────────────────────────────────────────────────────────────────
    UuidTooShort,
    UuidTooLong,
    UuidInvalidCharacters,
    UuidInvalidHyphenPlacement,
    UuidInvalidVersion,
    UuidInvalidVariant,

    // ── comparison ──────────────────────────────────────────────────────────
    EqualTo,
    NotEqualTo,
    IdenticalTo,
    NotIdenticalTo,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    RangeTooLow,
    RangeTooHigh,
    RangeNotInRange,
    RangeInvalidCharacters,

    // ── iterable ────────────────────────────────────────────────────────────
    IterableTooFew,
    IterableTooMany,
    IterableNotEqual,
    IterableDivisibleBy,

    // ── date / time ─────────────────────────────────────────────────────────
    DateInvalid,
    DateInvalidFormat,
    DatetimeInvalidFormat,
    DatetimeInvalidDate,
    DatetimeInvalidTime,
    TimeInvalidFormat,
    TimeInvalid,
    TimezoneIdentifier,
    TimezoneIdentifierInZone,
    TimezoneIdentifierInCountry,
    TimezoneIdentifierIntl,

    // ── choice ──────────────────────────────────────────────────────────────
    ChoiceNotSuch,
    ChoiceTooFew,
    ChoiceTooMuch,

    // ── file ────────────────────────────────────────────────────────────────
    FileNotFound,
    FileNotReadable,
    FileEmpty,
    FileTooLarge,
    FileInvalidMimeType,
    FileUploadIniSize,
    FileUploadFormSize,
    FileUploadPartial,
    FileUploadNoFile,
    FileUploadNoTmpDir,
    FileUploadCantWrite,
    FileUploadExtension,

    // ── image ───────────────────────────────────────────────────────────────
    ImageTooLarge,
    ImageTooNarrow,
    ImageTooWide,
    ImageTooLow,
    ImageTooHigh,
    ImageTooFewPixels,
    ImageTooManyPixels,
    ImageRatioTooSmall,
    ImageRatioTooBig,
    ImageLandscapeNotAllowed,
    ImagePortraitNotAllowed,
    ImageSquareNotAllowed,
    ImageSizeNotDetected,
    ImageCorrupted,
}

/// Grouping of error codes by the constraint family that produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorFamily {
    General,
    String,
    Uuid,
    Comparison,
    Iterable,
    DateTime,
    Choice,
    File,
    Image,
}

impl ErrorFamily {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::Comparison => "comparison",
            Self::Iterable => "iterable",
            Self::DateTime => "date-time",
            Self::Choice => "choice",
            Self::File => "file",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for ErrorFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorFamily {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "general" => Ok(Self::General),
            "string" => Ok(Self::String),
            "uuid" => Ok(Self::Uuid),
            "comparison" => Ok(Self::Comparison),
            "iterable" | "count" => Ok(Self::Iterable),
            "date-time" | "datetime" | "date" => Ok(Self::DateTime),
            "choice" => Ok(Self::Choice),
            "file" => Ok(Self::File),
            "image" => Ok(Self::Image),
            other => Err(DomainError::UnknownIdentifier {
                what: "error family",
                value: other.to_owned(),
            }),
        }
    }
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        Self::NotBlank,
        Self::NotNull,
        Self::Type,
        Self::Email,
        Self::Unique,
        Self::Positive,
        Self::PositiveOrZero,
        Self::Negative,
        Self::NegativeOrZero,
        Self::RegexFailed,
        Self::Alphanumeric,
        Self::AlphanumericWithWhitespace,
        Self::Url,
        Self::Language,
        Self::Json,
        Self::StringTooLong,
        Self::StringTooShort,
        Self::StringNotEqualLength,
        Self::StringInvalidCharacters,
        Self::UuidTooShort,
        Self::UuidTooLong,
        Self::UuidInvalidCharacters,
        Self::UuidInvalidHyphenPlacement,
        Self::UuidInvalidVersion,
        Self::UuidInvalidVariant,
        Self::EqualTo,
        Self::NotEqualTo,
        Self::IdenticalTo,
        Self::NotIdenticalTo,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::RangeTooLow,
        Self::RangeTooHigh,
        Self::RangeNotInRange,
        Self::RangeInvalidCharacters,
        Self::IterableTooFew,
        Self::IterableTooMany,
        Self::IterableNotEqual,
        Self::IterableDivisibleBy,
        Self::DateInvalid,
        Self::DateInvalidFormat,
        Self::DatetimeInvalidFormat,
        Self::DatetimeInvalidDate,
        Self::DatetimeInvalidTime,
        Self::TimeInvalidFormat,
        Self::TimeInvalid,
        Self::TimezoneIdentifier,
        Self::TimezoneIdentifierInZone,
        Self::TimezoneIdentifierInCountry,
        Self::TimezoneIdentifierIntl,
        Self::ChoiceNotSuch,
        Self::ChoiceTooFew,
        Self::ChoiceTooMuch,
        Self::FileNotFound,
        Self::FileNotReadable,
        Self::FileEmpty,
        Self::FileTooLarge,
        Self::FileInvalidMimeType,
        Self::FileUploadIniSize,
        Self::FileUploadFormSize,
        Self::FileUploadPartial,
        Self::FileUploadNoFile,
        Self::FileUploadNoTmpDir,
        Self::FileUploadCantWrite,
        Self::FileUploadExtension,
        Self::ImageTooLarge,
        Self::ImageTooNarrow,
        Self::ImageTooWide,
        Self::ImageTooLow,
        Self::ImageTooHigh,
        Self::ImageTooFewPixels,
        Self::ImageTooManyPixels,
        Self::ImageRatioTooSmall,
        Self::ImageRatioTooBig,
        Self::ImageLandscapeNotAllowed,
        Self::ImagePortraitNotAllowed,
        Self::ImageSquareNotAllowed,
        Self::ImageSizeNotDetected,
        Self::ImageCorrupted,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotBlank => "NOT_BLANK",
            Self::NotNull => "NOT_NULL",
            Self::Type => "TYPE",
            Self::Email => "EMAIL",
            Self::Unique => "UNIQUE",
            Self::Positive => "POSITIVE",
            Self::PositiveOrZero => "POSITIVE_OR_ZERO",
            Self::Negative => "NEGATIVE",
            Self::NegativeOrZero => "NEGATIVE_OR_ZERO",
            Self::RegexFailed => "REGEX_FAILED",
            Self::Alphanumeric => "ALPHANUMERIC",
            Self::AlphanumericWithWhitespace => "ALPHANUMERIC_WITH_WHITESPACE",
            Self::Url => "URL",
            Self::Language => "LANGUAGE",
            Self::Json => "JSON",
            Self::StringTooLong => "STRING_TOO_LONG",
            Self::StringTooShort => "STRING_TOO_SHORT",
            Self::StringNotEqualLength => "STRING_NOT_EQUAL_LENGTH",
            Self::StringInvalidCharacters => "STRING_INVALID_CHARACTERS",
            Self::UuidTooShort => "UUID_TOO_SHORT",
            Self::UuidTooLong => "UUID_TOO_LONG",
            Self::UuidInvalidCharacters => "UUID_INVALID_CHARACTERS",
            Self::UuidInvalidHyphenPlacement => "UUID_INVALID_HYPHEN_PLACEMENT",
            Self::UuidInvalidVersion => "UUID_INVALID_VERSION",
            Self::UuidInvalidVariant => "UUID_INVALID_VARIANT",
            Self::EqualTo => "EQUAL_TO",
            Self::NotEqualTo => "NOT_EQUAL_TO",
            Self::IdenticalTo => "IDENTICAL_TO",
            Self::NotIdenticalTo => "NOT_IDENTICAL_TO",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Self::RangeTooLow => "RANGE_TOO_LOW",
            Self::RangeTooHigh => "RANGE_TOO_HIGH",
            Self::RangeNotInRange => "RANGE_NOT_IN_RANGE",
            Self::RangeInvalidCharacters => "RANGE_INVALID_CHARACTERS",
            Self::IterableTooFew => "ITERABLE_TOO_FEW",
            Self::IterableTooMany => "ITERABLE_TOO_MANY",
            Self::IterableNotEqual => "ITERABLE_NOT_EQUAL",
            Self::IterableDivisibleBy => "ITERABLE_DIVISIBLE_BY",
            Self::DateInvalid => "DATE_INVALID",
            Self::DateInvalidFormat => "DATE_INVALID_FORMAT",
            Self::DatetimeInvalidFormat => "DATETIME_INVALID_FORMAT",
            Self::DatetimeInvalidDate => "DATETIME_INVALID_DATE",
            Self::DatetimeInvalidTime => "DATETIME_INVALID_TIME",
            Self::TimeInvalidFormat => "TIME_INVALID_FORMAT",
            Self::TimeInvalid => "TIME_INVALID",
            Self::TimezoneIdentifier => "TIMEZONE_IDENTIFIER",
            Self::TimezoneIdentifierInZone => "TIMEZONE_IDENTIFIER_IN_ZONE",
            Self::TimezoneIdentifierInCountry => "TIMEZONE_IDENTIFIER_IN_COUNTRY",
            Self::TimezoneIdentifierIntl => "TIMEZONE_IDENTIFIER_INTL",
            Self::ChoiceNotSuch => "CHOICE_NOT_SUCH",
            Self::ChoiceTooFew => "CHOICE_TOO_FEW",
            Self::ChoiceTooMuch => "CHOICE_TOO_MUCH",
            Self::FileNotFound => "FILE_NOT_FOUND",
            Self::FileNotReadable => "FILE_NOT_READABLE",
            Self::FileEmpty => "FILE_EMPTY",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::FileInvalidMimeType => "FILE_INVALID_MIME_TYPE",
            Self::FileUploadIniSize => "FILE_UPLOAD_INI_SIZE",
            Self::FileUploadFormSize => "FILE_UPLOAD_FORM_SIZE",
            Self::FileUploadPartial => "FILE_UPLOAD_PARTIAL",
            Self::FileUploadNoFile => "FILE_UPLOAD_NO_FILE",
            Self::FileUploadNoTmpDir => "FILE_UPLOAD_NO_TMP_DIR",
            Self::FileUploadCantWrite => "FILE_UPLOAD_CANT_WRITE",
            Self::FileUploadExtension => "FILE_UPLOAD_EXTENSION",
            Self::ImageTooLarge => "IMAGE_TOO_LARGE",
            Self::ImageTooNarrow => "IMAGE_TOO_NARROW",
            Self::ImageTooWide => "IMAGE_TOO_WIDE",
            Self::ImageTooLow => "IMAGE_TOO_LOW",
            Self::ImageTooHigh => "IMAGE_TOO_HIGH",
            Self::ImageTooFewPixels => "IMAGE_TOO_FEW_PIXELS",
            Self::ImageTooManyPixels => "IMAGE_TOO_MANY_PIXELS",
            Self::ImageRatioTooSmall => "IMAGE_RATIO_TOO_SMALL",
            Self::ImageRatioTooBig => "IMAGE_RATIO_TOO_BIG",
            Self::ImageLandscapeNotAllowed => "IMAGE_LANDSCAPE_NOT_ALLOWED",
            Self::ImagePortraitNotAllowed => "IMAGE_PORTRAIT_NOT_ALLOWED",
            Self::ImageSquareNotAllowed => "IMAGE_SQUARE_NOT_ALLOWED",
            Self::ImageSizeNotDetected => "IMAGE_SIZE_NOT_DETECTED",
            Self::ImageCorrupted => "IMAGE_CORRUPTED",
        }
    }

    pub const fn family(&self) -> ErrorFamily {
        match self {
            Self::NotBlank
            | Self::NotNull
            | Self::Type
            | Self::Email
            | Self::Unique
            | Self::Positive
            | Self::PositiveOrZero
            | Self::Negative
            | Self::NegativeOrZero
            | Self::RegexFailed
            | Self::Alphanumeric
            | Self::AlphanumericWithWhitespace
            | Self::Url
            | Self::Language
            | Self::Json => ErrorFamily::General,
            Self::StringTooLong
            | Self::StringTooShort
            | Self::StringNotEqualLength
            | Self::StringInvalidCharacters => ErrorFamily::String,
            Self::UuidTooShort
            | Self::UuidTooLong
            | Self::UuidInvalidCharacters
            | Self::UuidInvalidHyphenPlacement
            | Self::UuidInvalidVersion
            | Self::UuidInvalidVariant => ErrorFamily::Uuid,
            Self::EqualTo
            | Self::NotEqualTo
            | Self::IdenticalTo
            | Self::NotIdenticalTo
            | Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::RangeTooLow
            | Self::RangeTooHigh
            | Self::RangeNotInRange
            | Self::RangeInvalidCharacters => ErrorFamily::Comparison,
            Self::IterableTooFew
            | Self::IterableTooMany
            | Self::IterableNotEqual
            | Self::IterableDivisibleBy => ErrorFamily::Iterable,
            Self::DateInvalid
            | Self::DateInvalidFormat
            | Self::DatetimeInvalidFormat
            | Self::DatetimeInvalidDate
            | Self::DatetimeInvalidTime
            | Self::TimeInvalidFormat
            | Self::TimeInvalid
            | Self::TimezoneIdentifier
            | Self::TimezoneIdentifierInZone
            | Self::TimezoneIdentifierInCountry
            | Self::TimezoneIdentifierIntl => ErrorFamily::DateTime,
            Self::ChoiceNotSuch | Self::ChoiceTooFew | Self::ChoiceTooMuch => ErrorFamily::Choice,
            Self::FileNotFound
            | Self::FileNotReadable
            | Self::FileEmpty
            | Self::FileTooLarge
            | Self::FileInvalidMimeType
            | Self::FileUploadIniSize
            | Self::FileUploadFormSize
            | Self::FileUploadPartial
            | Self::FileUploadNoFile
            | Self::FileUploadNoTmpDir
            | Self::FileUploadCantWrite
            | Self::FileUploadExtension => ErrorFamily::File,
            Self::ImageTooLarge
            | Self::ImageTooNarrow
            | Self::ImageTooWide
            | Self::ImageTooLow
            | Self::ImageTooHigh
            | Self::ImageTooFewPixels
            | Self::ImageTooManyPixels
            | Self::ImageRatioTooSmall
            | Self::ImageRatioTooBig
            | Self::ImageLandscapeNotAllowed
            | Self::ImagePortraitNotAllowed
            | Self::ImageSquareNotAllowed
            | Self::ImageSizeNotDetected
            | Self::ImageCorrupted => ErrorFamily::Image,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == wanted)
            .ok_or(DomainError::UnknownIdentifier {
                what: "error code",
                value: s.to_owned(),
            })
    }
}
