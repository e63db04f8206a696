//! Adapter registry.
//!
//! [`ADAPTER_REGISTRY`] is the single source of truth for which family and
//! which error map serve each constraint kind. [`adapt`] builds the engine
//! check by exhaustive match over [`Constraint`], so a new descriptor variant
//! does not compile until it is given a check; the integrity assertion then
//! catches a missing registry entry.

use super::{
    AdapterFamily, Adapted, ErrorMap, choice, comparison, datetime, file, general, iterable,
    string,
};
use crate::application::EngineError;
use crate::application::ports::{Check, CompareOp};
use crate::domain::{Constraint, ConstraintKind, ErrorFamily};

/// Describes how one constraint kind is adapted.
#[derive(Debug, Clone, Copy)]
pub struct AdapterEntry {
    pub kind: ConstraintKind,
    pub family: AdapterFamily,
    pub errors: ErrorMap,
}

macro_rules! entry {
    ($kind:ident, $family:ident, $errors:expr) => {
        AdapterEntry {
            kind: ConstraintKind::$kind,
            family: AdapterFamily::$family,
            errors: $errors,
        }
    };
}

/// One entry per constraint kind.
pub static ADAPTER_REGISTRY: &[AdapterEntry] = &[
    entry!(NotBlank, General, general::NOT_BLANK),
    entry!(NotNull, General, general::NOT_NULL),
    entry!(Type, General, general::TYPE),
    entry!(Email, General, general::EMAIL),
    entry!(StringLength, String, string::STRING_LENGTH),
    entry!(StringMin, String, string::STRING_MIN),
    entry!(StringMax, String, string::STRING_MAX),
    entry!(StringRange, String, string::STRING_RANGE),
    entry!(Uuid, String, string::UUID),
    entry!(Regex, String, string::REGEX),
    entry!(Alphanumeric, String, string::ALPHANUMERIC),
    entry!(
        AlphanumericWithWhitespace,
        String,
        string::ALPHANUMERIC_WITH_WHITESPACE
    ),
    entry!(Url, General, general::URL),
    entry!(Language, General, general::LANGUAGE),
    entry!(Json, General, general::JSON),
    entry!(EqualTo, Comparison, comparison::EQUAL_TO),
    entry!(NotEqualTo, Comparison, comparison::NOT_EQUAL_TO),
    entry!(IdenticalTo, Comparison, comparison::IDENTICAL_TO),
    entry!(NotIdenticalTo, Comparison, comparison::NOT_IDENTICAL_TO),
    entry!(LessThan, Comparison, comparison::LESS_THAN),
    entry!(LessThanOrEqual, Comparison, comparison::LESS_THAN_OR_EQUAL),
    entry!(GreaterThan, Comparison, comparison::GREATER_THAN),
    entry!(
        GreaterThanOrEqual,
        Comparison,
        comparison::GREATER_THAN_OR_EQUAL
    ),
    entry!(Range, Comparison, comparison::RANGE),
    entry!(Count, Iterable, iterable::COUNT),
    entry!(CountRange, Iterable, iterable::COUNT_RANGE),
    entry!(CountDivisibleBy, Iterable, iterable::COUNT_DIVISIBLE_BY),
    entry!(Unique, General, general::UNIQUE),
    entry!(Positive, General, general::POSITIVE),
    entry!(PositiveOrZero, General, general::POSITIVE_OR_ZERO),
    entry!(Negative, General, general::NEGATIVE),
    entry!(NegativeOrZero, General, general::NEGATIVE_OR_ZERO),
    entry!(Date, DateTime, datetime::DATE),
    entry!(DateTime, DateTime, datetime::DATE_TIME),
    entry!(Time, DateTime, datetime::TIME),
    entry!(TimeZone, DateTime, datetime::TIME_ZONE),
    entry!(File, File, file::FILE),
    entry!(Image, File, file::IMAGE),
    entry!(Choice, Choice, choice::CHOICE),
];

// ── Registry lookup API ──────────────────────────────────────────────────────

/// Find the registry entry for a kind.
///
/// Returns `None` only if the kind is not registered, a programming error
/// that `assert_registry_integrity` catches.
pub fn find_adapter(kind: ConstraintKind) -> Option<&'static AdapterEntry> {
    ADAPTER_REGISTRY.iter().find(|entry| entry.kind == kind)
}

/// Translate a descriptor into its engine check and error map.
pub fn adapt(constraint: &Constraint) -> Result<Adapted, EngineError> {
    let kind = constraint.kind();
    let entry = find_adapter(kind).ok_or(EngineError::UnregisteredKind { kind })?;
    Ok(Adapted {
        kind,
        check: check_for(constraint),
        errors: entry.errors,
    })
}

fn check_for(constraint: &Constraint) -> Check {
    use Constraint as C;

    match constraint {
        C::NotBlank => general::not_blank(),
        C::NotNull => general::not_null(),
        C::Type { expected } => general::of_type(*expected),
        C::Email => general::email(),
        C::StringLength { exact, charset } => string::exact_length(*exact, *charset),
        C::StringMin { min, charset } => string::length(Some(*min), None, *charset),
        C::StringMax { max, charset } => string::length(None, Some(*max), *charset),
        C::StringRange { min, max, charset } => {
            string::length(Some(*min), Some(*max), *charset)
        }
        C::Uuid => string::uuid(),
        C::Regex { pattern, matches } => string::regex(pattern, *matches),
        C::Alphanumeric => string::alphanumeric(),
        C::AlphanumericWithWhitespace => string::alphanumeric_with_whitespace(),
        C::Url => general::url(),
        C::Language => general::language(),
        C::Json => general::json(),
        C::EqualTo { value } => comparison::compare(CompareOp::Equal, value),
        C::NotEqualTo { value } => comparison::compare(CompareOp::NotEqual, value),
        C::IdenticalTo { value } => comparison::compare(CompareOp::Identical, value),
        C::NotIdenticalTo { value } => comparison::compare(CompareOp::NotIdentical, value),
        C::LessThan { value } => comparison::compare(CompareOp::Less, value),
        C::LessThanOrEqual { value } => comparison::compare(CompareOp::LessOrEqual, value),
        C::GreaterThan { value } => comparison::compare(CompareOp::Greater, value),
        C::GreaterThanOrEqual { value } => comparison::compare(CompareOp::GreaterOrEqual, value),
        C::Range { min, max } => comparison::range(*min, *max),
        C::Count { exact } => iterable::exact_count(*exact),
        C::CountRange { min, max } => iterable::count(*min, *max),
        C::CountDivisibleBy { divisor } => iterable::divisible_by(*divisor),
        C::Unique => general::unique(),
        C::Positive => general::positive(),
        C::PositiveOrZero => general::positive_or_zero(),
        C::Negative => general::negative(),
        C::NegativeOrZero => general::negative_or_zero(),
        C::Date => datetime::date(),
        C::DateTime { format } => datetime::date_time(format),
        C::Time { with_seconds } => datetime::time(*with_seconds),
        C::TimeZone { zone, country, intl } => datetime::time_zone(*zone, *country, *intl),
        C::File(rules) => file::file(rules),
        C::Image(rules) => file::image(rules),
        C::Choice(rules) => choice::choice(rules),
    }
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registry is internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
/// Catches registration errors at development time, not at user runtime.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    // Every kind is registered exactly once.
    for &kind in ConstraintKind::ALL {
        let count = ADAPTER_REGISTRY.iter().filter(|e| e.kind == kind).count();
        assert_eq!(count, 1, "{kind} is registered {count} times");
    }
    assert_eq!(
        ADAPTER_REGISTRY.len(),
        ConstraintKind::ALL.len(),
        "registry has entries for unknown kinds"
    );

    for entry in ADAPTER_REGISTRY {
        assert!(!entry.errors.is_empty(), "{} has an empty error map", entry.kind);

        // No engine identifier is translated twice by one map.
        for (i, (code, _)) in entry.errors.iter().enumerate() {
            let repeats = entry.errors[i + 1..]
                .iter()
                .filter(|(other, _)| other == code)
                .count();
            assert_eq!(repeats, 0, "{}: '{code}' is mapped more than once", entry.kind);
        }

        // A map stays inside its family. String adapters also own the uuid
        // and pattern codes; the image map reuses the file codes.
        for (code, domain) in entry.errors {
            let family = domain.family();
            let allowed = match entry.family {
                AdapterFamily::General => family == ErrorFamily::General,
                AdapterFamily::String => {
                    matches!(family, ErrorFamily::String | ErrorFamily::Uuid | ErrorFamily::General)
                }
                AdapterFamily::Comparison => family == ErrorFamily::Comparison,
                AdapterFamily::DateTime => family == ErrorFamily::DateTime,
                AdapterFamily::Iterable => family == ErrorFamily::Iterable,
                AdapterFamily::Choice => family == ErrorFamily::Choice,
                AdapterFamily::File => matches!(family, ErrorFamily::File | ErrorFamily::Image),
            };
            assert!(
                allowed,
                "{}: '{code}' maps to {domain}, outside the {} family",
                entry.kind, entry.family
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::constraint_adapters::translate;
    use crate::application::ports::EngineCode;
    use crate::domain::{Charset, CountryCode, ErrorCode, FileRules, ImageRules};

    #[test]
    fn registry_is_internally_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn every_domain_code_is_reachable_from_some_map() {
        for &code in ErrorCode::ALL {
            let reachable = ADAPTER_REGISTRY
                .iter()
                .any(|e| e.errors.iter().any(|(_, d)| *d == code));
            assert!(reachable, "{code} is produced by no adapter");
        }
    }

    #[test]
    fn length_kinds_share_one_check() {
        let range = adapt(&Constraint::string_range(2, 5)).unwrap();
        assert_eq!(
            range.check,
            Check::Length {
                min: Some(2),
                max: Some(5),
                charset: Charset::Utf8,
            }
        );
        let exact = adapt(&Constraint::string_length(3)).unwrap();
        assert_eq!(
            exact.check,
            Check::Length {
                min: Some(3),
                max: Some(3),
                charset: Charset::Utf8,
            }
        );
        assert_eq!(range.kind, ConstraintKind::StringRange);
    }

    #[test]
    fn charset_and_country_reach_the_check() {
        let ascii = Constraint::string_min(2).with_charset(Charset::Ascii).unwrap();
        assert!(matches!(
            adapt(&ascii).unwrap().check,
            Check::Length {
                charset: Charset::Ascii,
                ..
            }
        ));

        let fr: CountryCode = "FR".parse().unwrap();
        let adapted = adapt(&Constraint::time_zone_in_country(fr, false)).unwrap();
        assert_eq!(
            adapted.check,
            Check::Timezone {
                zone: None,
                country: Some(fr),
                intl: false,
            }
        );
        assert_eq!(
            translate(adapted.errors, EngineCode::TimezoneIdentifierInCountry),
            Some(ErrorCode::TimezoneIdentifierInCountry)
        );
    }

    #[test]
    fn file_and_image_translate_too_large_differently() {
        let file = adapt(&Constraint::file(FileRules::new())).unwrap();
        let image = adapt(&Constraint::image(ImageRules::new())).unwrap();
        assert_eq!(
            translate(file.errors, EngineCode::TooLarge),
            Some(ErrorCode::FileTooLarge)
        );
        assert_eq!(
            translate(image.errors, EngineCode::TooLarge),
            Some(ErrorCode::ImageTooLarge)
        );
    }

    #[test]
    fn sign_kinds_compare_against_zero() {
        let adapted = adapt(&Constraint::negative_or_zero()).unwrap();
        assert!(matches!(
            adapted.check,
            Check::Comparison {
                op: CompareOp::LessOrEqual,
                ..
            }
        ));
    }
}
