//! String adapters: length, uuid and pattern checks.
//!
//! All four length kinds share [`Check::Length`]; they differ only in which
//! bounds they set. An exact length is `min == max`, for which the engine
//! reports `NotEqualLength` instead of a too-short / too-long pair. A value
//! outside the descriptor's charset reports `InvalidCharacters` alone.

use super::ErrorMap;
use crate::application::ports::{Check, EngineCode as E};
use crate::domain::{Charset, ErrorCode as D};

const LENGTH_CODES: ErrorMap = &[
    (E::TooLong, D::StringTooLong),
    (E::TooShort, D::StringTooShort),
    (E::NotEqualLength, D::StringNotEqualLength),
    (E::InvalidCharacters, D::StringInvalidCharacters),
];

pub static STRING_LENGTH: ErrorMap = LENGTH_CODES;
pub static STRING_MIN: ErrorMap = LENGTH_CODES;
pub static STRING_MAX: ErrorMap = LENGTH_CODES;
pub static STRING_RANGE: ErrorMap = LENGTH_CODES;

pub static UUID: ErrorMap = &[
    (E::TooShort, D::UuidTooShort),
    (E::TooLong, D::UuidTooLong),
    (E::InvalidCharacters, D::UuidInvalidCharacters),
    (E::InvalidHyphenPlacement, D::UuidInvalidHyphenPlacement),
    (E::InvalidVersion, D::UuidInvalidVersion),
    (E::InvalidVariant, D::UuidInvalidVariant),
];

pub static REGEX: ErrorMap = &[(E::RegexFailed, D::RegexFailed)];
pub static ALPHANUMERIC: ErrorMap = &[(E::RegexFailed, D::Alphanumeric)];
pub static ALPHANUMERIC_WITH_WHITESPACE: ErrorMap =
    &[(E::RegexFailed, D::AlphanumericWithWhitespace)];

const ALPHANUMERIC_PATTERN: &str = r"^[a-zA-Z0-9]+$";
const ALPHANUMERIC_WITH_WHITESPACE_PATTERN: &str = r"^[a-zA-Z0-9\s]+$";

pub fn length(min: Option<usize>, max: Option<usize>, charset: Charset) -> Check {
    Check::Length { min, max, charset }
}

pub fn exact_length(exact: usize, charset: Charset) -> Check {
    length(Some(exact), Some(exact), charset)
}

pub fn uuid() -> Check {
    Check::Uuid
}

pub fn regex(pattern: &str, matches: bool) -> Check {
    Check::Regex {
        pattern: pattern.to_owned(),
        matches,
    }
}

pub fn alphanumeric() -> Check {
    regex(ALPHANUMERIC_PATTERN, true)
}

pub fn alphanumeric_with_whitespace() -> Check {
    regex(ALPHANUMERIC_WITH_WHITESPACE_PATTERN, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::constraint_adapters::translate;

    #[test]
    fn uuid_and_string_maps_share_identifiers_but_not_codes() {
        assert_eq!(
            translate(UUID, E::InvalidCharacters),
            Some(D::UuidInvalidCharacters)
        );
        assert_eq!(
            translate(STRING_RANGE, E::InvalidCharacters),
            Some(D::StringInvalidCharacters)
        );
    }

    #[test]
    fn alphanumeric_patterns_compile() {
        for check in [alphanumeric(), alphanumeric_with_whitespace()] {
            let Check::Regex { pattern, .. } = check else {
                panic!("expected a regex check");
            };
            assert!(regex::Regex::new(&pattern).is_ok());
        }
    }
}
