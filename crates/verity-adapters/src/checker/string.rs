//! String checks: length, uuid and patterns.

use regex::Regex;
use verity_core::application::ports::{Check, EngineCode};
use verity_core::domain::{Charset, RawValue};

use super::{Outcome, fail, pass, text};

const UUID_LENGTH: usize = 36;
const HYPHENS: [usize; 4] = [8, 13, 18, 23];
const VERSION_AT: usize = 14;
const VARIANT_AT: usize = 19;

/// Character count bounds. Only null is skipped: an empty string has a length.
/// Characters outside `charset` fail the check before it counts anything.
pub(super) fn length(
    check: &Check,
    value: &RawValue,
    min: Option<usize>,
    max: Option<usize>,
    charset: Charset,
) -> Outcome {
    if value.is_null() {
        return pass();
    }
    let subject = text(check, value)?;
    if !charset.accepts(&subject) {
        return fail(EngineCode::InvalidCharacters);
    }
    let len = subject.chars().count();

    if let (Some(min), Some(max)) = (min, max) {
        if min == max {
            return if len == min {
                pass()
            } else {
                fail(EngineCode::NotEqualLength)
            };
        }
    }
    if max.is_some_and(|max| len > max) {
        return fail(EngineCode::TooLong);
    }
    if min.is_some_and(|min| len < min) {
        return fail(EngineCode::TooShort);
    }
    pass()
}

/// Strict RFC 4122 form: `xxxxxxxx-xxxx-Vxxx-Nxxx-xxxxxxxxxxxx`, lowercase
/// or uppercase hex, version 1 to 8, variant `10xx`.
pub(super) fn uuid(check: &Check, value: &RawValue) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let uuid = text(check, value)?;
    let bytes = uuid.as_bytes();

    for (i, &b) in bytes.iter().enumerate().take(UUID_LENGTH) {
        if HYPHENS.contains(&i) {
            if b != b'-' {
                return fail(EngineCode::InvalidHyphenPlacement);
            }
        } else if b == b'-' {
            return fail(EngineCode::InvalidHyphenPlacement);
        } else if !b.is_ascii_hexdigit() {
            return fail(EngineCode::InvalidCharacters);
        }
    }
    if bytes.len() < UUID_LENGTH {
        return fail(EngineCode::TooShort);
    }
    if bytes.len() > UUID_LENGTH {
        return fail(EngineCode::TooLong);
    }
    if !matches!(bytes[VERSION_AT], b'1'..=b'8') {
        return fail(EngineCode::InvalidVersion);
    }
    if !matches!(bytes[VARIANT_AT], b'8' | b'9' | b'a' | b'b' | b'A' | b'B') {
        return fail(EngineCode::InvalidVariant);
    }
    pass()
}

/// Passes when the outcome of matching equals `matches`.
pub(super) fn regex(check: &Check, value: &RawValue, pattern: &Regex, matches: bool) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let subject = text(check, value)?;
    if pattern.is_match(&subject) == matches {
        pass()
    } else {
        fail(EngineCode::RegexFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn len(value: &str, min: Option<usize>, max: Option<usize>) -> Vec<EngineCode> {
        len_in(Charset::Utf8, value, min, max)
    }

    fn len_in(charset: Charset, value: &str, min: Option<usize>, max: Option<usize>) -> Vec<EngineCode> {
        let check = Check::Length { min, max, charset };
        length(&check, &RawValue::str(value), min, max, charset).unwrap()
    }

    fn uuid_of(value: &str) -> Vec<EngineCode> {
        uuid(&Check::Uuid, &RawValue::str(value)).unwrap()
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(len("héllo", Some(5), Some(5)).is_empty());
        assert_eq!(len("hé", Some(5), Some(5)), [EngineCode::NotEqualLength]);
    }

    #[test]
    fn length_reports_one_bound() {
        assert_eq!(len("a", Some(2), Some(5)), [EngineCode::TooShort]);
        assert_eq!(len("abcdef", Some(2), Some(5)), [EngineCode::TooLong]);
        assert!(len("abc", Some(2), Some(5)).is_empty());
        assert_eq!(len("", Some(1), None), [EngineCode::TooShort]);
    }

    #[test]
    fn length_skips_null_only() {
        let check = Check::Length {
            min: Some(1),
            max: None,
            charset: Charset::Utf8,
        };
        assert!(
            length(&check, &RawValue::Null, Some(1), None, Charset::Utf8)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn length_rejects_characters_outside_the_charset() {
        assert_eq!(
            len_in(Charset::Ascii, "café", Some(1), Some(1)),
            [EngineCode::InvalidCharacters]
        );
        assert!(len_in(Charset::Latin1, "café", Some(4), Some(4)).is_empty());
        assert_eq!(
            len_in(Charset::Latin1, "😀😀", Some(1), Some(1)),
            [EngineCode::InvalidCharacters]
        );
        assert_eq!(len_in(Charset::Utf8, "😀😀", Some(1), Some(1)), [EngineCode::NotEqualLength]);
    }

    #[test]
    fn uuid_accepts_strict_form() {
        assert!(uuid_of("123e4567-e89b-42d3-a456-426614174000").is_empty());
        assert!(uuid_of("123E4567-E89B-42D3-A456-426614174000").is_empty());
    }

    #[test]
    fn uuid_reports_first_structural_problem() {
        assert_eq!(uuid_of("123e4567"), [EngineCode::TooShort]);
        assert_eq!(
            uuid_of("123e4567e89b-42d3-a456-426614174000"),
            [EngineCode::InvalidHyphenPlacement]
        );
        assert_eq!(
            uuid_of("123e4567-e89b-42d3-a456-42661417400g"),
            [EngineCode::InvalidCharacters]
        );
        assert_eq!(
            uuid_of("123e4567-e89b-42d3-a456-4266141740001"),
            [EngineCode::TooLong]
        );
        assert_eq!(
            uuid_of("123e4567-e89b-02d3-a456-426614174000"),
            [EngineCode::InvalidVersion]
        );
        assert_eq!(
            uuid_of("123e4567-e89b-42d3-c456-426614174000"),
            [EngineCode::InvalidVariant]
        );
    }

    #[test]
    fn regex_can_require_a_non_match() {
        let digits = Regex::new(r"^\d+$").unwrap();
        let check = Check::Regex {
            pattern: digits.as_str().to_owned(),
            matches: false,
        };
        assert!(regex(&check, &RawValue::str("abc"), &digits, false).unwrap().is_empty());
        assert_eq!(
            regex(&check, &RawValue::str("123"), &digits, false).unwrap(),
            [EngineCode::RegexFailed]
        );
    }
}
