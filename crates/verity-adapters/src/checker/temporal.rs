//! Dates, times and timezone identifiers.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use verity_core::application::ports::{Check, EngineCode};
use verity_core::domain::{CountryCode, DateTimeFormat, FormatToken, RawValue, TimezoneZone};

use super::{NativeChecker, Outcome, countries, fail, pass, text};

const DATE_PATTERN: &str = r"^(\d{4})-(\d{2})-(\d{2})$";
const TIME_PATTERN: &str = r"^(\d{2}):(\d{2})$";
const TIME_WITH_SECONDS_PATTERN: &str = r"^(\d{2}):(\d{2}):(\d{2})$";

/// Fields omitted from a date-time format. Year 2000 keeps `%m-%d` formats
/// accepting February 29th.
const DEFAULT_YMD: (i32, u32, u32) = (2000, 1, 1);

fn field<T: FromStr>(captures: &regex::Captures<'_>, index: usize) -> Option<T> {
    captures.get(index).and_then(|m| m.as_str().parse().ok())
}

/// `YYYY-MM-DD`, and the date must exist.
pub(super) fn date(engine: &NativeChecker, check: &Check, value: &RawValue) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let subject = text(check, value)?;
    let Some(captures) = engine.regex(check, DATE_PATTERN)?.captures(&subject) else {
        return fail(EngineCode::InvalidFormat);
    };
    let (Some(y), Some(m), Some(d)) = (field(&captures, 1), field(&captures, 2), field(&captures, 3))
    else {
        return fail(EngineCode::InvalidFormat);
    };
    if NaiveDate::from_ymd_opt(y, m, d).is_some() {
        pass()
    } else {
        fail(EngineCode::InvalidDate)
    }
}

/// The value must follow `format` exactly; the date and time it denotes
/// must both exist.
pub(super) fn date_time(
    engine: &NativeChecker,
    check: &Check,
    value: &RawValue,
    format: &DateTimeFormat,
) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let subject = text(check, value)?;
    let pattern = format_pattern(format);
    let Some(captures) = engine.regex(check, &pattern)?.captures(&subject) else {
        return fail(EngineCode::InvalidFormat);
    };

    let (mut year, mut month, mut day) = DEFAULT_YMD;
    let (mut hour, mut minute, mut second) = (0, 0, 0);
    let fields = format
        .tokens()
        .iter()
        .filter(|t| !matches!(t, FormatToken::Literal(_)));
    for (i, token) in fields.enumerate() {
        let Some(v) = field::<u32>(&captures, i + 1) else {
            return fail(EngineCode::InvalidFormat);
        };
        match token {
            FormatToken::Year => {
                let Ok(y) = i32::try_from(v) else {
                    return fail(EngineCode::InvalidDate);
                };
                year = y;
            }
            FormatToken::Month => month = v,
            FormatToken::Day => day = v,
            FormatToken::Hour => hour = v,
            FormatToken::Minute => minute = v,
            FormatToken::Second => second = v,
            FormatToken::Literal(_) => {}
        }
    }

    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        return fail(EngineCode::InvalidDate);
    }
    if NaiveTime::from_hms_opt(hour, minute, second).is_none() {
        return fail(EngineCode::InvalidTime);
    }
    pass()
}

/// Anchored regex with one capture group per numeric field.
fn format_pattern(format: &DateTimeFormat) -> String {
    let mut pattern = String::from("^");
    for token in format.tokens() {
        match token {
            FormatToken::Year => pattern.push_str(r"(\d{4})"),
            FormatToken::Literal(c) => pattern.push_str(&regex::escape(&c.to_string())),
            _ => pattern.push_str(r"(\d{2})"),
        }
    }
    pattern.push('$');
    pattern
}

/// `HH:MM`, or `HH:MM:SS` when seconds are required.
pub(super) fn time(
    engine: &NativeChecker,
    check: &Check,
    value: &RawValue,
    with_seconds: bool,
) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let subject = text(check, value)?;
    let pattern = if with_seconds {
        TIME_WITH_SECONDS_PATTERN
    } else {
        TIME_PATTERN
    };
    let Some(captures) = engine.regex(check, pattern)?.captures(&subject) else {
        return fail(EngineCode::InvalidFormat);
    };
    let second = if with_seconds {
        field(&captures, 3)
    } else {
        Some(0)
    };
    let (Some(h), Some(m), Some(s)) = (field(&captures, 1), field(&captures, 2), second) else {
        return fail(EngineCode::InvalidFormat);
    };
    if NaiveTime::from_hms_opt(h, m, s).is_some() {
        pass()
    } else {
        fail(EngineCode::InvalidTime)
    }
}

/// An IANA identifier known to the tz database.
///
/// With a `zone`, the identifier must also belong to that region. With
/// `intl`, only geographic `Region/City` identifiers and `UTC` are accepted,
/// so legacy aliases such as `EST` or `Etc/GMT+5` fail.
pub(super) fn timezone(
    check: &Check,
    value: &RawValue,
    zone: Option<TimezoneZone>,
    country: Option<CountryCode>,
    intl: bool,
) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let identifier = text(check, value)?;
    let known = Tz::from_str(&identifier).is_ok();

    if let Some(country) = country {
        return if known && countries::zones(country).iter().any(|z| *z == identifier) {
            pass()
        } else {
            fail(EngineCode::TimezoneIdentifierInCountry)
        };
    }

    if let Some(zone) = zone {
        return if known && zone.contains(&identifier) {
            pass()
        } else {
            fail(EngineCode::TimezoneIdentifierInZone)
        };
    }
    if !known {
        return fail(EngineCode::TimezoneIdentifier);
    }
    if intl && !is_geographic(&identifier) {
        return fail(EngineCode::TimezoneIdentifierIntl);
    }
    pass()
}

fn is_geographic(identifier: &str) -> bool {
    TimezoneZone::ALL.iter().any(|zone| zone.contains(identifier))
}
