//! Date and time adapters.

use super::ErrorMap;
use crate::application::ports::{Check, EngineCode as E};
use crate::domain::{CountryCode, DateTimeFormat, ErrorCode as D, TimezoneZone};

pub static DATE: ErrorMap = &[
    (E::InvalidFormat, D::DateInvalidFormat),
    (E::InvalidDate, D::DateInvalid),
];

pub static DATE_TIME: ErrorMap = &[
    (E::InvalidFormat, D::DatetimeInvalidFormat),
    (E::InvalidDate, D::DatetimeInvalidDate),
    (E::InvalidTime, D::DatetimeInvalidTime),
];

pub static TIME: ErrorMap = &[
    (E::InvalidFormat, D::TimeInvalidFormat),
    (E::InvalidTime, D::TimeInvalid),
];

pub static TIME_ZONE: ErrorMap = &[
    (E::TimezoneIdentifier, D::TimezoneIdentifier),
    (E::TimezoneIdentifierInZone, D::TimezoneIdentifierInZone),
    (E::TimezoneIdentifierInCountry, D::TimezoneIdentifierInCountry),
    (E::TimezoneIdentifierIntl, D::TimezoneIdentifierIntl),
];

pub fn date() -> Check {
    Check::Date
}

pub fn date_time(format: &DateTimeFormat) -> Check {
    Check::DateTime {
        format: format.clone(),
    }
}

pub fn time(with_seconds: bool) -> Check {
    Check::Time { with_seconds }
}

pub fn time_zone(zone: Option<TimezoneZone>, country: Option<CountryCode>, intl: bool) -> Check {
    Check::Timezone {
        zone,
        country,
        intl,
    }
}
