//! Presence, type and format checks.

use validator::{ValidateEmail, ValidateUrl};
use verity_core::application::ports::{Check, CheckError, EngineCode};
use verity_core::domain::{RawValue, ValueType};

use super::{Outcome, fail, languages, pass, text};

pub(super) fn not_blank(value: &RawValue) -> Outcome {
    if value.is_blank() {
        fail(EngineCode::NotBlank)
    } else {
        pass()
    }
}

pub(super) fn not_null(value: &RawValue) -> Outcome {
    if value.is_null() {
        fail(EngineCode::NotNull)
    } else {
        pass()
    }
}

pub(super) fn of_type(expected: ValueType, value: &RawValue) -> Outcome {
    if value.is_null() || expected.matches(value) {
        pass()
    } else {
        fail(EngineCode::InvalidType)
    }
}

pub(super) fn email(check: &Check, value: &RawValue) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let address = text(check, value)?.into_owned();
    if address.validate_email() {
        pass()
    } else {
        fail(EngineCode::InvalidEmail)
    }
}

pub(super) fn url(check: &Check, value: &RawValue) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let url = text(check, value)?.into_owned();
    let lower = url.to_ascii_lowercase();
    let web = lower.starts_with("http://") || lower.starts_with("https://");
    if web && url.validate_url() {
        pass()
    } else {
        fail(EngineCode::InvalidUrl)
    }
}

/// ISO 639-1 code, optionally followed by a region (`en`, `en_GB`, `pt-BR`).
pub(super) fn language(check: &Check, value: &RawValue) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let tag = text(check, value)?;
    let (code, region) = match tag.split_once(['_', '-']) {
        Some((code, region)) => (code, Some(region)),
        None => (tag.as_ref(), None),
    };
    let region_ok =
        region.is_none_or(|r| r.len() == 2 && r.chars().all(|c| c.is_ascii_uppercase()));
    if region_ok && languages::is_iso_639_1(code) {
        pass()
    } else {
        fail(EngineCode::NoSuchLanguage)
    }
}

pub(super) fn json(check: &Check, value: &RawValue) -> Outcome {
    if value.is_null_or_empty_str() {
        return pass();
    }
    let document = text(check, value)?;
    match serde_json::from_str::<serde_json::Value>(&document) {
        Ok(_) => pass(),
        Err(_) => fail(EngineCode::InvalidJson),
    }
}

pub(super) fn unique(check: &Check, value: &RawValue) -> Outcome {
    if value.is_null() {
        return pass();
    }
    let items = value
        .as_list()
        .ok_or_else(|| CheckError::unexpected(check, "list", value))?;
    let duplicated = items
        .iter()
        .enumerate()
        .any(|(i, item)| items[..i].contains(item));
    if duplicated {
        fail(EngineCode::NotUnique)
    } else {
        pass()
    }
}
