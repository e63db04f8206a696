//! The native checking engine.
//!
//! [`NativeChecker`] executes every [`Check`] of the engine language in
//! process. Checks are grouped by family in submodules; each returns the
//! engine codes it found and the dispatcher wraps them into [`Violation`]s.
//!
//! # Empty values
//!
//! Null is accepted by every check except `NotBlank`, `NotNull` and `Type`.
//! Format checks (email, url, uuid, regex, dates, times, timezones, language,
//! json, files) also accept the empty string; "must be present" is the job
//! of `NotBlank`.

mod choice;
mod compare;
mod count;
mod countries;
mod file;
mod general;
mod languages;
mod string;
mod temporal;

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use regex::Regex;
use tracing::trace;
use verity_core::application::ports::{
    Check, CheckError, CheckingEngine, EngineCode, FileInspector, Violation,
};
use verity_core::domain::RawValue;

use crate::files::LocalFileInspector;

/// Codes found by one check, in reporting order.
type Outcome = Result<Vec<EngineCode>, CheckError>;

fn pass() -> Outcome {
    Ok(Vec::new())
}

fn fail(code: EngineCode) -> Outcome {
    Ok(vec![code])
}

/// Textual view of a scalar, or a fatal error for anything else.
fn text<'a>(check: &Check, value: &'a RawValue) -> Result<Cow<'a, str>, CheckError> {
    value
        .as_text()
        .ok_or_else(|| CheckError::unexpected(check, "string", value))
}

/// The in-process checking engine.
#[derive(Clone)]
pub struct NativeChecker {
    files: Arc<dyn FileInspector>,
    patterns: Arc<RwLock<HashMap<String, Regex>>>,
}

impl NativeChecker {
    /// Create a checker reading file metadata through `files`.
    pub fn new(files: impl FileInspector + 'static) -> Self {
        Self {
            files: Arc::new(files),
            patterns: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a checker backed by the local filesystem.
    pub fn local() -> Self {
        Self::new(LocalFileInspector::new())
    }

    /// Compile `pattern`, reusing an earlier compilation when possible.
    fn regex(&self, check: &Check, pattern: &str) -> Result<Regex, CheckError> {
        if let Some(re) = self
            .patterns
            .read()
            .ok()
            .and_then(|cache| cache.get(pattern).cloned())
        {
            return Ok(re);
        }
        let re = Regex::new(pattern).map_err(|e| CheckError::InvalidCheck {
            check: check.name(),
            reason: e.to_string(),
        })?;
        if let Ok(mut cache) = self.patterns.write() {
            cache.insert(pattern.to_owned(), re.clone());
        }
        Ok(re)
    }
}

impl Default for NativeChecker {
    fn default() -> Self {
        Self::local()
    }
}

impl std::fmt::Debug for NativeChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeChecker").finish_non_exhaustive()
    }
}

impl CheckingEngine for NativeChecker {
    fn check(&self, check: &Check, value: &RawValue) -> Result<Vec<Violation>, CheckError> {
        let codes = match check {
            Check::NotBlank => general::not_blank(value),
            Check::NotNull => general::not_null(value),
            Check::Type(expected) => general::of_type(*expected, value),
            Check::Email => general::email(check, value),
            Check::Url => general::url(check, value),
            Check::Language => general::language(check, value),
            Check::Json => general::json(check, value),
            Check::Unique => general::unique(check, value),
            Check::Length { min, max, charset } => {
                string::length(check, value, *min, *max, *charset)
            }
            Check::Uuid => string::uuid(check, value),
            Check::Regex { pattern, matches } => {
                string::regex(check, value, &self.regex(check, pattern)?, *matches)
            }
            Check::Comparison { op, value: other } => compare::comparison(check, value, *op, other),
            Check::Range { min, max } => compare::range(value, *min, *max),
            Check::Count { min, max } => count::count(check, value, *min, *max),
            Check::DivisibleBy { divisor } => count::divisible_by(check, value, *divisor),
            Check::Date => temporal::date(self, check, value),
            Check::DateTime { format } => temporal::date_time(self, check, value, format),
            Check::Time { with_seconds } => temporal::time(self, check, value, *with_seconds),
            Check::Timezone {
                zone,
                country,
                intl,
            } => temporal::timezone(check, value, *zone, *country, *intl),
            Check::File(rules) => file::file(self.files.as_ref(), check, value, rules),
            Check::Image(rules) => file::image(self.files.as_ref(), check, value, rules),
            Check::Choice(rules) => choice::choice(check, value, rules),
        }?;

        if !codes.is_empty() {
            trace!(check = check.name(), ?codes, "check failed");
        }
        Ok(codes
            .into_iter()
            .map(|code| Violation::new(code, value.clone(), check))
            .collect())
    }
}
