//! Iterable adapters: element counts.

use super::ErrorMap;
use crate::application::ports::{Check, EngineCode as E};
use crate::domain::ErrorCode as D;

const COUNT_CODES: ErrorMap = &[
    (E::TooFew, D::IterableTooFew),
    (E::TooMany, D::IterableTooMany),
    (E::NotEqualCount, D::IterableNotEqual),
];

pub static COUNT: ErrorMap = COUNT_CODES;
pub static COUNT_RANGE: ErrorMap = COUNT_CODES;
pub static COUNT_DIVISIBLE_BY: ErrorMap = &[(E::NotDivisibleBy, D::IterableDivisibleBy)];

pub fn count(min: Option<usize>, max: Option<usize>) -> Check {
    Check::Count { min, max }
}

pub fn exact_count(exact: usize) -> Check {
    count(Some(exact), Some(exact))
}

pub fn divisible_by(divisor: usize) -> Check {
    Check::DivisibleBy { divisor }
}
