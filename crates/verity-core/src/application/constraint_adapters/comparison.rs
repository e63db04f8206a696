//! Comparison adapters: equality, identity, ordering and numeric ranges.

use super::ErrorMap;
use crate::application::ports::{Check, CompareOp, EngineCode as E};
use crate::domain::{ErrorCode as D, RawValue};

pub static EQUAL_TO: ErrorMap = &[(E::NotEqual, D::EqualTo)];
pub static NOT_EQUAL_TO: ErrorMap = &[(E::Equal, D::NotEqualTo)];
pub static IDENTICAL_TO: ErrorMap = &[(E::NotIdentical, D::IdenticalTo)];
pub static NOT_IDENTICAL_TO: ErrorMap = &[(E::Identical, D::NotIdenticalTo)];
pub static LESS_THAN: ErrorMap = &[(E::TooHigh, D::LessThan)];
pub static LESS_THAN_OR_EQUAL: ErrorMap = &[(E::TooHigh, D::LessThanOrEqual)];
pub static GREATER_THAN: ErrorMap = &[(E::TooLow, D::GreaterThan)];
pub static GREATER_THAN_OR_EQUAL: ErrorMap = &[(E::TooLow, D::GreaterThanOrEqual)];

pub static RANGE: ErrorMap = &[
    (E::TooLow, D::RangeTooLow),
    (E::TooHigh, D::RangeTooHigh),
    (E::NotInRange, D::RangeNotInRange),
    (E::InvalidCharacters, D::RangeInvalidCharacters),
];

pub fn compare(op: CompareOp, value: &RawValue) -> Check {
    Check::Comparison {
        op,
        value: value.clone(),
    }
}

pub fn range(min: Option<f64>, max: Option<f64>) -> Check {
    Check::Range { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::constraint_adapters::translate;

    #[test]
    fn range_maps_all_four_outcomes() {
        assert_eq!(translate(RANGE, E::TooLow), Some(D::RangeTooLow));
        assert_eq!(translate(RANGE, E::TooHigh), Some(D::RangeTooHigh));
        assert_eq!(translate(RANGE, E::NotInRange), Some(D::RangeNotInRange));
        assert_eq!(
            translate(RANGE, E::InvalidCharacters),
            Some(D::RangeInvalidCharacters)
        );
    }
}
