//! General adapters: presence, type, format and sign checks.

use super::ErrorMap;
use crate::application::ports::{Check, CompareOp, EngineCode as E};
use crate::domain::{ErrorCode as D, RawValue, ValueType};

pub static NOT_BLANK: ErrorMap = &[(E::NotBlank, D::NotBlank)];
pub static NOT_NULL: ErrorMap = &[(E::NotNull, D::NotNull)];
pub static TYPE: ErrorMap = &[(E::InvalidType, D::Type)];
pub static EMAIL: ErrorMap = &[(E::InvalidEmail, D::Email)];
pub static URL: ErrorMap = &[(E::InvalidUrl, D::Url)];
pub static LANGUAGE: ErrorMap = &[(E::NoSuchLanguage, D::Language)];
pub static JSON: ErrorMap = &[(E::InvalidJson, D::Json)];
pub static UNIQUE: ErrorMap = &[(E::NotUnique, D::Unique)];

// Sign checks are comparisons against zero; the engine reports the
// comparison's own identifier.
pub static POSITIVE: ErrorMap = &[(E::TooLow, D::Positive)];
pub static POSITIVE_OR_ZERO: ErrorMap = &[(E::TooLow, D::PositiveOrZero)];
pub static NEGATIVE: ErrorMap = &[(E::TooHigh, D::Negative)];
pub static NEGATIVE_OR_ZERO: ErrorMap = &[(E::TooHigh, D::NegativeOrZero)];

pub fn not_blank() -> Check {
    Check::NotBlank
}

pub fn not_null() -> Check {
    Check::NotNull
}

pub fn of_type(expected: ValueType) -> Check {
    Check::Type(expected)
}

pub fn email() -> Check {
    Check::Email
}

pub fn url() -> Check {
    Check::Url
}

pub fn language() -> Check {
    Check::Language
}

pub fn json() -> Check {
    Check::Json
}

pub fn unique() -> Check {
    Check::Unique
}

fn against_zero(op: CompareOp) -> Check {
    Check::Comparison {
        op,
        value: RawValue::Int(0),
    }
}

pub fn positive() -> Check {
    against_zero(CompareOp::Greater)
}

pub fn positive_or_zero() -> Check {
    against_zero(CompareOp::GreaterOrEqual)
}

pub fn negative() -> Check {
    against_zero(CompareOp::Less)
}

pub fn negative_or_zero() -> Check {
    against_zero(CompareOp::LessOrEqual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::constraint_adapters::translate;

    #[test]
    fn sign_checks_reuse_comparison_identifiers() {
        assert_eq!(translate(POSITIVE, E::TooLow), Some(D::Positive));
        assert_eq!(translate(NEGATIVE_OR_ZERO, E::TooHigh), Some(D::NegativeOrZero));
        assert_eq!(translate(POSITIVE, E::TooHigh), None);
    }

    #[test]
    fn positive_compares_strictly_against_zero() {
        assert_eq!(
            positive(),
            Check::Comparison {
                op: CompareOp::Greater,
                value: RawValue::Int(0)
            }
        );
    }
}
