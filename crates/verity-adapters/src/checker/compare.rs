//! Comparison and numeric range checks.

use std::cmp::Ordering;

use verity_core::application::ports::{Check, CheckError, CompareOp, EngineCode};
use verity_core::domain::RawValue;

use super::{Outcome, fail, pass};

pub(super) fn comparison(check: &Check, value: &RawValue, op: CompareOp, other: &RawValue) -> Outcome {
    if value.is_null() {
        return pass();
    }
    let (ok, code) = match op {
        CompareOp::Equal => (value.loose_eq(other), EngineCode::NotEqual),
        CompareOp::NotEqual => (!value.loose_eq(other), EngineCode::Equal),
        CompareOp::Identical => (value == other, EngineCode::NotIdentical),
        CompareOp::NotIdentical => (value != other, EngineCode::Identical),
        CompareOp::Less | CompareOp::LessOrEqual => {
            let ordering = order(check, value, other)?;
            let ok = match op {
                CompareOp::Less => ordering == Ordering::Less,
                _ => ordering != Ordering::Greater,
            };
            (ok, EngineCode::TooHigh)
        }
        CompareOp::Greater | CompareOp::GreaterOrEqual => {
            let ordering = order(check, value, other)?;
            let ok = match op {
                CompareOp::Greater => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            (ok, EngineCode::TooLow)
        }
    };
    if ok { pass() } else { fail(code) }
}

fn order(check: &Check, value: &RawValue, other: &RawValue) -> Result<Ordering, CheckError> {
    value.loose_cmp(other).ok_or_else(|| {
        CheckError::unexpected(check, "value comparable with the reference", value)
    })
}

/// Numeric bounds. A value that is not a number at all is reported as
/// invalid characters rather than out of range.
pub(super) fn range(value: &RawValue, min: Option<f64>, max: Option<f64>) -> Outcome {
    if value.is_null() {
        return pass();
    }
    let Some(n) = value.as_number() else {
        return fail(EngineCode::InvalidCharacters);
    };
    let low = min.is_some_and(|min| n < min);
    let high = max.is_some_and(|max| n > max);

    if min.is_some() && max.is_some() && (low || high) {
        return fail(EngineCode::NotInRange);
    }
    if low {
        return fail(EngineCode::TooLow);
    }
    if high {
        return fail(EngineCode::TooHigh);
    }
    pass()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp(op: CompareOp, value: RawValue, other: RawValue) -> Vec<EngineCode> {
        let check = Check::Comparison {
            op,
            value: other.clone(),
        };
        comparison(&check, &value, op, &other).unwrap()
    }

    #[test]
    fn equality_is_loose_identity_is_strict() {
        assert!(cmp(CompareOp::Equal, RawValue::Int(1), RawValue::Float(1.0)).is_empty());
        assert_eq!(
            cmp(CompareOp::Identical, RawValue::Int(1), RawValue::Float(1.0)),
            [EngineCode::NotIdentical]
        );
        assert_eq!(
            cmp(CompareOp::NotEqual, RawValue::str("2"), RawValue::Int(2)),
            [EngineCode::Equal]
        );
    }

    #[test]
    fn ordering_reports_direction() {
        assert_eq!(
            cmp(CompareOp::Less, RawValue::Int(5), RawValue::Int(5)),
            [EngineCode::TooHigh]
        );
        assert!(cmp(CompareOp::LessOrEqual, RawValue::Int(5), RawValue::Int(5)).is_empty());
        assert_eq!(
            cmp(CompareOp::GreaterOrEqual, RawValue::Float(-0.5), RawValue::Int(0)),
            [EngineCode::TooLow]
        );
    }

    #[test]
    fn incomparable_values_are_fatal() {
        let check = Check::Comparison {
            op: CompareOp::Less,
            value: RawValue::Int(1),
        };
        assert!(comparison(&check, &RawValue::Bool(true), CompareOp::Less, &RawValue::Int(1)).is_err());
    }

    #[test]
    fn range_prefers_not_in_range_with_both_bounds() {
        assert_eq!(range(&RawValue::Int(0), Some(1.0), Some(5.0)).unwrap(), [EngineCode::NotInRange]);
        assert_eq!(range(&RawValue::Int(0), Some(1.0), None).unwrap(), [EngineCode::TooLow]);
        assert_eq!(range(&RawValue::Int(9), None, Some(5.0)).unwrap(), [EngineCode::TooHigh]);
        assert_eq!(
            range(&RawValue::str("abc"), Some(1.0), Some(5.0)).unwrap(),
            [EngineCode::InvalidCharacters]
        );
        assert!(range(&RawValue::str("3"), Some(1.0), Some(5.0)).unwrap().is_empty());
    }
}
