//! Collection size checks.

use verity_core::application::ports::{Check, CheckError, EngineCode};
use verity_core::domain::RawValue;

use super::{Outcome, fail, pass};

fn items<'a>(check: &Check, value: &'a RawValue) -> Result<&'a [RawValue], CheckError> {
    value
        .as_list()
        .ok_or_else(|| CheckError::unexpected(check, "list", value))
}

pub(super) fn count(
    check: &Check,
    value: &RawValue,
    min: Option<usize>,
    max: Option<usize>,
) -> Outcome {
    if value.is_null() {
        return pass();
    }
    let n = items(check, value)?.len();

    if let (Some(min), Some(max)) = (min, max) {
        if min == max {
            return if n == min {
                pass()
            } else {
                fail(EngineCode::NotEqualCount)
            };
        }
    }
    if max.is_some_and(|max| n > max) {
        return fail(EngineCode::TooMany);
    }
    if min.is_some_and(|min| n < min) {
        return fail(EngineCode::TooFew);
    }
    pass()
}

pub(super) fn divisible_by(check: &Check, value: &RawValue, divisor: usize) -> Outcome {
    if divisor == 0 {
        return Err(CheckError::InvalidCheck {
            check: check.name(),
            reason: "divisor must be positive".into(),
        });
    }
    if value.is_null() {
        return pass();
    }
    if items(check, value)?.len() % divisor == 0 {
        pass()
    } else {
        fail(EngineCode::NotDivisibleBy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> RawValue {
        RawValue::List(vec![RawValue::Int(0); n])
    }

    fn run(n: usize, min: Option<usize>, max: Option<usize>) -> Vec<EngineCode> {
        count(&Check::Count { min, max }, &list(n), min, max).unwrap()
    }

    #[test]
    fn exact_count() {
        assert!(run(3, Some(3), Some(3)).is_empty());
        assert_eq!(run(2, Some(3), Some(3)), [EngineCode::NotEqualCount]);
    }

    #[test]
    fn bounds() {
        assert_eq!(run(0, Some(1), Some(10)), [EngineCode::TooFew]);
        assert_eq!(run(11, None, Some(10)), [EngineCode::TooMany]);
        assert!(run(10, None, Some(10)).is_empty());
    }

    #[test]
    fn scalars_cannot_be_counted() {
        let check = Check::Count {
            min: Some(1),
            max: None,
        };
        assert!(count(&check, &RawValue::str("abc"), Some(1), None).is_err());
    }

    #[test]
    fn divisibility() {
        let check = Check::DivisibleBy { divisor: 2 };
        assert!(divisible_by(&check, &list(4), 2).unwrap().is_empty());
        assert_eq!(divisible_by(&check, &list(3), 2).unwrap(), [EngineCode::NotDivisibleBy]);
        assert!(divisible_by(&check, &list(3), 0).is_err());
    }
}
