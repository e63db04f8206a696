//! Choice membership.

use verity_core::application::ports::{Check, CheckError, EngineCode};
use verity_core::domain::{ChoiceRules, RawValue};

use super::{Outcome, fail, pass};

/// Membership is strict: `1` is not a member of `["1"]`.
///
/// In multiple mode the value must be a list; the first non-member stops the
/// check, then the selection count is checked against its bounds.
pub(super) fn choice(check: &Check, value: &RawValue, rules: &ChoiceRules) -> Outcome {
    if value.is_null() {
        return pass();
    }
    let allowed = |v: &RawValue| rules.choices.contains(v);

    if !rules.multiple {
        return if allowed(value) {
            pass()
        } else {
            fail(EngineCode::NoSuchChoice)
        };
    }

    let selected = value
        .as_list()
        .ok_or_else(|| CheckError::unexpected(check, "list", value))?;
    if !selected.iter().all(allowed) {
        return fail(EngineCode::NoSuchChoice);
    }
    if rules.min.is_some_and(|min| selected.len() < min) {
        return fail(EngineCode::TooFew);
    }
    if rules.max.is_some_and(|max| selected.len() > max) {
        return fail(EngineCode::TooMany);
    }
    pass()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(rules: &ChoiceRules, value: RawValue) -> Vec<EngineCode> {
        choice(&Check::Choice(rules.clone()), &value, rules).unwrap()
    }

    #[test]
    fn single_choice_is_strict() {
        let rules = ChoiceRules::new(["1", "2"]);
        assert!(run(&rules, RawValue::str("1")).is_empty());
        assert_eq!(run(&rules, RawValue::Int(1)), [EngineCode::NoSuchChoice]);
    }

    #[test]
    fn multiple_choice_checks_members_then_count() {
        let rules = ChoiceRules::new(["a", "b", "c"]).multiple(Some(2), Some(2));
        assert!(run(&rules, RawValue::from(vec!["a", "c"])).is_empty());
        assert_eq!(run(&rules, RawValue::from(vec!["a", "z", "b", "c"])), [EngineCode::NoSuchChoice]);
        assert_eq!(run(&rules, RawValue::from(vec!["a"])), [EngineCode::TooFew]);
        assert_eq!(run(&rules, RawValue::from(vec!["a", "b", "c"])), [EngineCode::TooMany]);
    }

    #[test]
    fn multiple_choice_needs_a_list() {
        let rules = ChoiceRules::new(["a"]).multiple(None, None);
        assert!(choice(&Check::Choice(rules.clone()), &RawValue::str("a"), &rules).is_err());
    }
}
