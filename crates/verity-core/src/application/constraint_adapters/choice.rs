//! Choice adapter.

use super::ErrorMap;
use crate::application::ports::{Check, EngineCode as E};
use crate::domain::{ChoiceRules, ErrorCode as D};

pub static CHOICE: ErrorMap = &[
    (E::NoSuchChoice, D::ChoiceNotSuch),
    (E::TooFew, D::ChoiceTooFew),
    (E::TooMany, D::ChoiceTooMuch),
];

pub fn choice(rules: &ChoiceRules) -> Check {
    Check::Choice(rules.clone())
}
