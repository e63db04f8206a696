//! Constrainable values and the two-phase declaration protocol.
//!
//! # Lifecycle
//!
//! 1. A value object declares its rules into a [`ConstraintSetBuilder`].
//! 2. `build()` freezes them into an immutable [`ConstraintSet`].
//! 3. [`ConstrainableValue::declare`] attaches the set to the value.
//! 4. Validating through `&mut` consumes the set; validating through `&`
//!    leaves it in place so the same run can be repeated.
//!
//! A `ConstrainableValue` must not be validated from two threads at once;
//! the `&mut` receiver makes that a compile error for the consuming path.

use std::mem;
use std::slice;

use crate::domain::constraint::Constraint;
use crate::domain::error::DomainError;
use crate::domain::value::RawValue;

// ── ConstraintSet ────────────────────────────────────────────────────────────

/// An ordered, immutable snapshot of descriptors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ConstraintSetBuilder {
        ConstraintSetBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    pub fn as_slice(&self) -> &[Constraint] {
        &self.constraints
    }
}

impl FromIterator<Constraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        Self {
            constraints: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Accumulates descriptors in declaration order.
#[derive(Debug, Default)]
pub struct ConstraintSetBuilder {
    constraints: Vec<Constraint>,
}

impl ConstraintSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Push the result of a fallible factory, propagating its error.
    pub fn try_push(
        &mut self,
        constraint: Result<Constraint, DomainError>,
    ) -> Result<&mut Self, DomainError> {
        self.constraints.push(constraint?);
        Ok(self)
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn build(self) -> ConstraintSet {
        ConstraintSet {
            constraints: self.constraints,
        }
    }
}

impl Extend<Constraint> for ConstraintSetBuilder {
    fn extend<I: IntoIterator<Item = Constraint>>(&mut self, iter: I) {
        self.constraints.extend(iter);
    }
}

// ── ConstrainableValue ───────────────────────────────────────────────────────

/// A raw value, the descriptors that apply to it, and optional nested values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstrainableValue {
    raw: RawValue,
    constraints: ConstraintSet,
    children: Children,
}

impl ConstrainableValue {
    pub fn new(raw: impl Into<RawValue>) -> Self {
        Self {
            raw: raw.into(),
            constraints: ConstraintSet::empty(),
            children: Children::default(),
        }
    }

    pub fn with_constraints(raw: impl Into<RawValue>, constraints: ConstraintSet) -> Self {
        Self {
            constraints,
            ..Self::new(raw)
        }
    }

    pub fn with_children(mut self, children: Children) -> Self {
        self.children = children;
        self
    }

    /// The explicit build step: replace the declared descriptors.
    pub fn declare(&mut self, constraints: ConstraintSet) {
        self.constraints = constraints;
    }

    /// Detach the declared descriptors, leaving the value with none.
    pub fn take_constraints(&mut self) -> ConstraintSet {
        mem::take(&mut self.constraints)
    }

    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }
}

// ── Children ─────────────────────────────────────────────────────────────────

/// A nested field: one value, or a homogeneous list of values.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Single(ConstrainableValue),
    Many(Vec<ConstrainableValue>),
}

/// Named nested fields, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Children {
    fields: Vec<(String, Child)>,
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(mut self, name: impl Into<String>, value: ConstrainableValue) -> Self {
        self.insert(name, Child::Single(value));
        self
    }

    pub fn many<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = ConstrainableValue>,
    {
        self.insert(name, Child::Many(values.into_iter().collect()));
        self
    }

    /// Shorthand for a nested value object.
    pub fn field(self, name: impl Into<String>, value: &impl Constrainable) -> Self {
        self.single(name, value.constrainable())
    }

    /// Shorthand for a list of nested value objects.
    pub fn list<'a, T, I>(self, name: impl Into<String>, values: I) -> Self
    where
        T: Constrainable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.many(name, values.into_iter().map(T::constrainable))
    }

    /// Insert or replace a field. A replaced field keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, child: Child) {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = child,
            None => self.fields.push((name, child)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Child> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Child)> {
        self.fields.iter().map(|(n, c)| (n.as_str(), c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Child)> {
        self.fields.iter_mut().map(|(n, c)| (n.as_str(), c))
    }
}

// ── Constrainable ────────────────────────────────────────────────────────────

/// Implemented by domain value objects that carry their own business rules.
pub trait Constrainable {
    /// The value handed to the checking engine.
    fn raw_value(&self) -> RawValue;

    /// Declare this value's descriptors, in the order they must run.
    fn declare(&self, constraints: &mut ConstraintSetBuilder);

    /// Nested values for composite validation. None by default.
    fn children(&self) -> Children {
        Children::default()
    }

    /// A fresh snapshot with the descriptors already declared.
    fn constrainable(&self) -> ConstrainableValue {
        let mut builder = ConstraintSetBuilder::new();
        self.declare(&mut builder);
        ConstrainableValue::with_constraints(self.raw_value(), builder.build())
            .with_children(self.children())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nickname(String);

    impl Constrainable for Nickname {
        fn raw_value(&self) -> RawValue {
            RawValue::str(self.0.as_str())
        }

        fn declare(&self, constraints: &mut ConstraintSetBuilder) {
            constraints
                .push(Constraint::not_blank())
                .push(Constraint::string_max(16));
        }
    }

    #[test]
    fn builder_preserves_declaration_order() {
        let set = ConstraintSet::builder()
            .with(Constraint::string_min(6))
            .with(Constraint::not_blank())
            .build();
        let kinds: Vec<_> = set.iter().map(Constraint::kind).collect();
        assert_eq!(
            kinds,
            [
                crate::domain::ConstraintKind::StringMin,
                crate::domain::ConstraintKind::NotBlank
            ]
        );
    }

    #[test]
    fn try_push_propagates_factory_errors() {
        let mut builder = ConstraintSetBuilder::new();
        assert!(builder.try_push(Constraint::regex("(")).is_err());
        assert!(builder.is_empty());
        builder.try_push(Constraint::regex("^a")).unwrap();
        assert_eq!(builder.len(), 1);
    }

    #[test]
    fn take_constraints_leaves_value_empty() {
        let mut value = Nickname("ada".into()).constrainable();
        assert_eq!(value.constraints().len(), 2);
        let taken = value.take_constraints();
        assert_eq!(taken.len(), 2);
        assert!(value.constraints().is_empty());

        value.declare(taken);
        assert_eq!(value.constraints().len(), 2);
    }

    #[test]
    fn children_keep_insertion_order_and_replace_in_place() {
        let mut children = Children::new()
            .field("b", &Nickname("x".into()))
            .list("a", &[Nickname("y".into()), Nickname("z".into())]);
        children.insert("b", Child::Many(vec![]));

        let names: Vec<_> = children.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "a"]);
        assert!(matches!(children.get("b"), Some(Child::Many(v)) if v.is_empty()));
        assert!(matches!(children.get("a"), Some(Child::Many(v)) if v.len() == 2));
    }
}
