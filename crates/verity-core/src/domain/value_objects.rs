//! Value objects of the surrounding CRUD backend.
//!
//! # Design
//!
//! Each value object owns its business rules. It stores the raw input as
//! given (validation is deferred, never done in the constructor) and declares
//! its descriptors through [`Constrainable`]. The declaration order is the
//! order codes come back in, so it is part of each type's contract:
//! `ImageUpload` reports NOT_NULL before NOT_BLANK, `Email` the reverse.
//!
//! # Adding a Value Object
//!
//! 1. Define the type holding the raw input
//! 2. Implement [`Constrainable`] (and `children()` if it is composite)
//! 3. Add a scenario test in `verity-adapters/tests`

use crate::domain::constrainable::{Children, Constrainable, ConstraintSetBuilder};
use crate::domain::constraint::{Constraint, FileRules, ImageRules};
use crate::domain::value::{FileRef, RawValue};

// ── EntityId ─────────────────────────────────────────────────────────────────

/// A UUID primary key, as received from a path segment or request body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// A fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Constrainable for EntityId {
    fn raw_value(&self) -> RawValue {
        RawValue::str(self.0.as_str())
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints
            .push(Constraint::not_blank())
            .push(Constraint::uuid());
    }
}

// ── Email ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(Option<String>);

impl Email {
    pub const MAX_LENGTH: usize = 180;

    pub fn new(value: impl Into<Option<String>>) -> Self {
        Self(value.into())
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl Constrainable for Email {
    fn raw_value(&self) -> RawValue {
        self.0.clone().into()
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints
            .push(Constraint::not_blank())
            .push(Constraint::not_null())
            .push(Constraint::email())
            .push(Constraint::string_max(Self::MAX_LENGTH));
    }
}

// ── Name ─────────────────────────────────────────────────────────────────────

/// Which entity a name belongs to; each has its own length bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameField {
    Product,
    Group,
    Shop,
    User,
}

impl NameField {
    /// Inclusive `(min, max)` length in characters.
    pub const fn bounds(self) -> (usize, usize) {
        match self {
            Self::Product => (2, 120),
            Self::Group => (3, 60),
            Self::Shop => (2, 80),
            Self::User => (2, 50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    value: Option<String>,
    field: NameField,
}

impl Name {
    pub fn new(value: impl Into<Option<String>>, field: NameField) -> Self {
        Self {
            value: value.into(),
            field,
        }
    }

    pub fn field(&self) -> NameField {
        self.field
    }
}

impl Constrainable for Name {
    fn raw_value(&self) -> RawValue {
        self.value.clone().into()
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        let (min, max) = self.field.bounds();
        constraints
            .push(Constraint::not_blank())
            .push(Constraint::not_null())
            .push(Constraint::string_range(min, max));
    }
}

// ── Password ─────────────────────────────────────────────────────────────────

/// A plaintext password prior to hashing.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;
    pub const MAX_LENGTH: usize = 4096;

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

impl Constrainable for Password {
    fn raw_value(&self) -> RawValue {
        RawValue::str(self.0.as_str())
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints
            .push(Constraint::not_blank())
            .push(Constraint::string_range(Self::MIN_LENGTH, Self::MAX_LENGTH));
    }
}

// ── Description ──────────────────────────────────────────────────────────────

/// Optional free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    value: Option<String>,
    max: usize,
}

impl Description {
    pub const DEFAULT_MAX_LENGTH: usize = 2000;

    pub fn new(value: impl Into<Option<String>>) -> Self {
        Self::with_max(value, Self::DEFAULT_MAX_LENGTH)
    }

    pub fn with_max(value: impl Into<Option<String>>, max: usize) -> Self {
        Self {
            value: value.into(),
            max,
        }
    }
}

impl Constrainable for Description {
    fn raw_value(&self) -> RawValue {
        self.value.clone().into()
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints.push(Constraint::string_max(self.max));
    }
}

// ── Price / Quantity ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(Option<f64>);

impl Price {
    pub fn new(value: impl Into<Option<f64>>) -> Self {
        Self(value.into())
    }
}

impl Constrainable for Price {
    fn raw_value(&self) -> RawValue {
        self.0.into()
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints
            .push(Constraint::not_null())
            .push(Constraint::positive_or_zero());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(i64);

impl Quantity {
    pub fn new(value: i64) -> Self {
        Self(value)
    }
}

impl Constrainable for Quantity {
    fn raw_value(&self) -> RawValue {
        RawValue::Int(self.0)
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints.push(Constraint::positive());
    }
}

// ── GroupType ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupType(String);

impl GroupType {
    pub const CHOICES: [&'static str; 3] = ["customer", "seller", "admin"];

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Constrainable for GroupType {
    fn raw_value(&self) -> RawValue {
        RawValue::str(self.0.as_str())
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints
            .push(Constraint::not_blank())
            .push(Constraint::choice_of(Self::CHOICES));
    }
}

// ── Locale ───────────────────────────────────────────────────────────────────

/// ISO 639-1 language code of a user's preferred locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(String);

impl Locale {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Constrainable for Locale {
    fn raw_value(&self) -> RawValue {
        RawValue::str(self.0.as_str())
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints.push(Constraint::language());
    }
}

// ── Tags ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub const MAX_TAGS: usize = 10;

    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }
}

impl Constrainable for Tags {
    fn raw_value(&self) -> RawValue {
        RawValue::List(self.0.iter().map(RawValue::str).collect())
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        constraints
            .push(Constraint::count_max(Self::MAX_TAGS))
            .push(Constraint::unique());
    }
}

// ── ImageUpload ──────────────────────────────────────────────────────────────

/// A product picture as received from a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload(Option<FileRef>);

impl ImageUpload {
    pub const MAX_SIZE: u64 = 5 * 1024 * 1024;
    pub const MAX_EDGE: u32 = 4096;
    pub const MIME_TYPES: &'static [&'static str] = &["image/jpeg", "image/png", "image/webp"];

    pub fn new(file: impl Into<Option<FileRef>>) -> Self {
        Self(file.into())
    }

    pub fn file(&self) -> Option<&FileRef> {
        self.0.as_ref()
    }
}

impl Constrainable for ImageUpload {
    fn raw_value(&self) -> RawValue {
        self.0.clone().into()
    }

    fn declare(&self, constraints: &mut ConstraintSetBuilder) {
        let file = FileRules::new()
            .max_size(Self::MAX_SIZE)
            .mime_types(Self::MIME_TYPES.iter().copied());
        constraints
            .push(Constraint::not_null())
            .push(Constraint::not_blank())
            .push(Constraint::image(
                ImageRules::new()
                    .file(file)
                    .width(None, Some(Self::MAX_EDGE))
                    .height(None, Some(Self::MAX_EDGE))
                    .detect_corrupted(true),
            ));
    }
}

// ── ProductDraft ─────────────────────────────────────────────────────────────

/// The payload of a product creation request; validated as a composite.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: Name,
    pub price: Price,
    pub description: Description,
    pub tags: Tags,
    pub images: Vec<ImageUpload>,
}

impl Constrainable for ProductDraft {
    fn raw_value(&self) -> RawValue {
        RawValue::Null
    }

    fn declare(&self, _constraints: &mut ConstraintSetBuilder) {}

    fn children(&self) -> Children {
        Children::new()
            .field("name", &self.name)
            .field("price", &self.price)
            .field("description", &self.description)
            .field("tags", &self.tags)
            .list("images", &self.images)
    }
}
