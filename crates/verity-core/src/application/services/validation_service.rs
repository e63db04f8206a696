//! Validation Service - the validation engine.
//!
//! Runs descriptors against raw values through the checking-engine port:
//! 1. Adapt each descriptor (check + error map)
//! 2. Execute the check, collecting the engine's violations
//! 3. Translate each violation into a domain code
//!
//! Every descriptor runs, even after an earlier one failed; results are the
//! per-descriptor lists concatenated in declaration order. Nothing is
//! sorted or deduplicated.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, error, instrument, trace, warn};

use crate::{
    application::{
        EngineError,
        constraint_adapters::{adapt, translate},
        ports::CheckingEngine,
    },
    domain::{
        Child, Constrainable, ConstrainableValue, Constraint, ConstraintSet, ErrorCode, RawValue,
    },
    error::VerityResult,
};

// ── Results ──────────────────────────────────────────────────────────────────

/// Errors recorded for one field of a composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldErrors {
    /// A leaf value's codes, in discovery order.
    Value(Vec<ErrorCode>),
    /// A nested composite.
    Composite(ValidationReport),
    /// A list child, keyed by element index.
    Elements(BTreeMap<usize, FieldErrors>),
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Value(codes) => codes.is_empty(),
            Self::Composite(report) => report.is_empty(),
            Self::Elements(elements) => elements.is_empty(),
        }
    }

    /// Every code below this field, depth first.
    pub fn codes(&self) -> Vec<ErrorCode> {
        match self {
            Self::Value(codes) => codes.clone(),
            Self::Composite(report) => report.codes(),
            Self::Elements(elements) => elements.values().flat_map(Self::codes).collect(),
        }
    }
}

/// Field-keyed result of a composite validation.
///
/// The composite's own descriptors are recorded under [`ValidationReport::ROOT`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    fields: BTreeMap<String, FieldErrors>,
}

impl ValidationReport {
    pub const ROOT: &'static str = "";

    pub fn get(&self, field: &str) -> Option<&FieldErrors> {
        self.fields.get(field)
    }

    pub fn root(&self) -> &[ErrorCode] {
        match self.fields.get(Self::ROOT) {
            Some(FieldErrors::Value(codes)) => codes,
            _ => &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldErrors)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `true` when no field recorded a code.
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(FieldErrors::is_empty)
    }

    pub fn codes(&self) -> Vec<ErrorCode> {
        self.fields.values().flat_map(FieldErrors::codes).collect()
    }

    fn record(&mut self, field: impl Into<String>, errors: FieldErrors, keep_empty: bool) {
        if keep_empty || !errors.is_empty() {
            self.fields.insert(field.into(), errors);
        }
    }
}

/// Tunables of a [`Validator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Keep entries with no codes in keyed results instead of omitting them.
    pub preserve_empty: bool,
}

// ── Validator ────────────────────────────────────────────────────────────────

/// The validation engine.
///
/// Stateless apart from its engine; one instance can serve any number of
/// values, including from several threads.
pub struct Validator {
    engine: Box<dyn CheckingEngine>,
    options: ValidationOptions,
}

impl Validator {
    pub fn new(engine: Box<dyn CheckingEngine>) -> Self {
        Self::with_options(engine, ValidationOptions::default())
    }

    pub fn with_options(engine: Box<dyn CheckingEngine>, options: ValidationOptions) -> Self {
        Self { engine, options }
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    /// Run a descriptor set against a raw value.
    #[instrument(skip_all, fields(value = raw.type_name(), descriptors = constraints.len()))]
    pub fn check(&self, raw: &RawValue, constraints: &ConstraintSet) -> VerityResult<Vec<ErrorCode>> {
        let mut codes = Vec::new();
        for constraint in constraints {
            codes.extend(self.run(constraint, raw)?);
        }
        debug!(codes = codes.len(), "value checked");
        Ok(codes)
    }

    /// Validate a value and consume its declared descriptors.
    ///
    /// A second call without a new `declare` returns no codes.
    pub fn validate(&self, value: &mut ConstrainableValue) -> VerityResult<Vec<ErrorCode>> {
        let constraints = value.take_constraints();
        self.check(value.raw(), &constraints)
    }

    /// Validate a value and leave its descriptors in place.
    pub fn validate_retaining(&self, value: &ConstrainableValue) -> VerityResult<Vec<ErrorCode>> {
        self.check(value.raw(), value.constraints())
    }

    /// Validate a value object's own descriptors. Children are not visited;
    /// use [`Validator::validate_composite`] for that.
    pub fn validate_object(&self, object: &impl Constrainable) -> VerityResult<Vec<ErrorCode>> {
        self.validate(&mut object.constrainable())
    }

    /// Validate a value and, recursively, all of its children.
    ///
    /// Descriptors are consumed at every level.
    #[instrument(skip_all, fields(fields = value.children().len()))]
    pub fn validate_composite(
        &self,
        value: &mut ConstrainableValue,
    ) -> VerityResult<ValidationReport> {
        let keep_empty = self.options.preserve_empty;
        let mut report = ValidationReport::default();

        let root = self.validate(value)?;
        report.record(ValidationReport::ROOT, FieldErrors::Value(root), keep_empty);

        for (name, child) in value.children_mut().iter_mut() {
            let errors = self.validate_child(child)?;
            trace!(field = name, valid = errors.is_empty(), "child validated");
            report.record(name, errors, keep_empty);
        }
        Ok(report)
    }

    /// Validate each value of a homogeneous list, keyed by position.
    pub fn validate_each(
        &self,
        values: &mut [ConstrainableValue],
    ) -> VerityResult<BTreeMap<usize, Vec<ErrorCode>>> {
        let mut out = BTreeMap::new();
        for (index, value) in values.iter_mut().enumerate() {
            let codes = self.validate(value)?;
            if self.options.preserve_empty || !codes.is_empty() {
                out.insert(index, codes);
            }
        }
        Ok(out)
    }

    /// Validate named values, omitting names without codes.
    pub fn validate_many<I, K>(&self, values: I) -> VerityResult<BTreeMap<String, Vec<ErrorCode>>>
    where
        I: IntoIterator<Item = (K, ConstrainableValue)>,
        K: Into<String>,
    {
        let mut out = BTreeMap::new();
        for (name, mut value) in values {
            let codes = self.validate(&mut value)?;
            if self.options.preserve_empty || !codes.is_empty() {
                out.insert(name.into(), codes);
            }
        }
        Ok(out)
    }

    fn validate_child(&self, child: &mut Child) -> VerityResult<FieldErrors> {
        match child {
            Child::Single(value) if value.is_composite() => {
                Ok(FieldErrors::Composite(self.validate_composite(value)?))
            }
            Child::Single(value) => Ok(FieldErrors::Value(self.validate(value)?)),
            Child::Many(values) => {
                let mut elements = BTreeMap::new();
                for (index, value) in values.iter_mut().enumerate() {
                    let errors = if value.is_composite() {
                        FieldErrors::Composite(self.validate_composite(value)?)
                    } else {
                        FieldErrors::Value(self.validate(value)?)
                    };
                    if self.options.preserve_empty || !errors.is_empty() {
                        elements.insert(index, errors);
                    }
                }
                Ok(FieldErrors::Elements(elements))
            }
        }
    }

    /// Run one descriptor: adapt, execute, translate.
    fn run(&self, constraint: &Constraint, raw: &RawValue) -> Result<Vec<ErrorCode>, EngineError> {
        let adapted = adapt(constraint)?;
        let kind = adapted.kind;
        debug!(%kind, check = adapted.check.name(), "running descriptor");

        let violations = self.engine.check(&adapted.check, raw).map_err(|source| {
            warn!(%kind, error = %source, "check could not run");
            EngineError::CheckFailed { kind, source }
        })?;

        violations
            .into_iter()
            .map(|violation| {
                trace!(%kind, code = %violation.code, invalid = %violation.invalid_value, "violation");
                translate(adapted.errors, violation.code).ok_or_else(|| {
                    error!(%kind, code = %violation.code, "engine code missing from error map");
                    EngineError::UnmappedViolation {
                        kind,
                        code: violation.code,
                    }
                })
            })
            .collect()
    }
}
