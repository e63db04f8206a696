//! Constraint adapters: descriptor → (engine check, error map).
//!
//! One module per constraint family. Each owns the static error maps of its
//! kinds and the translation of its descriptors into [`Check`]s. The
//! [`registry`] ties every [`ConstraintKind`] to exactly one family and one
//! map, and [`adapt`] dispatches by exhaustive match.
//!
//! # Adding a New Kind
//!
//! 1. Add the descriptor (see `domain::constraint`)
//! 2. Add its error map and check translation to the family module
//! 3. Add one [`AdapterEntry`] to [`ADAPTER_REGISTRY`] and an arm to [`adapt`]
//! 4. `registry_is_internally_consistent` fails until both are done

pub mod choice;
pub mod comparison;
pub mod datetime;
pub mod file;
pub mod general;
pub mod iterable;
pub mod registry;
pub mod string;

use std::fmt;

use crate::application::ports::{Check, EngineCode};
use crate::domain::{ConstraintKind, ErrorCode};

pub use registry::{
    ADAPTER_REGISTRY, AdapterEntry, adapt, assert_registry_integrity, find_adapter,
};

/// Fixed translation from engine identifiers to domain codes for one kind.
pub type ErrorMap = &'static [(EngineCode, ErrorCode)];

/// Look up an engine code. `None` means the map is incomplete, a fatal fault.
pub fn translate(map: ErrorMap, code: EngineCode) -> Option<ErrorCode> {
    map.iter()
        .find_map(|(engine, domain)| (*engine == code).then_some(*domain))
}

/// The adapter output for one descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Adapted {
    pub kind: ConstraintKind,
    pub check: Check,
    pub errors: ErrorMap,
}

/// Grouping of constraint kinds by adapter module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterFamily {
    General,
    String,
    Comparison,
    DateTime,
    Iterable,
    Choice,
    File,
}

impl AdapterFamily {
    pub const ALL: &'static [AdapterFamily] = &[
        Self::General,
        Self::String,
        Self::Comparison,
        Self::DateTime,
        Self::Iterable,
        Self::Choice,
        Self::File,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::String => "string",
            Self::Comparison => "comparison",
            Self::DateTime => "date-time",
            Self::Iterable => "iterable",
            Self::Choice => "choice",
            Self::File => "file",
        }
    }
}

impl fmt::Display for AdapterFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
