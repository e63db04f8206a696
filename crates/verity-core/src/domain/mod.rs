// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Verity.
//!
//! This module holds the validation vocabulary and the declarations value
//! objects make about themselves. How a rule is actually checked is not a
//! domain concern; that lives behind the ports of the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Closed vocabularies**: error codes and constraint kinds are enums
//! - **Immutable descriptors**: a `Constraint` never changes after its factory
//!   returns
//!
// Public API - what the world sees
pub mod constrainable;
pub mod constraint;
pub mod error;
pub mod error_code;
pub mod value;
pub mod value_objects;

// Re-exports for convenience
pub use constrainable::{
    Child, Children, Constrainable, ConstrainableValue, ConstraintSet, ConstraintSetBuilder,
};
pub use constraint::{
    Charset, ChoiceRules, Constraint, ConstraintKind, CountryCode, DateTimeFormat, FileRules,
    FormatToken, ImageRules, Params, TimezoneZone, ValueType,
};
pub use error::{DomainError, ErrorCategory};
pub use error_code::{ErrorCode, ErrorFamily};
pub use value::{FileRef, RawValue, UploadError};
pub use value_objects::{
    Description, Email, EntityId, GroupType, ImageUpload, Locale, Name, NameField, Password,
    Price, ProductDraft, Quantity, Tags,
};
