//! Core types for the formbind crate.
//!
//! This crate provides the foundational types for describing flat forms:
//! - `FieldDescriptor` and `FieldKind` - Declarative fields and their controls
//! - `FieldValue` and `FieldValues` - Entered values and extraction results
//! - `FieldErrors` - Validation messages keyed by field name
//! - `Control` - The "bind value, emit change" contract every kind implements
//! - `FormError` and `SubmitError` - Configuration and submission failures

mod value;
pub use value::FieldValue;

mod values;
pub use values::{FieldValues, ValueError};

mod errors;
pub use errors::FieldErrors;

mod options;
pub use options::Options;

mod descriptor;
pub use descriptor::{
    Converter, FieldDescriptor, FieldKind, InputHandler, RenderHints, Required, Validator,
};

mod control;
pub use control::{Control, ControlInput};

mod error;
pub use error::{FormError, SubmitError};
