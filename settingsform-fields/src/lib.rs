//! Settings schema model
//!
//! `settingsform-fields` is a schema-only crate: it describes persisted options
//! ("option groups"), the sections of a settings page, and the fields inside
//! each section. It knows nothing about markup; `settingsform` renders it.
//!
//! # Architecture
//!
//! - **Declarations** ([`FieldDef`], [`SectionDef`], [`OptionGroupDef`]) are loose,
//!   serde-friendly records written in code or loaded from YAML
//! - **Validated model** ([`Field`], [`Section`], [`OptionGroup`]) is what
//!   [`SchemaBuilder::build`] produces: required attributes checked, defaults
//!   filled in, callbacks and sanitizers bound
//! - **Read-only after build**: a [`Schema`] is built once and shared

pub mod error;
pub mod field;
pub mod schema;
pub mod types;
pub mod validation;
pub mod value;

pub use error::{Result, SchemaError};
pub use field::{
    field_callback, sanitizer, CallbackError, Field, FieldCallback, FieldKind, InputType,
    OptionGroup, Sanitizer, Section,
};
pub use schema::{Schema, SchemaBuilder};
pub use types::{
    Choices, FieldDef, FieldType, OptionGroupDef, SchemaFile, SectionDef, UnknownFieldPolicy,
};
pub use validation::Bindings;
pub use value::{loose_eq, OptionBundle, OptionValue};
