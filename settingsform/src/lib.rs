//! Schema-driven settings forms
//!
//! Describe option groups, sections and fields with [`settingsform_fields`],
//! then render them into form markup bound to what the [`OptionStore`] holds.
//!
//! ```rust
//! use settingsform::{FormConfig, MemoryStore, SettingsForm};
//! use settingsform_fields::{FieldDef, FieldType, OptionBundle, OptionGroupDef, Schema, SectionDef};
//!
//! let builder = Schema::builder()
//!     .option_group(OptionGroupDef::new("g1", "opts"))
//!     .section(
//!         SectionDef::new("s1", "General", "my-page", "opts")
//!             .field(FieldDef::new(FieldType::Text, "f1", "color", "Color")),
//!     );
//! let form = SettingsForm::from_builder(builder, FormConfig::default())?;
//! let store = MemoryStore::new().with("opts", OptionBundle::new().with("color", "blue"));
//!
//! let html = form.render_section("my-page", "s1", &store)?;
//! assert!(html.contains(r#"name="opts[color]""#));
//! assert!(html.contains(r#"value="blue""#));
//! # Ok::<(), settingsform::FormError>(())
//! ```

pub mod config;
pub mod error;
pub mod escape;
pub mod form;
pub mod host;
pub mod registry;
pub mod render;
pub mod resolve;
pub mod store;

pub use config::FormConfig;
pub use error::{FormError, Result};
pub use escape::{esc_attr, esc_html, stripslashes};
pub use form::SettingsForm;
pub use host::{FormHost, Page, PageDirectory, PageDropdown, StaticFormHost, StaticPages};
pub use registry::{
    FieldContext, FieldRegistration, SectionRegistration, SettingRegistration, SettingsRegistry,
};
pub use render::FieldRenderer;
pub use resolve::{match_key, resolve, ResolvedValue};
pub use store::{JsonFileStore, MemoryStore, OptionStore};
