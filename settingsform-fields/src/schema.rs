//! Schema: the validated registry of option groups and sections.
//!
//! Built once at startup through [`SchemaBuilder`], read-only afterwards.
//! Declarations come from code, from YAML documents, or both; callbacks and
//! sanitizers are bound by name on the builder before `build()` validates
//! everything in one pass.

use std::path::Path;

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::field::{field_callback, sanitizer, CallbackError, Field, OptionGroup, Section};
use crate::types::{OptionGroupDef, SchemaFile, SectionDef, UnknownFieldPolicy};
use crate::validation::{validate_groups, validate_sections, Bindings};
use crate::value::OptionBundle;

/// Builder for [`Schema`]. Created by [`Schema::builder()`].
#[derive(Default)]
pub struct SchemaBuilder {
    groups: Vec<OptionGroupDef>,
    sections: Vec<SectionDef>,
    bindings: Bindings,
    policy: UnknownFieldPolicy,
}

impl SchemaBuilder {
    /// Declare an option group.
    pub fn option_group(mut self, def: OptionGroupDef) -> Self {
        self.groups.push(def);
        self
    }

    /// Declare a section. Sections render in declaration order.
    pub fn section(mut self, def: SectionDef) -> Self {
        self.sections.push(def);
        self
    }

    /// Bind a field callback under `name`.
    pub fn callback<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Field, Option<&serde_json::Value>) -> std::result::Result<String, CallbackError>
            + Send
            + Sync
            + 'static,
    {
        self.bindings.callbacks.insert(name.into(), field_callback(f));
        self
    }

    /// Bind a sanitizer under `name`.
    pub fn sanitizer<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(OptionBundle) -> OptionBundle + Send + Sync + 'static,
    {
        self.bindings.sanitizers.insert(name.into(), sanitizer(f));
        self
    }

    /// Choose what happens to fields of an unrecognised type.
    pub fn unknown_field_policy(mut self, policy: UnknownFieldPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append already parsed declarations.
    pub fn declarations(mut self, file: SchemaFile) -> Self {
        self.groups.extend(file.option_groups);
        self.sections.extend(file.sections);
        self
    }

    /// Append the declarations of a YAML schema document.
    pub fn yaml(self, source: &str) -> Result<Self> {
        let file: SchemaFile = serde_yaml_ng::from_str(source)?;
        Ok(self.declarations(file))
    }

    /// Append the declarations of a YAML schema file.
    pub fn load_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading schema file");
        self.yaml(&source)
    }

    /// Validate all declarations and build the schema.
    pub fn build(self) -> Result<Schema> {
        let groups = validate_groups(&self.groups, &self.bindings)?;
        let sections = validate_sections(&self.sections, &groups, &self.bindings, self.policy)?;

        debug!(
            groups = groups.len(),
            sections = sections.len(),
            fields = sections.iter().map(|s| s.fields.len()).sum::<usize>(),
            policy = ?self.policy,
            "schema built"
        );

        Ok(Schema {
            groups,
            sections,
            policy: self.policy,
        })
    }
}

/// Validated option groups and sections.
#[derive(Debug, Clone)]
pub struct Schema {
    groups: Vec<OptionGroup>,
    sections: Vec<Section>,
    policy: UnknownFieldPolicy,
}

impl Schema {
    /// Start declaring a schema.
    ///
    /// ```rust
    /// use settingsform_fields::{FieldDef, FieldType, OptionGroupDef, Schema, SectionDef};
    ///
    /// let schema = Schema::builder()
    ///     .option_group(OptionGroupDef::new("g1", "opts"))
    ///     .section(
    ///         SectionDef::new("s1", "General", "my-page", "opts")
    ///             .field(FieldDef::new(FieldType::Text, "f1", "color", "Color")),
    ///     )
    ///     .build()?;
    /// assert_eq!(schema.sections_for_page("my-page").count(), 1);
    /// # Ok::<(), settingsform_fields::SchemaError>(())
    /// ```
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Build a schema from a YAML document with nothing bound.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Self::builder().yaml(source)?.build()
    }

    // --- Option groups ---

    pub fn option_groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    /// The group persisted under `option_name`.
    pub fn option_group(&self, option_name: &str) -> Option<&OptionGroup> {
        self.groups.iter().find(|g| g.option_name == option_name)
    }

    // --- Sections ---

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First section with this id, on any page.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// The section with this id on `page`.
    pub fn section_on_page(&self, page: &str, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.page == page && s.id == id)
    }

    /// Sections shown on `page`, in declaration order.
    pub fn sections_for_page<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections.iter().filter(move |s| s.page == page)
    }

    /// Distinct page slugs, in first-declared order.
    pub fn pages(&self) -> Vec<&str> {
        let mut pages: Vec<&str> = Vec::new();
        for section in &self.sections {
            if !pages.contains(&section.page.as_str()) {
                pages.push(&section.page);
            }
        }
        pages
    }

    pub fn unknown_field_policy(&self) -> UnknownFieldPolicy {
        self.policy
    }
}
