//! Validated schema model.
//!
//! A [`Field`] is what a [`FieldDef`](crate::FieldDef) becomes once the schema
//! builds: every optional hint filled in, required attributes guaranteed, and
//! the type-specific data (choices, bound callback) carried on its [`FieldKind`]
//! so nothing downstream looks anything up by string key.

use std::fmt;
use std::sync::Arc;

use crate::types::Choices;
use crate::value::OptionBundle;

/// Error a field callback may fail with.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Renders a `callback` field. Receives the field and its `param`, if any.
pub type FieldCallback =
    Arc<dyn Fn(&Field, Option<&serde_json::Value>) -> Result<String, CallbackError> + Send + Sync>;

/// Transforms a submitted bundle into the bundle that will be persisted.
pub type Sanitizer = Arc<dyn Fn(OptionBundle) -> OptionBundle + Send + Sync>;

/// Wrap a closure as a [`FieldCallback`].
pub fn field_callback<F>(f: F) -> FieldCallback
where
    F: Fn(&Field, Option<&serde_json::Value>) -> Result<String, CallbackError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`Sanitizer`].
pub fn sanitizer<F>(f: F) -> Sanitizer
where
    F: Fn(OptionBundle) -> OptionBundle + Send + Sync + 'static,
{
    Arc::new(f)
}

/// `type` attribute of a single-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Number,
    Email,
    Password,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::Email => "email",
            InputType::Password => "password",
        }
    }
}

/// Control shape of a field, with the data that shape needs.
#[derive(Clone)]
pub enum FieldKind {
    Input(InputType),
    Textarea,
    Hidden,
    Select(Choices),
    Radio(Choices),
    Checkbox,
    Checkboxes(Choices),
    DropdownPages,
    Callback {
        name: String,
        callback: FieldCallback,
        param: Option<serde_json::Value>,
    },
    Unknown(String),
}

impl FieldKind {
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Input(input) => input.as_str(),
            FieldKind::Textarea => "textarea",
            FieldKind::Hidden => "hidden",
            FieldKind::Select(_) => "select",
            FieldKind::Radio(_) => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Checkboxes(_) => "checkboxes",
            FieldKind::DropdownPages => "dropdown_pages",
            FieldKind::Callback { .. } => "callback",
            FieldKind::Unknown(name) => name,
        }
    }
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Input(input) => f.debug_tuple("Input").field(input).finish(),
            FieldKind::Select(c) => f.debug_tuple("Select").field(c).finish(),
            FieldKind::Radio(c) => f.debug_tuple("Radio").field(c).finish(),
            FieldKind::Checkboxes(c) => f.debug_tuple("Checkboxes").field(c).finish(),
            FieldKind::Callback { name, param, .. } => f
                .debug_struct("Callback")
                .field("name", name)
                .field("param", param)
                .finish_non_exhaustive(),
            FieldKind::Unknown(name) => f.debug_tuple("Unknown").field(name).finish(),
            FieldKind::Textarea => f.write_str("Textarea"),
            FieldKind::Hidden => f.write_str("Hidden"),
            FieldKind::Checkbox => f.write_str("Checkbox"),
            FieldKind::DropdownPages => f.write_str("DropdownPages"),
        }
    }
}

/// A fully-populated field, ready to render.
#[derive(Debug, Clone)]
pub struct Field {
    pub id: String,
    pub title: String,
    /// Key into the option bundle.
    pub name: String,
    /// Shown when the stored entry is absent or empty.
    pub default_value: String,
    pub placeholder: String,
    pub class: String,
    pub description: String,
    pub label_for: Option<String>,
    pub kind: FieldKind,
}

impl Field {
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// A validated section.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    pub page: String,
    pub option_name: String,
    pub fields: Vec<Field>,
}

impl Section {
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// A validated option group with its sanitizer bound.
#[derive(Clone)]
pub struct OptionGroup {
    pub group_id: String,
    pub option_name: String,
    pub defaults: OptionBundle,
    sanitizer: Option<Sanitizer>,
}

impl OptionGroup {
    pub fn new(
        group_id: impl Into<String>,
        option_name: impl Into<String>,
        defaults: OptionBundle,
        sanitizer: Option<Sanitizer>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            option_name: option_name.into(),
            defaults,
            sanitizer,
        }
    }

    /// Run the bound sanitizer; identity when none is bound.
    pub fn sanitize(&self, raw: OptionBundle) -> OptionBundle {
        match &self.sanitizer {
            Some(sanitizer) => sanitizer(raw),
            None => raw,
        }
    }

    pub fn has_sanitizer(&self) -> bool {
        self.sanitizer.is_some()
    }
}

impl fmt::Debug for OptionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionGroup")
            .field("group_id", &self.group_id)
            .field("option_name", &self.option_name)
            .field("defaults", &self.defaults)
            .field("sanitizer", &self.sanitizer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::OptionValue;

    #[test]
    fn identity_sanitizer_when_unbound() {
        let group = OptionGroup::new("g1", "opts", OptionBundle::new(), None);
        let raw = OptionBundle::new().with("color", "blue");
        assert_eq!(group.sanitize(raw.clone()), raw);
        assert!(!group.has_sanitizer());
    }

    #[test]
    fn bound_sanitizer_runs() {
        let upper = sanitizer(|bundle| {
            bundle
                .iter()
                .map(|(k, v)| (k.clone(), OptionValue::from(v.to_text().to_uppercase())))
                .collect()
        });
        let group = OptionGroup::new("g1", "opts", OptionBundle::new(), Some(upper));
        let out = group.sanitize(OptionBundle::new().with("color", "blue"));
        assert_eq!(out.get("color").map(|v| v.to_text()), Some("BLUE".into()));
    }

    #[test]
    fn type_names_match_declared_types() {
        assert_eq!(FieldKind::Input(InputType::Email).type_name(), "email");
        assert_eq!(FieldKind::DropdownPages.type_name(), "dropdown_pages");
        assert_eq!(FieldKind::Unknown("slider".into()).type_name(), "slider");
    }
}
