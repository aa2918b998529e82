//! Declarative schema types.
//!
//! These are the records a host writes, in code or in a YAML schema file, to
//! describe its options and the form that edits them. They are loose on
//! purpose: required attributes are optional here and checked when the
//! schema is built (see [`crate::validation`]).

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::value::OptionBundle;

/// Ordered choice map: key submitted by the form → label shown to the user.
pub type Choices = IndexMap<String, String>;

/// The type of a field. Determines which control is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Email,
    Password,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Checkboxes,
    Hidden,
    DropdownPages,
    Callback,
    /// Anything else; kept so the unknown-type policy can decide what happens.
    Unknown(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Password => "password",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Checkboxes => "checkboxes",
            FieldType::Hidden => "hidden",
            FieldType::DropdownPages => "dropdown_pages",
            FieldType::Callback => "callback",
            FieldType::Unknown(name) => name,
        }
    }

    /// Types whose control is built from a choice map.
    pub fn needs_choices(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkboxes
        )
    }
}

impl From<&str> for FieldType {
    fn from(name: &str) -> Self {
        match name {
            "text" => FieldType::Text,
            "number" => FieldType::Number,
            "email" => FieldType::Email,
            "password" => FieldType::Password,
            "textarea" => FieldType::Textarea,
            "select" => FieldType::Select,
            "radio" => FieldType::Radio,
            "checkbox" => FieldType::Checkbox,
            "checkboxes" => FieldType::Checkboxes,
            "hidden" => FieldType::Hidden,
            "dropdown_pages" => FieldType::DropdownPages,
            "callback" => FieldType::Callback,
            other => FieldType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from(name.as_str())
    }
}

impl From<FieldType> for String {
    fn from(ft: FieldType) -> Self {
        ft.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a field whose type is not recognised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Render nothing, say nothing.
    Skip,
    /// Render nothing and log a warning.
    #[default]
    Warn,
    /// Refuse to build the schema.
    Error,
}

/// A field descriptor as declared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared default, shown when nothing is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_choices",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub choices: Choices,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_for: Option<String>,
    /// Name of the bound callback, for `callback` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<serde_json::Value>,
}

impl FieldDef {
    /// Start a descriptor with the attributes every rendered field carries.
    pub fn new(
        type_: impl Into<FieldType>,
        id: impl Into<String>,
        name: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            type_: type_.into(),
            title: Some(title.into()),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn choice(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.choices.insert(key.into(), label.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn label_for(mut self, label_for: impl Into<String>) -> Self {
        self.label_for = Some(label_for.into());
        self
    }

    pub fn callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    pub fn param(mut self, param: serde_json::Value) -> Self {
        self.param = Some(param);
        self
    }
}

/// A titled group of fields on one settings page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionDef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Slug of the settings page the section is shown on.
    #[serde(default, alias = "menu_slug", alias = "page_slug")]
    pub page: String,
    #[serde(default)]
    pub option_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

impl SectionDef {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        page: impl Into<String>,
        option_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            page: page.into(),
            option_name: option_name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

/// One persisted option and the settings group that saves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionGroupDef {
    #[serde(alias = "option_group")]
    pub group_id: String,
    pub option_name: String,
    /// Bundle used while the store holds nothing for `option_name`.
    #[serde(default, skip_serializing_if = "OptionBundle::is_empty")]
    pub defaults: OptionBundle,
    /// Name of the bound sanitizer; identity when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitizer: Option<String>,
}

impl OptionGroupDef {
    pub fn new(group_id: impl Into<String>, option_name: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            option_name: option_name.into(),
            ..Self::default()
        }
    }

    pub fn defaults(mut self, defaults: OptionBundle) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn sanitizer(mut self, name: impl Into<String>) -> Self {
        self.sanitizer = Some(name.into());
        self
    }
}

/// Top-level layout of a YAML schema file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaFile {
    #[serde(default)]
    pub option_groups: Vec<OptionGroupDef>,
    #[serde(default)]
    pub sections: Vec<SectionDef>,
}

impl SchemaFile {
    /// Callback names referenced by callback fields, first occurrence order.
    pub fn callback_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self
            .sections
            .iter()
            .flat_map(|s| &s.fields)
            .filter_map(|f| f.callback.as_deref())
        {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Sanitizer names referenced by option groups.
    pub fn sanitizer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.option_groups.iter().filter_map(|g| g.sanitizer.as_deref()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Choice keys may be written as numbers in YAML; keep them as text.
fn deserialize_choices<'de, D>(deserializer: D) -> Result<Choices, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize, PartialEq, Eq, Hash)]
    #[serde(untagged)]
    enum Key {
        Int(i64),
        Bool(bool),
        Text(String),
    }

    let raw = IndexMap::<Key, String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, label)| {
            let key = match key {
                Key::Int(i) => i.to_string(),
                Key::Bool(b) => b.to_string(),
                Key::Text(s) => s,
            };
            (key, label)
        })
        .collect())
}
