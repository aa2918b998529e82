//! Schema validation.
//!
//! Turns declarations into the validated model. Anything that would render a
//! broken form is rejected here, before a single field is drawn.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, SchemaError};
use crate::field::{Field, FieldCallback, FieldKind, InputType, OptionGroup, Sanitizer, Section};
use crate::types::{FieldDef, FieldType, OptionGroupDef, SectionDef, UnknownFieldPolicy};

/// Named capabilities a schema may refer to.
#[derive(Default, Clone)]
pub struct Bindings {
    pub callbacks: HashMap<String, FieldCallback>,
    pub sanitizers: HashMap<String, Sanitizer>,
}

/// Validate option groups: one group per option name, sanitizers bound.
pub fn validate_groups(defs: &[OptionGroupDef], bindings: &Bindings) -> Result<Vec<OptionGroup>> {
    let mut seen = HashSet::new();
    let mut groups = Vec::with_capacity(defs.len());
    for def in defs {
        if def.group_id.is_empty() {
            return Err(SchemaError::MissingGroupAttribute {
                option_name: def.option_name.clone(),
                attribute: "group_id".into(),
            });
        }
        if def.option_name.is_empty() {
            return Err(SchemaError::MissingGroupAttribute {
                option_name: def.group_id.clone(),
                attribute: "option_name".into(),
            });
        }
        if !seen.insert(def.option_name.as_str()) {
            return Err(SchemaError::DuplicateOptionGroup {
                option_name: def.option_name.clone(),
            });
        }
        let sanitizer = match &def.sanitizer {
            Some(name) => Some(bindings.sanitizers.get(name).cloned().ok_or_else(|| {
                SchemaError::UnboundSanitizer {
                    option_name: def.option_name.clone(),
                    sanitizer: name.clone(),
                }
            })?),
            None => None,
        };
        groups.push(OptionGroup::new(
            def.group_id.clone(),
            def.option_name.clone(),
            def.defaults.clone(),
            sanitizer,
        ));
    }
    Ok(groups)
}

/// Validate sections against the declared groups and build their fields.
pub fn validate_sections(
    defs: &[SectionDef],
    groups: &[OptionGroup],
    bindings: &Bindings,
    policy: UnknownFieldPolicy,
) -> Result<Vec<Section>> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut sections = Vec::with_capacity(defs.len());
    for def in defs {
        let label = if def.id.is_empty() {
            def.title.as_str()
        } else {
            def.id.as_str()
        };
        for (attribute, value) in [
            ("id", &def.id),
            ("title", &def.title),
            ("page", &def.page),
            ("option_name", &def.option_name),
        ] {
            if value.is_empty() {
                return Err(SchemaError::MissingSectionAttribute {
                    section: label.to_string(),
                    attribute: attribute.to_string(),
                });
            }
        }
        if !groups.iter().any(|g| g.option_name == def.option_name) {
            return Err(SchemaError::UnknownOptionName {
                section: def.id.clone(),
                option_name: def.option_name.clone(),
            });
        }
        if !seen.insert((def.page.as_str(), def.id.as_str())) {
            return Err(SchemaError::DuplicateSection {
                page: def.page.clone(),
                section: def.id.clone(),
            });
        }

        let fields = def
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| build_field(&def.id, index, field, bindings, policy))
            .collect::<Result<Vec<_>>>()?;

        let mut field_ids = HashSet::new();
        for field in &fields {
            if !field_ids.insert(field.id.as_str()) {
                return Err(SchemaError::DuplicateField {
                    section: def.id.clone(),
                    field: field.id.clone(),
                });
            }
        }

        sections.push(Section {
            id: def.id.clone(),
            title: def.title.clone(),
            description: def.description.clone(),
            page: def.page.clone(),
            option_name: def.option_name.clone(),
            fields,
        });
    }
    Ok(sections)
}

/// Build one field, filling every optional hint with its default.
pub fn build_field(
    section: &str,
    index: usize,
    def: &FieldDef,
    bindings: &Bindings,
    policy: UnknownFieldPolicy,
) -> Result<Field> {
    let label = present(&def.id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{index}"));

    let require = |attribute: &str, value: &Option<String>| -> Result<String> {
        present(value)
            .map(str::to_string)
            .ok_or_else(|| SchemaError::MissingAttribute {
                section: section.to_string(),
                field: label.clone(),
                attribute: attribute.to_string(),
            })
    };
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();

    let id = require("id", &def.id)?;
    let (title, name) = match def.type_ {
        FieldType::Hidden => (optional(&def.title), require("name", &def.name)?),
        FieldType::Callback => (optional(&def.title), optional(&def.name)),
        _ => (require("title", &def.title)?, require("name", &def.name)?),
    };

    if def.type_.needs_choices() && def.choices.is_empty() {
        return Err(SchemaError::EmptyChoices { field: id });
    }

    let kind = match &def.type_ {
        FieldType::Text => FieldKind::Input(InputType::Text),
        FieldType::Number => FieldKind::Input(InputType::Number),
        FieldType::Email => FieldKind::Input(InputType::Email),
        FieldType::Password => FieldKind::Input(InputType::Password),
        FieldType::Textarea => FieldKind::Textarea,
        FieldType::Hidden => FieldKind::Hidden,
        FieldType::Select => FieldKind::Select(def.choices.clone()),
        FieldType::Radio => FieldKind::Radio(def.choices.clone()),
        FieldType::Checkbox => FieldKind::Checkbox,
        FieldType::Checkboxes => FieldKind::Checkboxes(def.choices.clone()),
        FieldType::DropdownPages => FieldKind::DropdownPages,
        FieldType::Callback => {
            let callback_name = present(&def.callback)
                .ok_or_else(|| SchemaError::MissingCallback { field: id.clone() })?;
            let callback = bindings.callbacks.get(callback_name).cloned().ok_or_else(|| {
                SchemaError::UnboundCallback {
                    field: id.clone(),
                    callback: callback_name.to_string(),
                }
            })?;
            FieldKind::Callback {
                name: callback_name.to_string(),
                callback,
                param: def.param.clone().filter(|p| !is_empty_param(p)),
            }
        }
        FieldType::Unknown(type_name) => {
            if policy == UnknownFieldPolicy::Error {
                return Err(SchemaError::UnknownFieldType {
                    field: id,
                    type_name: type_name.clone(),
                });
            }
            FieldKind::Unknown(type_name.clone())
        }
    };

    Ok(Field {
        id,
        title,
        name,
        default_value: optional(&def.value),
        placeholder: optional(&def.placeholder),
        class: optional(&def.class),
        description: optional(&def.description),
        label_for: def.label_for.clone().filter(|l| !l.is_empty()),
        kind,
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Params that count as "not given": null, false, zero, "", "0", [] and {}.
fn is_empty_param(param: &serde_json::Value) -> bool {
    use serde_json::Value;
    match param {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
