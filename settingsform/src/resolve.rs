//! Value resolution: what a field shows, given what is stored.

use settingsform_fields::{loose_eq, Choices, Field, FieldKind, OptionBundle, OptionValue};

use crate::escape::stripslashes;

/// The value a field displays at render time.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// Raw text for inputs, textareas and hidden fields, slashes already stripped.
    Text(String),
    /// Single checkbox state.
    Flag(bool),
    /// Selected key for select, radio and page dropdowns.
    Choice(String),
    /// Stored keys of a checkbox group.
    Members(Vec<String>),
    /// Callback and unknown fields resolve nothing.
    Nothing,
}

impl ResolvedValue {
    /// Checkbox state as stored: `1` or `0`.
    pub fn flag(&self) -> u8 {
        match self {
            ResolvedValue::Flag(true) => 1,
            _ => 0,
        }
    }

    /// The one choice key the stored value selects, if any.
    pub fn selected<'a>(&self, choices: &'a Choices) -> Option<&'a str> {
        match self {
            ResolvedValue::Choice(stored) => match_key(choices.keys().map(String::as_str), stored),
            _ => None,
        }
    }

    /// Choice keys checked by the stored members, each stored item checking
    /// at most one key.
    pub fn members<'a>(&self, choices: &'a Choices) -> Vec<&'a str> {
        match self {
            ResolvedValue::Members(items) => items
                .iter()
                .filter_map(|item| match_key(choices.keys().map(String::as_str), item))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            ResolvedValue::Text(s) | ResolvedValue::Choice(s) => s,
            _ => "",
        }
    }
}

/// Find the key a stored value refers to: the key equal to it, otherwise the
/// first key equal to it numerically.
pub fn match_key<'a, I>(mut keys: I, stored: &str) -> Option<&'a str>
where
    I: Iterator<Item = &'a str> + Clone,
{
    if let Some(key) = keys.clone().find(|key| *key == stored) {
        return Some(key);
    }
    keys.find(|key| loose_eq(key, stored))
}

/// Compute a field's display value from the current bundle.
pub fn resolve(field: &Field, bundle: &OptionBundle) -> ResolvedValue {
    let stored = bundle.get(&field.name).filter(|v| !v.is_empty());
    let scalar = || {
        stored
            .map(OptionValue::to_text)
            .unwrap_or_else(|| field.default_value.clone())
    };

    match &field.kind {
        FieldKind::Input(_) | FieldKind::Textarea | FieldKind::Hidden => {
            ResolvedValue::Text(stripslashes(&scalar()).into_owned())
        }
        FieldKind::Checkbox => ResolvedValue::Flag(match stored {
            Some(value) => value.is_truthy(),
            None => OptionValue::from(field.default_value.as_str()).is_truthy(),
        }),
        FieldKind::Select(_) | FieldKind::Radio(_) => ResolvedValue::Choice(scalar()),
        FieldKind::DropdownPages => {
            let page = stripslashes(&scalar()).into_owned();
            ResolvedValue::Choice(if page.is_empty() { "0".into() } else { page })
        }
        FieldKind::Checkboxes(_) => ResolvedValue::Members(match stored {
            Some(OptionValue::List(items)) => items.iter().map(OptionValue::to_text).collect(),
            _ => Vec::new(),
        }),
        FieldKind::Callback { .. } | FieldKind::Unknown(_) => ResolvedValue::Nothing,
    }
}
