//! Stored option values.
//!
//! An [`OptionBundle`] is the single persisted value behind one option name:
//! a map from field name to whatever the form last submitted. The store owns
//! it; rendering only ever reads a whole bundle and saving only ever writes one.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One entry of an option bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<OptionValue>),
}

impl OptionValue {
    /// Absent-equivalent values: null, false, the empty string and the empty list.
    ///
    /// Numeric zero is *not* empty so number fields can hold `0`.
    pub fn is_empty(&self) -> bool {
        match self {
            OptionValue::Null => true,
            OptionValue::Bool(b) => !b,
            OptionValue::Number(_) => false,
            OptionValue::Text(s) => s.is_empty(),
            OptionValue::List(items) => items.is_empty(),
        }
    }

    /// Truthiness used by single checkboxes.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Null => false,
            OptionValue::Bool(b) => *b,
            OptionValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            OptionValue::Text(s) => !s.is_empty() && s != "0",
            OptionValue::List(items) => !items.is_empty(),
        }
    }

    /// Scalar text form of the value. Lists are joined with `,`.
    pub fn to_text(&self) -> String {
        match self {
            OptionValue::Null => String::new(),
            OptionValue::Bool(true) => "1".to_string(),
            OptionValue::Bool(false) => String::new(),
            OptionValue::Number(n) => n.to_string(),
            OptionValue::Text(s) => s.clone(),
            OptionValue::List(items) => items
                .iter()
                .map(OptionValue::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Number(value.into())
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Number(value.into())
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(items: Vec<T>) -> Self {
        OptionValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Compare two stored/declared keys the way form keys are compared:
/// equal text, or both numeric and numerically equal (`"1"` matches `"01"`).
pub fn loose_eq(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x == y,
        _ => false,
    }
}

/// The persisted value behind one option name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionBundle(IndexMap<String, OptionValue>);

impl OptionBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, OptionValue)> for OptionBundle {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness_keeps_numeric_zero() {
        assert!(OptionValue::Null.is_empty());
        assert!(OptionValue::from("").is_empty());
        assert!(OptionValue::from(false).is_empty());
        assert!(OptionValue::List(vec![]).is_empty());
        assert!(!OptionValue::from(0).is_empty());
        assert!(!OptionValue::from("0").is_empty());
    }

    #[test]
    fn truthiness_follows_checkbox_rules() {
        assert!(OptionValue::from(1).is_truthy());
        assert!(OptionValue::from("1").is_truthy());
        assert!(OptionValue::from(true).is_truthy());
        assert!(!OptionValue::from(0).is_truthy());
        assert!(!OptionValue::from("0").is_truthy());
        assert!(!OptionValue::from("").is_truthy());
        assert!(!OptionValue::Null.is_truthy());
    }

    #[test]
    fn loose_equality_coerces_numbers() {
        assert!(loose_eq("1", "1"));
        assert!(loose_eq("1", "01"));
        assert!(loose_eq("2.0", "2"));
        assert!(!loose_eq("a", "b"));
        assert!(!loose_eq("1", "one"));
    }

    #[test]
    fn bundle_deserializes_mixed_values_in_order() {
        let bundle: OptionBundle = serde_json::from_str(
            r#"{"color":"blue","count":3,"enabled":true,"tags":["a","b"],"gone":null}"#,
        )
        .unwrap();
        let names: Vec<_> = bundle.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["color", "count", "enabled", "tags", "gone"]);
        assert_eq!(bundle.get("color"), Some(&OptionValue::from("blue")));
        assert_eq!(bundle.get("count"), Some(&OptionValue::from(3)));
        assert_eq!(bundle.get("tags"), Some(&OptionValue::from(vec!["a", "b"])));
        assert_eq!(bundle.get("gone"), Some(&OptionValue::Null));
    }
}
