//! Parse results.

use indexmap::IndexMap;

use crate::types::Value;

/// Outcome of one parse call.
///
/// Option values, positional arguments and error messages live in separate
/// fields. [`ParseResult::to_json`] produces the flattened mapping form, in
/// which the positionals and errors appear under the `nonOptions` and
/// `errors` keys when non-empty.
///
/// # Examples
///
/// ```
/// use parse_args_core::{Schema, parse_args};
///
/// let result = parse_args(["node", "script", "-ab", "--name=x", "file"], &Schema::default()).unwrap();
///
/// assert_eq!(result.get_bool("a"), Some(true));
/// assert_eq!(result.get_str("name"), Some("x"));
/// assert_eq!(result.non_options, vec!["file"]);
/// assert_eq!(
///     result.to_json().to_string(),
///     r#"{"a":true,"b":true,"name":"x","nonOptions":["file"]}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseResult {
    /// Option values keyed by canonical name, in first-assignment order.
    pub values: IndexMap<String, Value>,
    /// Positional arguments in the order they appeared.
    pub non_options: Vec<String>,
    /// Argument errors, collected only when `return_errors` is set.
    pub errors: Vec<String>,
}

impl ParseResult {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// True when no values, positionals or errors were produced.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.non_options.is_empty() && self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Flattened JSON mapping.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.values {
            map.insert(name.clone(), value.to_json());
        }
        if !self.non_options.is_empty() {
            map.insert("nonOptions".to_string(), self.non_options.clone().into());
        }
        if !self.errors.is_empty() {
            map.insert("errors".to_string(), self.errors.clone().into());
        }
        serde_json::Value::Object(map)
    }
}
