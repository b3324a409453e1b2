//! Primitive type coercion.
//!
//! Raw inputs come from two places: argument text (`--num=1.5`) and declared
//! constants in a schema document (`"defaultValue": 12`). Both are handled as
//! [`serde_json::Value`] so that a constant may be given either as a literal of
//! the right kind or as its textual form.

use std::fmt;

use thiserror::Error;

use crate::types::{Constraints, OptionKind, OptionType, Value};

/// A raw value that could not be converted to the declared option type.
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionType, TypeMismatch};
///
/// let err = TypeMismatch::new("--int", "1.5", OptionType::Integer);
/// assert_eq!(
///     err.to_string(),
///     "In option \"--int\" with value \"1.5\": Value is not an integer."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("In option \"{option}\" with value \"{value}\": Value is not {}.", .expected.article())]
pub struct TypeMismatch {
    /// Display name of the option (or schema path for declared constants).
    pub option: String,
    /// Textual form of the rejected value.
    pub value: String,
    /// The type the value had to satisfy.
    pub expected: OptionType,
}

impl TypeMismatch {
    pub fn new(option: impl Into<String>, value: impl Into<String>, expected: OptionType) -> Self {
        Self {
            option: option.into(),
            value: value.into(),
            expected,
        }
    }
}

/// Rust types backing the four option kinds.
///
/// Implemented for `String`, `f64`, `i64` and `bool`; the typed option
/// builders and constraint lists are generic over this trait.
pub trait OptionValue: Clone + PartialEq + fmt::Display + Send + Sync + 'static {
    /// The option kind this type represents.
    const TYPE: OptionType;

    /// Converts a raw value, returning `None` when it does not fit.
    fn from_raw(raw: &serde_json::Value) -> Option<Self>;

    /// Value assigned when the option is given without `=value`.
    fn zero() -> Self;

    /// Wraps the value in the untyped [`Value`] enum.
    fn into_value(self) -> Value;

    /// Wraps typed constraints in the matching [`OptionKind`] variant.
    fn into_kind(constraints: Constraints<Self>) -> OptionKind;

    /// Converts argument text.
    fn from_text(text: &str) -> Option<Self> {
        Self::from_raw(&serde_json::Value::String(text.to_string()))
    }
}

impl OptionValue for String {
    const TYPE: OptionType = OptionType::String;

    fn from_raw(raw: &serde_json::Value) -> Option<Self> {
        raw.as_str().map(str::to_string)
    }

    // A bare string flag reads as a truthy marker.
    fn zero() -> Self {
        "true".to_string()
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn into_kind(constraints: Constraints<Self>) -> OptionKind {
        OptionKind::String(constraints)
    }
}

impl OptionValue for f64 {
    const TYPE: OptionType = OptionType::Number;

    fn from_raw(raw: &serde_json::Value) -> Option<Self> {
        let n = match raw {
            serde_json::Value::String(s) => s.parse::<f64>().ok()?,
            serde_json::Value::Number(n) => n.as_f64()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }

    fn zero() -> Self {
        0.0
    }

    fn into_value(self) -> Value {
        Value::Number(self)
    }

    fn into_kind(constraints: Constraints<Self>) -> OptionKind {
        OptionKind::Number(constraints)
    }
}

impl OptionValue for i64 {
    const TYPE: OptionType = OptionType::Integer;

    fn from_raw(raw: &serde_json::Value) -> Option<Self> {
        match raw {
            serde_json::Value::String(s) => {
                if s.contains('.') {
                    return None;
                }
                s.parse::<i64>().ok()
            }
            serde_json::Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            _ => None,
        }
    }

    fn zero() -> Self {
        0
    }

    fn into_value(self) -> Value {
        Value::Integer(self)
    }

    fn into_kind(constraints: Constraints<Self>) -> OptionKind {
        OptionKind::Integer(constraints)
    }
}

impl OptionValue for bool {
    const TYPE: OptionType = OptionType::Boolean;

    fn from_raw(raw: &serde_json::Value) -> Option<Self> {
        match raw {
            serde_json::Value::Bool(b) => Some(*b),
            serde_json::Value::String(s) => parse_bool_token(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    fn zero() -> Self {
        true
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn into_kind(constraints: Constraints<Self>) -> OptionKind {
        OptionKind::Boolean(constraints)
    }
}

fn parse_bool_token(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Textual form of a raw value as it appears in error messages.
pub(crate) fn display_raw(raw: &serde_json::Value) -> String {
    match raw {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Converts a raw value into the given option type.
///
/// `option` is only used to label the error.
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionType, Value, coerce};
/// use serde_json::json;
///
/// assert_eq!(coerce("n", OptionType::Integer, &json!("2")), Ok(Value::Integer(2)));
/// assert!(coerce("n", OptionType::Integer, &json!("1.5")).is_err());
/// assert_eq!(coerce("b", OptionType::Boolean, &json!("0")), Ok(Value::Boolean(false)));
/// ```
pub fn coerce(option: &str, kind: OptionType, raw: &serde_json::Value) -> Result<Value, TypeMismatch> {
    let value = match kind {
        OptionType::String => String::from_raw(raw).map(Value::String),
        OptionType::Number => f64::from_raw(raw).map(Value::Number),
        OptionType::Integer => i64::from_raw(raw).map(Value::Integer),
        OptionType::Boolean => bool::from_raw(raw).map(Value::Boolean),
    };
    value.ok_or_else(|| TypeMismatch::new(option, display_raw(raw), kind))
}

/// Typed variant of [`coerce`] used for declared constants.
pub(crate) fn coerce_as<T: OptionValue>(option: &str, raw: &serde_json::Value) -> Result<T, TypeMismatch> {
    T::from_raw(raw).ok_or_else(|| TypeMismatch::new(option, display_raw(raw), T::TYPE))
}
