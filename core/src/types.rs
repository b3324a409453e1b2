//! Option type definitions.
//!
//! An option is declared with an [`OptionConfig`]: the fields shared by every
//! option (alias, required, description) plus an [`OptionKind`] carrying the
//! constraints that only make sense for one value type. Configs are usually
//! produced by the typed builders [`OptionConfig::string`],
//! [`OptionConfig::number`], [`OptionConfig::integer`] and
//! [`OptionConfig::boolean`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize, Serializer};

use crate::coerce::OptionValue;

/// Value type of an option.
///
/// Options without a declared type are boolean flags.
///
/// # Examples
///
/// ```
/// use parse_args_core::OptionType;
///
/// assert_eq!(OptionType::default(), OptionType::Boolean);
/// assert_eq!("integer".parse::<OptionType>(), Ok(OptionType::Integer));
/// assert_eq!(OptionType::Number.to_string(), "number");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    String,
    Number,
    Integer,
    #[default]
    Boolean,
}

impl OptionType {
    /// Name used in schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    /// Noun phrase used in type mismatch messages.
    pub fn article(self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::Boolean => "a boolean",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            _ => Err(()),
        }
    }
}

/// A parsed option value.
///
/// Unknown options are recorded as `String` (with `=value`) or
/// `Boolean(true)` (without).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    /// Returns the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// JSON form. Whole floats render without a fractional part.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
                serde_json::Value::from(*n as i64)
            }
            Self::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Boolean(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// User predicate run on every coerced value of an option.
pub struct Validator<T>(Arc<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Validator<T> {
    pub fn new(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn check(&self, value: &T) -> bool {
        (self.0)(value)
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Message reported when a [`Validator`] rejects a value.
pub enum ValidationMessage<T> {
    /// Fixed text.
    Text(String),
    /// Text computed from the rejected value.
    Computed(Arc<dyn Fn(&T) -> String + Send + Sync>),
}

impl<T> ValidationMessage<T> {
    pub fn render(&self, value: &T) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Computed(f) => f(value),
        }
    }
}

impl<T> Clone for ValidationMessage<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Text(s) => Self::Text(s.clone()),
            Self::Computed(f) => Self::Computed(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for ValidationMessage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Constraints that depend on the option's value type.
#[derive(Debug, Clone)]
pub struct Constraints<T> {
    /// Value assigned when the option never appears in argv.
    pub default_value: Option<T>,
    /// Values the option may take.
    pub allowed_values: Option<Vec<T>>,
    /// User predicate over the coerced value.
    pub validator: Option<Validator<T>>,
    /// Message used when the validator rejects a value.
    pub validation_error: Option<ValidationMessage<T>>,
}

impl<T> Default for Constraints<T> {
    fn default() -> Self {
        Self {
            default_value: None,
            allowed_values: None,
            validator: None,
            validation_error: None,
        }
    }
}

/// Per-type constraints of an option.
#[derive(Debug, Clone)]
pub enum OptionKind {
    String(Constraints<String>),
    Number(Constraints<f64>),
    Integer(Constraints<i64>),
    Boolean(Constraints<bool>),
}

impl Default for OptionKind {
    fn default() -> Self {
        Self::Boolean(Constraints::default())
    }
}

impl OptionKind {
    pub fn option_type(&self) -> OptionType {
        match self {
            Self::String(_) => OptionType::String,
            Self::Number(_) => OptionType::Number,
            Self::Integer(_) => OptionType::Integer,
            Self::Boolean(_) => OptionType::Boolean,
        }
    }

    /// Declared default, untyped.
    pub fn default_value(&self) -> Option<Value> {
        match self {
            Self::String(c) => c.default_value.clone().map(Value::String),
            Self::Number(c) => c.default_value.map(Value::Number),
            Self::Integer(c) => c.default_value.map(Value::Integer),
            Self::Boolean(c) => c.default_value.map(Value::Boolean),
        }
    }

    /// Declared allowed values, untyped.
    pub fn allowed_values(&self) -> Option<Vec<Value>> {
        fn untyped<T: OptionValue>(values: &Option<Vec<T>>) -> Option<Vec<Value>> {
            values
                .as_ref()
                .map(|v| v.iter().cloned().map(T::into_value).collect())
        }
        match self {
            Self::String(c) => untyped(&c.allowed_values),
            Self::Number(c) => untyped(&c.allowed_values),
            Self::Integer(c) => untyped(&c.allowed_values),
            Self::Boolean(c) => untyped(&c.allowed_values),
        }
    }
}

/// Declaration of a single option.
///
/// The default config is an optional boolean flag with no alias.
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionConfig, OptionType, Value};
///
/// let config: OptionConfig = OptionConfig::number()
///     .alias('n')
///     .default_value(12)
///     .description("A number")
///     .into();
/// assert_eq!(config.option_type(), OptionType::Number);
/// assert_eq!(config.alias, Some('n'));
/// assert_eq!(config.default_value(), Some(Value::Number(12.0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionConfig {
    /// Single-character short form.
    pub alias: Option<char>,
    /// Whether `--name=<value>` must be given.
    pub required: bool,
    /// Help text.
    pub description: Option<String>,
    /// Type and type-specific constraints.
    pub kind: OptionKind,
}

impl OptionConfig {
    pub fn string() -> OptionBuilder<String> {
        OptionBuilder::new()
    }

    pub fn number() -> OptionBuilder<f64> {
        OptionBuilder::new()
    }

    pub fn integer() -> OptionBuilder<i64> {
        OptionBuilder::new()
    }

    pub fn boolean() -> OptionBuilder<bool> {
        OptionBuilder::new()
    }

    pub fn option_type(&self) -> OptionType {
        self.kind.option_type()
    }

    pub fn default_value(&self) -> Option<Value> {
        self.kind.default_value()
    }
}

/// Typed builder for [`OptionConfig`].
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionConfig, OptionKind};
///
/// let config: OptionConfig = OptionConfig::integer()
///     .alias('i')
///     .allowed_values([1, 2, 3])
///     .validator(|v| *v <= 1000)
///     .validation_error_with(|v| format!("{v} is too large"))
///     .into();
/// let OptionKind::Integer(c) = &config.kind else { unreachable!() };
/// assert_eq!(c.allowed_values, Some(vec![1, 2, 3]));
/// assert!(c.validator.as_ref().unwrap().check(&3));
/// ```
#[derive(Debug, Clone)]
pub struct OptionBuilder<T> {
    alias: Option<char>,
    required: bool,
    description: Option<String>,
    constraints: Constraints<T>,
}

impl<T: OptionValue> OptionBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            alias: None,
            required: false,
            description: None,
            constraints: Constraints::default(),
        }
    }

    pub fn alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Marks the option as required. Cannot be combined with a default.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<T>) -> Self {
        self.constraints.default_value = Some(value.into());
        self
    }

    pub fn allowed_values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        self.constraints.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn validator(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.constraints.validator = Some(Validator::new(f));
        self
    }

    pub fn validation_error(mut self, message: impl Into<String>) -> Self {
        self.constraints.validation_error = Some(ValidationMessage::Text(message.into()));
        self
    }

    pub fn validation_error_with(mut self, f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.constraints.validation_error = Some(ValidationMessage::Computed(Arc::new(f)));
        self
    }

    pub fn build(self) -> OptionConfig {
        OptionConfig {
            alias: self.alias,
            required: self.required,
            description: self.description,
            kind: T::into_kind(self.constraints),
        }
    }
}

impl<T: OptionValue> From<OptionBuilder<T>> for OptionConfig {
    fn from(builder: OptionBuilder<T>) -> Self {
        builder.build()
    }
}
