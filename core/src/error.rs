//! Error types for schema validation and argument parsing.
//!
//! Two tiers exist. [`SchemaError`] covers programmer mistakes in the option
//! schema and is always fatal. End-user mistakes in the argument vector are
//! reported through the parser's error channel and only surface here as
//! [`Error::Aborted`] when the schema asks for throw-on-error behavior.

use thiserror::Error;

use crate::coerce::TypeMismatch;

/// Structural problems found while validating an option schema.
///
/// The `Display` impl renders the exact message shown to the developer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The schema declaration is not a mapping.
    #[error("Invalid options given: {0}")]
    InvalidSchema(String),

    /// An underscore-prefixed key is not a known API switch.
    #[error("Unrecognized API option \"{0}\".")]
    UnrecognizedApiOption(String),

    /// A boolean API switch carries a value that is not boolean-like.
    #[error(
        "In API option \"{option}\": Invalid boolean value \"{value}\". Allowed values are [\"0\",\"1\",\"false\",\"true\"]."
    )]
    InvalidApiBoolean { option: String, value: String },

    /// A string API switch carries a non-string value.
    #[error("In API option \"{option}\": Value \"{value}\" is not a string.")]
    InvalidApiString { option: String, value: String },

    /// Option name begins with `-`.
    #[error("In user option \"{0}\": Option names cannot begin with \"-\".")]
    LeadingDash(String),

    /// Option name begins with `_`, which is reserved for API switches.
    #[error("In user option \"{0}\": Option names cannot begin with \"_\".")]
    LeadingUnderscore(String),

    /// Option name collides with a key of the flattened parse result.
    #[error("In user option \"{0}\": Option name \"{0}\" is reserved for use in the return value.")]
    ReservedName(String),

    /// Option config is neither null nor a mapping.
    #[error("In user option \"{0}\": Value is not an object.")]
    NotAnObject(String),

    /// A config field name begins with `-` or `_`.
    #[error("User option \"{option}.{field}\" cannot begin with \"-\" or \"_\".")]
    InvalidFieldName { option: String, field: String },

    /// A config field carries an invalid value.
    #[error("In user option \"{option}.{field}\" of value {value}: {reason}")]
    InvalidField {
        option: String,
        field: String,
        value: String,
        reason: String,
    },

    /// A declared constant (default or allowed value) does not fit the option type.
    #[error(transparent)]
    InvalidConstant(#[from] TypeMismatch),
}

impl SchemaError {
    pub(crate) fn field(
        option: &str,
        field: &str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            option: option.to_string(),
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by the public parsing and loading entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema is malformed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Parsing stopped at the first argument error because throw-on-error is set.
    #[error("{0}")]
    Aborted(String),

    /// File I/O failure while loading a schema.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure while loading a schema.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure while loading a schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Schema file extension is neither JSON nor YAML.
    #[error("unsupported schema file format: {0}")]
    UnsupportedFormat(String),
}

/// Convenience alias for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
