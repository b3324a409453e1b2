//! Loading schemas from JSON and YAML documents.
//!
//! A schema document is a mapping from option name to option config, with
//! parser switches stored alongside under underscore-prefixed keys:
//!
//! ```yaml
//! str:
//!   type: string
//!   alias: s
//!   required: true
//!   allowedValues: [a, b, c]
//! num:
//!   type: number
//!   defaultValue: "12"
//! verbose: ~
//! _returnErrors: true
//! _help: true
//! ```
//!
//! Declared constants are coerced into the option type (`"12"` becomes
//! `12.0` above). Callables (`isValid`, computed `validationError`) cannot be
//! expressed in a document; attach them with the [`SchemaBuilder`] instead.

use std::path::Path;

use serde_json::Map;
use tracing::debug;

use crate::coerce::{OptionValue, coerce_as, display_raw};
use crate::error::{Error, Result, SchemaError};
use crate::schema::{Schema, SchemaBuilder};
use crate::settings::ApiSwitch;
use crate::types::{OptionBuilder, OptionConfig, OptionType};
use crate::validate::{check_alias, check_config, check_name};

impl Schema {
    /// Builds a schema from a parsed document.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found, in document order.
    ///
    /// # Examples
    ///
    /// ```
    /// use parse_args_core::{OptionType, Schema, Value};
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_value(&json!({
    ///     "num": { "type": "number", "alias": "n", "defaultValue": "12" },
    ///     "_returnErrors": "1",
    /// }))
    /// .unwrap();
    ///
    /// let num = schema.get("num").unwrap();
    /// assert_eq!(num.option_type(), OptionType::Number);
    /// assert_eq!(num.default_value(), Some(Value::Number(12.0)));
    /// assert!(schema.settings().return_errors);
    /// ```
    pub fn from_value(value: &serde_json::Value) -> std::result::Result<Self, SchemaError> {
        let Some(entries) = value.as_object() else {
            return Err(SchemaError::InvalidSchema(value.to_string()));
        };

        let mut builder = SchemaBuilder::default();
        for (key, raw) in entries {
            if key.starts_with('_') {
                apply_switch(&mut builder, key, raw)?;
            } else {
                let config = read_option(key, raw)?;
                builder.insert(key.clone(), config);
            }
        }

        debug!(entries = entries.len(), "Read schema document");
        builder.build()
    }

    /// Parses and validates a JSON schema document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(s)?;
        Ok(Self::from_value(&value)?)
    }

    /// Parses and validates a YAML schema document.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let value: serde_json::Value = serde_yaml::from_str(s)?;
        Ok(Self::from_value(&value)?)
    }

    /// Loads a schema file, choosing the format from its extension
    /// (`.json`, `.yaml` or `.yml`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read,
    /// [`Error::UnsupportedFormat`] for other extensions, a parse error for
    /// malformed documents, or [`Error::Schema`] for invalid declarations.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let schema = match ext.as_deref() {
            Some("json") => Self::from_json_str(&std::fs::read_to_string(path)?)?,
            Some("yaml" | "yml") => Self::from_yaml_str(&std::fs::read_to_string(path)?)?,
            _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
        };

        debug!(path = %path.display(), options = schema.len(), "Loaded schema file");
        Ok(schema)
    }
}

fn apply_switch(
    builder: &mut SchemaBuilder,
    key: &str,
    raw: &serde_json::Value,
) -> std::result::Result<(), SchemaError> {
    let switch = ApiSwitch::from_key(key)
        .ok_or_else(|| SchemaError::UnrecognizedApiOption(key.to_string()))?;
    let settings = builder.settings_mut();

    match switch.flag_mut(settings) {
        Some(flag) => {
            *flag = bool::from_raw(raw).ok_or_else(|| SchemaError::InvalidApiBoolean {
                option: key.to_string(),
                value: display_raw(raw),
            })?;
        }
        None => {
            let template = raw.as_str().ok_or_else(|| SchemaError::InvalidApiString {
                option: key.to_string(),
                value: display_raw(raw),
            })?;
            settings.help_template = Some(template.to_string());
        }
    }
    Ok(())
}

fn read_option(name: &str, raw: &serde_json::Value) -> std::result::Result<OptionConfig, SchemaError> {
    check_name(name)?;

    if raw.is_null() {
        return Ok(OptionConfig::default());
    }
    let Some(fields) = raw.as_object() else {
        return Err(SchemaError::NotAnObject(name.to_string()));
    };

    let ty = match fields.get("type").filter(|v| !v.is_null()) {
        None => OptionType::default(),
        Some(v) => v
            .as_str()
            .and_then(|s| s.parse::<OptionType>().ok())
            .ok_or_else(|| {
                SchemaError::field(
                    name,
                    "type",
                    v.to_string(),
                    format!("Unrecognized data type \"{}\".", display_raw(v)),
                )
            })?,
    };

    let config = match ty {
        OptionType::String => read_fields::<String>(name, fields)?,
        OptionType::Number => read_fields::<f64>(name, fields)?,
        OptionType::Integer => read_fields::<i64>(name, fields)?,
        OptionType::Boolean => read_fields::<bool>(name, fields)?,
    };

    check_config(name, &config)?;
    Ok(config)
}

fn read_fields<T: OptionValue>(
    name: &str,
    fields: &Map<String, serde_json::Value>,
) -> std::result::Result<OptionConfig, SchemaError> {
    let mut builder = OptionBuilder::<T>::new();

    for (field, value) in fields {
        if field.starts_with('-') || field.starts_with('_') {
            return Err(SchemaError::InvalidFieldName {
                option: name.to_string(),
                field: field.clone(),
            });
        }
        if value.is_null() {
            continue;
        }

        let invalid = |reason: &str| SchemaError::field(name, field, value.to_string(), reason);

        match field.as_str() {
            "type" => {}
            "alias" => {
                let s = value
                    .as_str()
                    .ok_or_else(|| invalid("Value must be a string."))?;
                let mut chars = s.chars();
                let (Some(alias), None) = (chars.next(), chars.next()) else {
                    return Err(invalid("Value must be one character only."));
                };
                check_alias(name, alias)?;
                builder = builder.alias(alias);
            }
            "required" => {
                let required = bool::from_raw(value).ok_or_else(|| {
                    invalid(&format!("Invalid boolean value \"{}\".", display_raw(value)))
                })?;
                if required {
                    builder = builder.required();
                }
            }
            "defaultValue" => {
                let default: T = coerce_as(&format!("{name}.{field}"), value)?;
                builder = builder.default_value(default);
            }
            "description" => {
                let s = value
                    .as_str()
                    .ok_or_else(|| invalid("Value must be a string."))?;
                builder = builder.description(s);
            }
            "isValid" => return Err(invalid("Value must be a function.")),
            "validationError" => {
                let s = value
                    .as_str()
                    .ok_or_else(|| invalid("Value must be a string or a function."))?;
                builder = builder.validation_error(s);
            }
            "allowedValues" => {
                let items = value
                    .as_array()
                    .filter(|items| !items.is_empty())
                    .ok_or_else(|| invalid("Value must be a non-empty array."))?;
                let allowed = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| coerce_as::<T>(&format!("{name}.{field}[{i}]"), item))
                    .collect::<std::result::Result<Vec<T>, _>>()?;
                builder = builder.allowed_values(allowed);
            }
            other => {
                return Err(invalid(&format!("Unrecognized user option \"{other}\".")));
            }
        }
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::{OptionKind, Value};

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = Schema::from_value(&json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid options given: [1,2]");
    }

    #[test]
    fn test_unrecognized_api_option() {
        let err = Schema::from_value(&json!({ "_x": {} })).unwrap_err();
        assert_eq!(err, SchemaError::UnrecognizedApiOption("_x".to_string()));
        assert_eq!(err.to_string(), "Unrecognized API option \"_x\".");
    }

    #[test]
    fn test_api_switches_accept_boolean_tokens() {
        let schema = Schema::from_value(&json!({
            "_throwOnErrors": false,
            "_returnErrors": "true",
            "_verbose": 0,
            "_keepAll": "1",
            "_flagUnknowns": true,
            "_ignoreUnknowns": "false",
            "_helpTemplate": "Usage:\n{OPTIONS}",
        }))
        .unwrap();

        let settings = schema.settings();
        assert!(!settings.throw_on_errors);
        assert!(settings.return_errors);
        assert!(!settings.verbose);
        assert!(settings.keep_all);
        assert!(settings.flag_unknowns);
        assert!(!settings.ignore_unknowns);
        assert_eq!(settings.help_template.as_deref(), Some("Usage:\n{OPTIONS}"));
    }

    #[test]
    fn test_api_switch_rejects_bad_values() {
        let err = Schema::from_value(&json!({ "_verbose": "yes" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In API option \"_verbose\": Invalid boolean value \"yes\". Allowed values are [\"0\",\"1\",\"false\",\"true\"]."
        );

        let err = Schema::from_value(&json!({ "_helpTemplate": 5 })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In API option \"_helpTemplate\": Value \"5\" is not a string."
        );
    }

    #[test]
    fn test_help_switch_injects_option_at_end() {
        let schema = Schema::from_value(&json!({
            "_help": true,
            "all": { "alias": "a" },
        }))
        .unwrap();
        let names: Vec<&str> = schema.options().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["all", "help"]);
    }

    #[test]
    fn test_null_config_defaults_to_boolean_flag() {
        let schema = Schema::from_value(&json!({ "flag": null })).unwrap();
        let flag = schema.get("flag").unwrap();
        assert_eq!(flag.option_type(), OptionType::Boolean);
        assert!(!flag.required);
    }

    #[test]
    fn test_option_name_rules() {
        let err = Schema::from_value(&json!({ "-x": {} })).unwrap_err();
        assert_eq!(err, SchemaError::LeadingDash("-x".to_string()));

        let err = Schema::from_value(&json!({ "nonOptions": {} })).unwrap_err();
        assert_eq!(err, SchemaError::ReservedName("nonOptions".to_string()));

        let err = Schema::from_value(&json!({ "x": 5 })).unwrap_err();
        assert_eq!(err.to_string(), "In user option \"x\": Value is not an object.");
    }

    #[test]
    fn test_field_rules() {
        let cases = [
            (json!({ "x": { "type": "float" } }), "Unrecognized data type \"float\"."),
            (json!({ "x": { "alias": 1 } }), "Value must be a string."),
            (json!({ "x": { "alias": "ab" } }), "Value must be one character only."),
            (json!({ "x": { "alias": "_" } }), "Option name cannot be \"-\" or \"_\"."),
            (json!({ "x": { "required": "maybe" } }), "Invalid boolean value \"maybe\"."),
            (json!({ "x": { "description": 3 } }), "Value must be a string."),
            (json!({ "x": { "isValid": true } }), "Value must be a function."),
            (json!({ "x": { "validationError": 1 } }), "Value must be a string or a function."),
            (json!({ "x": { "allowedValues": [] } }), "Value must be a non-empty array."),
            (json!({ "x": { "allowedValues": "a" } }), "Value must be a non-empty array."),
            (json!({ "x": { "colour": "red" } }), "Unrecognized user option \"colour\"."),
        ];

        for (doc, reason) in cases {
            let err = Schema::from_value(&doc).unwrap_err();
            assert!(
                err.to_string().ends_with(reason),
                "{doc}: got {err}, expected reason {reason}"
            );
        }
    }

    #[test]
    fn test_field_name_prefixes_are_rejected() {
        let err = Schema::from_value(&json!({ "x": { "_type": "string" } })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "User option \"x._type\" cannot begin with \"-\" or \"_\"."
        );
    }

    #[test]
    fn test_duplicate_alias_across_options() {
        let err = Schema::from_value(&json!({
            "all": { "alias": "a" },
            "any": { "alias": "a" },
        }))
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate option alias."));
    }

    #[test]
    fn test_required_with_default_is_fatal_in_either_order() {
        let first = json!({ "x": { "type": "number", "required": true, "defaultValue": 1 } });
        let second = json!({ "x": { "type": "number", "defaultValue": 1, "required": true } });
        for doc in [first, second] {
            let err = Schema::from_value(&doc).unwrap_err();
            assert!(
                err.to_string()
                    .contains("\"required\" cannot be set when \"defaultValue\" is set."),
                "{err}"
            );
        }

        // A false `required` does not conflict with a default.
        let ok = json!({ "x": { "type": "number", "defaultValue": 12, "required": false } });
        assert!(Schema::from_value(&ok).is_ok());
    }

    #[test]
    fn test_constants_are_coerced_to_declared_type() {
        let schema = Schema::from_value(&json!({
            "num": { "type": "number", "allowedValues": ["1.5", 2.5, 3] },
            "int": { "type": "integer", "defaultValue": "7" },
            "boo": { "defaultValue": "0" },
        }))
        .unwrap();

        let OptionKind::Number(num) = &schema.get("num").unwrap().kind else {
            panic!("num should be a number option");
        };
        assert_eq!(num.allowed_values, Some(vec![1.5, 2.5, 3.0]));
        assert_eq!(
            schema.get("int").unwrap().default_value(),
            Some(Value::Integer(7))
        );
        assert_eq!(
            schema.get("boo").unwrap().default_value(),
            Some(Value::Boolean(false))
        );
    }

    #[test]
    fn test_bad_constant_is_fatal() {
        let err = Schema::from_value(&json!({
            "int": { "type": "integer", "allowedValues": [1, "x"] },
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "In option \"int.allowedValues[1]\" with value \"x\": Value is not an integer."
        );

        let err = Schema::from_value(&json!({
            "str": { "type": "string", "defaultValue": 5 },
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "In option \"str.defaultValue\" with value \"5\": Value is not a string."
        );
    }

    #[test]
    fn test_from_yaml_str_preserves_order() {
        let yaml = r#"
zeta:
  alias: z
alpha:
  type: string
  description: First letter
_help: true
"#;
        let schema = Schema::from_yaml_str(yaml).unwrap();
        let names: Vec<&str> = schema.options().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["zeta", "alpha", "help"]);
    }

    #[test]
    fn test_from_json_str_reports_syntax_errors() {
        let err = Schema::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("schema.json");
        std::fs::write(&json_path, r#"{ "name": { "type": "string", "alias": "n" } }"#).unwrap();
        let schema = Schema::load(&json_path).unwrap();
        assert_eq!(schema.resolve_alias('n'), Some("name"));

        let yaml_path = dir.path().join("schema.yml");
        std::fs::write(&yaml_path, "count:\n  type: integer\n").unwrap();
        let schema = Schema::load(&yaml_path).unwrap();
        assert_eq!(
            schema.get("count").unwrap().option_type(),
            OptionType::Integer
        );

        let txt_path = dir.path().join("schema.txt");
        std::fs::write(&txt_path, "{}").unwrap();
        assert!(matches!(
            Schema::load(&txt_path),
            Err(Error::UnsupportedFormat(_))
        ));
    }
}
