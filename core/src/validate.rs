//! Structural validation of option declarations.
//!
//! Catches schema mistakes that would otherwise produce confusing parse
//! results: bad option names, names that collide with result keys, invalid
//! or duplicate aliases, required options that also declare a default, and
//! empty allowed-value lists. Every violation is fatal.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::types::OptionConfig;

/// Result keys used by the flattened JSON form of a parse result.
pub const RESERVED_OPTION_NAMES: [&str; 2] = ["nonOptions", "errors"];

/// Validates a full list of declarations, in order.
pub(crate) fn validate_options(options: &[(String, OptionConfig)]) -> Result<(), SchemaError> {
    let mut aliases: HashMap<char, &str> = HashMap::new();

    for (name, config) in options {
        check_name(name)?;
        check_config(name, config)?;

        if let Some(alias) = config.alias {
            if aliases.insert(alias, name).is_some() {
                return Err(SchemaError::field(
                    name,
                    "alias",
                    json_char(alias),
                    "Duplicate option alias.",
                ));
            }
        }
    }

    Ok(())
}

/// Checks an option name.
pub(crate) fn check_name(name: &str) -> Result<(), SchemaError> {
    if name.starts_with('-') {
        return Err(SchemaError::LeadingDash(name.to_string()));
    }
    if name.starts_with('_') {
        return Err(SchemaError::LeadingUnderscore(name.to_string()));
    }
    if RESERVED_OPTION_NAMES.contains(&name) {
        return Err(SchemaError::ReservedName(name.to_string()));
    }
    Ok(())
}

/// Checks one config in isolation.
pub(crate) fn check_config(name: &str, config: &OptionConfig) -> Result<(), SchemaError> {
    if let Some(alias) = config.alias {
        check_alias(name, alias)?;
    }

    if config.required {
        if let Some(default) = config.default_value() {
            return Err(SchemaError::field(
                name,
                "defaultValue",
                default.to_json().to_string(),
                "\"required\" cannot be set when \"defaultValue\" is set.",
            ));
        }
    }

    if let Some(allowed) = config.kind.allowed_values() {
        if allowed.is_empty() {
            return Err(SchemaError::field(
                name,
                "allowedValues",
                "[]",
                "Value must be a non-empty array.",
            ));
        }
    }

    Ok(())
}

pub(crate) fn check_alias(name: &str, alias: char) -> Result<(), SchemaError> {
    if alias == '-' || alias == '_' {
        return Err(SchemaError::field(
            name,
            "alias",
            json_char(alias),
            "Option name cannot be \"-\" or \"_\".",
        ));
    }
    Ok(())
}

fn json_char(c: char) -> String {
    serde_json::Value::String(c.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, config: impl Into<OptionConfig>) -> (String, OptionConfig) {
        (name.to_string(), config.into())
    }

    #[test]
    fn test_validate_options_accepts_valid_declarations() {
        let options = vec![
            decl("str", OptionConfig::string().alias('s').required()),
            decl("num", OptionConfig::number().alias('n').default_value(12)),
            decl("flag", OptionConfig::default()),
        ];
        assert_eq!(validate_options(&options), Ok(()));
    }

    #[test]
    fn test_validate_options_rejects_bad_names() {
        let options = vec![decl("-x", OptionConfig::default())];
        assert_eq!(
            validate_options(&options),
            Err(SchemaError::LeadingDash("-x".to_string()))
        );

        let options = vec![decl("_x", OptionConfig::default())];
        assert_eq!(
            validate_options(&options),
            Err(SchemaError::LeadingUnderscore("_x".to_string()))
        );

        let options = vec![decl("errors", OptionConfig::default())];
        let err = validate_options(&options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In user option \"errors\": Option name \"errors\" is reserved for use in the return value."
        );
    }

    #[test]
    fn test_validate_options_rejects_duplicate_alias() {
        let options = vec![
            decl("all", OptionConfig::boolean().alias('a')),
            decl("any", OptionConfig::boolean().alias('a')),
        ];
        let err = validate_options(&options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In user option \"any.alias\" of value \"a\": Duplicate option alias."
        );
    }

    #[test]
    fn test_validate_options_rejects_reserved_alias_chars() {
        let options = vec![decl("dash", OptionConfig::boolean().alias('-'))];
        assert!(matches!(
            validate_options(&options),
            Err(SchemaError::InvalidField { ref field, .. }) if field == "alias"
        ));
    }

    #[test]
    fn test_validate_options_rejects_required_with_default() {
        let options = vec![decl(
            "num",
            OptionConfig::number().required().default_value(1),
        )];
        let err = validate_options(&options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In user option \"num.defaultValue\" of value 1: \"required\" cannot be set when \"defaultValue\" is set."
        );
    }

    #[test]
    fn test_validate_options_rejects_empty_allowed_values() {
        let options = vec![decl(
            "int",
            OptionConfig::integer().allowed_values(Vec::<i64>::new()),
        )];
        assert!(matches!(
            validate_options(&options),
            Err(SchemaError::InvalidField { ref field, .. }) if field == "allowedValues"
        ));
    }
}
