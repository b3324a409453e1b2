//! Parser behavior switches.
//!
//! In a schema document these are the underscore-prefixed keys
//! (`_returnErrors: true`); in code they are set on the
//! [`SchemaBuilder`](crate::SchemaBuilder).

use serde::{Deserialize, Serialize};

/// Switches controlling how a parse call behaves.
///
/// All switches default to off. Serialized with the same camelCase names a
/// schema document uses, minus the leading underscore.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseSettings {
    /// Abort the parse at the first argument error (`_throwOnErrors`).
    pub throw_on_errors: bool,
    /// Collect argument errors into the result (`_returnErrors`).
    pub return_errors: bool,
    /// Print argument errors to the output sink as they occur (`_verbose`).
    pub verbose: bool,
    /// Keep the first two argv entries instead of dropping them (`_keepAll`).
    pub keep_all: bool,
    /// Report options missing from the schema as errors (`_flagUnknowns`).
    pub flag_unknowns: bool,
    /// Leave options missing from the schema out of the result (`_ignoreUnknowns`).
    pub ignore_unknowns: bool,
    /// Add a `--help`/`-?` option that prints the help text (`_help`).
    pub help: bool,
    /// Template wrapped around the rendered option list (`_helpTemplate`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_template: Option<String>,
}

/// A recognized API switch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ApiSwitch {
    ThrowOnErrors,
    ReturnErrors,
    Verbose,
    KeepAll,
    FlagUnknowns,
    IgnoreUnknowns,
    Help,
    HelpTemplate,
}

impl ApiSwitch {
    pub(crate) fn from_key(key: &str) -> Option<Self> {
        match key {
            "_throwOnErrors" => Some(Self::ThrowOnErrors),
            "_returnErrors" => Some(Self::ReturnErrors),
            "_verbose" => Some(Self::Verbose),
            "_keepAll" => Some(Self::KeepAll),
            "_flagUnknowns" => Some(Self::FlagUnknowns),
            "_ignoreUnknowns" => Some(Self::IgnoreUnknowns),
            "_help" => Some(Self::Help),
            "_helpTemplate" => Some(Self::HelpTemplate),
            _ => None,
        }
    }

    /// The boolean field this switch controls, if it is a boolean switch.
    pub(crate) fn flag_mut(self, settings: &mut ParseSettings) -> Option<&mut bool> {
        match self {
            Self::ThrowOnErrors => Some(&mut settings.throw_on_errors),
            Self::ReturnErrors => Some(&mut settings.return_errors),
            Self::Verbose => Some(&mut settings.verbose),
            Self::KeepAll => Some(&mut settings.keep_all),
            Self::FlagUnknowns => Some(&mut settings.flag_unknowns),
            Self::IgnoreUnknowns => Some(&mut settings.ignore_unknowns),
            Self::Help => Some(&mut settings.help),
            Self::HelpTemplate => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_keys() {
        assert_eq!(ApiSwitch::from_key("_help"), Some(ApiSwitch::Help));
        assert_eq!(
            ApiSwitch::from_key("_helpTemplate"),
            Some(ApiSwitch::HelpTemplate)
        );
        assert_eq!(ApiSwitch::from_key("_x"), None);
        assert_eq!(ApiSwitch::from_key("help"), None);
    }

    #[test]
    fn test_flag_mut_targets_matching_field() {
        let mut settings = ParseSettings::default();
        *ApiSwitch::ReturnErrors.flag_mut(&mut settings).unwrap() = true;
        *ApiSwitch::KeepAll.flag_mut(&mut settings).unwrap() = true;
        assert!(settings.return_errors);
        assert!(settings.keep_all);
        assert!(!settings.verbose);
        assert!(ApiSwitch::HelpTemplate.flag_mut(&mut settings).is_none());
    }

    #[test]
    fn test_settings_serde_names() {
        let settings: ParseSettings =
            serde_json::from_str(r#"{ "returnErrors": true, "helpTemplate": "T" }"#).unwrap();
        assert!(settings.return_errors);
        assert_eq!(settings.help_template.as_deref(), Some("T"));
        assert!(!settings.keep_all);

        let json = serde_json::to_value(ParseSettings::default()).unwrap();
        assert_eq!(json["ignoreUnknowns"], serde_json::json!(false));
        assert!(json.get("helpTemplate").is_none());
    }
}
