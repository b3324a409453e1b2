//! Validated option schemas.

use tracing::debug;

use crate::error::SchemaError;
use crate::settings::ParseSettings;
use crate::types::OptionConfig;
use crate::validate::validate_options;

/// Name of the option injected by the help switch.
pub const HELP_OPTION: &str = "help";

/// Alias of the injected help option.
pub const HELP_ALIAS: char = '?';

/// Description of the injected help option.
pub const HELP_DESCRIPTION: &str = "Show the help text.";

/// A validated, immutable option schema.
///
/// Holds the option declarations in declaration order plus the parser
/// switches. A `Schema` can only be obtained through [`SchemaBuilder::build`]
/// or the document loaders ([`Schema::from_value`] and friends), both of
/// which validate it, so every parse can rely on its invariants.
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionConfig, Schema};
///
/// let schema = Schema::builder()
///     .option("long", OptionConfig::boolean().alias('l'))
///     .option("format", OptionConfig::string().required())
///     .help(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 3); // help is injected last
/// assert_eq!(schema.resolve_alias('l'), Some("long"));
/// assert_eq!(schema.resolve_alias('?'), Some("help"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    options: Vec<(String, OptionConfig)>,
    settings: ParseSettings,
}

impl Schema {
    /// Starts an empty builder.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Declared options, in declaration order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionConfig)> {
        self.options.iter().map(|(name, config)| (name.as_str(), config))
    }

    /// Finds an option by name.
    pub fn get(&self, name: &str) -> Option<&OptionConfig> {
        self.options
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, config)| config)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Maps a short alias to its option name.
    pub fn resolve_alias(&self, alias: char) -> Option<&str> {
        self.options
            .iter()
            .find(|(_, config)| config.alias == Some(alias))
            .map(|(name, _)| name.as_str())
    }

    pub fn settings(&self) -> &ParseSettings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Returns a builder seeded with this schema's declarations.
    pub fn to_builder(&self) -> SchemaBuilder {
        SchemaBuilder {
            options: self.options.clone(),
            settings: self.settings.clone(),
        }
    }
}

/// Builder for [`Schema`].
///
/// Declaring the same option name twice replaces the earlier config in
/// place.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    options: Vec<(String, OptionConfig)>,
    settings: ParseSettings,
}

impl SchemaBuilder {
    /// Declares an option.
    pub fn option(mut self, name: impl Into<String>, config: impl Into<OptionConfig>) -> Self {
        self.insert(name.into(), config.into());
        self
    }

    pub(crate) fn insert(&mut self, name: String, config: OptionConfig) {
        match self.options.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = config,
            None => self.options.push((name, config)),
        }
    }

    /// Replaces all switches at once.
    pub fn settings(mut self, settings: ParseSettings) -> Self {
        self.settings = settings;
        self
    }

    pub(crate) fn settings_mut(&mut self) -> &mut ParseSettings {
        &mut self.settings
    }

    pub fn throw_on_errors(mut self, on: bool) -> Self {
        self.settings.throw_on_errors = on;
        self
    }

    pub fn return_errors(mut self, on: bool) -> Self {
        self.settings.return_errors = on;
        self
    }

    pub fn verbose(mut self, on: bool) -> Self {
        self.settings.verbose = on;
        self
    }

    pub fn keep_all(mut self, on: bool) -> Self {
        self.settings.keep_all = on;
        self
    }

    pub fn flag_unknowns(mut self, on: bool) -> Self {
        self.settings.flag_unknowns = on;
        self
    }

    pub fn ignore_unknowns(mut self, on: bool) -> Self {
        self.settings.ignore_unknowns = on;
        self
    }

    pub fn help(mut self, on: bool) -> Self {
        self.settings.help = on;
        self
    }

    pub fn help_template(mut self, template: impl Into<String>) -> Self {
        self.settings.help_template = Some(template.into());
        self
    }

    /// Validates the declarations and produces the schema.
    ///
    /// When the help switch is on and no `help` option is declared, a boolean
    /// `help` option with alias `?` is appended.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] describing the first structural problem.
    pub fn build(mut self) -> Result<Schema, SchemaError> {
        if self.settings.help && !self.options.iter().any(|(n, _)| n == HELP_OPTION) {
            self.options.push((
                HELP_OPTION.to_string(),
                OptionConfig::boolean()
                    .alias(HELP_ALIAS)
                    .description(HELP_DESCRIPTION)
                    .build(),
            ));
        }

        validate_options(&self.options)?;

        debug!(
            options = self.options.len(),
            help = self.settings.help,
            "Validated option schema"
        );

        Ok(Schema {
            options: self.options,
            settings: self.settings,
        })
    }
}
