//! Argument vector parsing.
//!
//! A single left-to-right scan classifies every token:
//!
//! - `--` ends option scanning; everything after it is positional.
//! - a token not starting with `-` is positional.
//! - `--name[=value]` is a long option.
//! - `-abc` is a cluster of short options, resolved one letter at a time.
//!   `-a=value` is accepted only for a single letter.
//!
//! Each option is then resolved against the schema: alias lookup, required
//! value checks, type coercion, the user validator and the allowed-values
//! list. Argument errors never stop the scan unless the schema sets
//! `throw_on_errors`.

use tracing::debug;

use crate::coerce::{OptionValue, TypeMismatch};
use crate::error::{Error, Result};
use crate::help::print_help;
use crate::output::{OUTPUT_PREFIX, OutputSink, StdoutSink};
use crate::result::ParseResult;
use crate::schema::{HELP_OPTION, Schema};
use crate::types::{Constraints, OptionKind, Value};

/// Number of leading argv entries (interpreter and script path) dropped
/// unless `keep_all` is set.
const LEADING_ARGS: usize = 2;

/// Parses `argv` against `schema`, printing to standard output.
///
/// The first two entries of `argv` are the interpreter and script path and
/// are dropped unless the schema sets `keep_all` (or fewer than two entries
/// are given).
///
/// # Errors
///
/// Returns [`Error::Aborted`] with the first argument error when the schema
/// sets `throw_on_errors`. Otherwise argument errors are handled according
/// to `return_errors` and `verbose` and parsing always succeeds.
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionConfig, Schema, parse_args};
///
/// let schema = Schema::builder()
///     .option("req", OptionConfig::string().alias('r').required())
///     .return_errors(true)
///     .build()
///     .unwrap();
///
/// let result = parse_args(["node", "script", "-r=a"], &schema).unwrap();
/// assert_eq!(result.get_str("req"), Some("a"));
///
/// let result = parse_args(["node", "script"], &schema).unwrap();
/// assert_eq!(result.errors, vec!["Missing required option \"--req\"."]);
/// ```
pub fn parse_args<I, S>(argv: I, schema: &Schema) -> Result<ParseResult>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    parse_args_with(argv, schema, &StdoutSink)
}

/// Same as [`parse_args`], printing help and verbose errors to `sink`.
pub fn parse_args_with<I, S>(argv: I, schema: &Schema, sink: &dyn OutputSink) -> Result<ParseResult>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
    let skip = if argv.len() >= LEADING_ARGS && !schema.settings().keep_all {
        LEADING_ARGS
    } else {
        0
    };
    Parser::new(schema, sink).run(&argv[skip..])
}

/// Parses the process arguments against `schema`.
///
/// A compiled program has no separate script path, so only the program
/// path is dropped (unless the schema sets `keep_all`).
pub fn parse_env_args(schema: &Schema) -> Result<ParseResult> {
    parse_env_args_with(schema, &StdoutSink)
}

/// Same as [`parse_env_args`], printing to `sink`.
pub fn parse_env_args_with(schema: &Schema, sink: &dyn OutputSink) -> Result<ParseResult> {
    let argv: Vec<String> = std::env::args().collect();
    let skip = usize::from(!argv.is_empty() && !schema.settings().keep_all);
    Parser::new(schema, sink).run(&argv[skip..])
}

struct Parser<'a> {
    schema: &'a Schema,
    sink: &'a dyn OutputSink,
    result: ParseResult,
}

impl<'a> Parser<'a> {
    fn new(schema: &'a Schema, sink: &'a dyn OutputSink) -> Self {
        Self {
            schema,
            sink,
            result: ParseResult::default(),
        }
    }

    fn run(mut self, tokens: &[String]) -> Result<ParseResult> {
        debug!(
            tokens = tokens.len(),
            options = self.schema.len(),
            "Parsing arguments"
        );
        self.scan(tokens)?;
        self.finish()
    }

    /// Routes an argument error according to the schema switches.
    fn report(&mut self, message: String) -> Result<()> {
        debug!(error = %message, "Argument error");

        let settings = self.schema.settings();
        if settings.throw_on_errors {
            return Err(Error::Aborted(message));
        }
        if settings.verbose {
            self.sink.print(&format!("{OUTPUT_PREFIX}{message}"));
        }
        if settings.return_errors {
            self.result.errors.push(message);
        }
        Ok(())
    }

    fn scan(&mut self, tokens: &[String]) -> Result<()> {
        let mut iter = tokens.iter();

        while let Some(arg) = iter.next() {
            if arg == "--" {
                self.result.non_options.extend(iter.by_ref().cloned());
                break;
            }

            if !arg.starts_with('-') {
                self.result.non_options.push(arg.clone());
                continue;
            }

            let (prefix, value) = match arg.split_once('=') {
                Some((prefix, value)) => (prefix, Some(value)),
                None => (arg.as_str(), None),
            };

            if let Some(name) = prefix.strip_prefix("--") {
                if name.starts_with('_') || name.starts_with('-') {
                    self.report(format!(
                        "In option \"{arg}\": Option names cannot start with \"_\" or \"-\"."
                    ))?;
                    continue;
                }
                self.resolve(prefix, name, value)?;
                continue;
            }

            let letters = &prefix[1..];
            if value.is_some() && letters.chars().count() > 1 {
                self.report(format!(
                    "In option \"{arg}\": Cannot share one value for multiple short options."
                ))?;
                continue;
            }

            let schema = self.schema;
            for letter in letters.chars() {
                let name = match schema.resolve_alias(letter) {
                    Some(name) => name.to_string(),
                    None => letter.to_string(),
                };
                self.resolve(&format!("-{letter}"), &name, value)?;
            }
        }

        Ok(())
    }

    fn resolve(&mut self, display: &str, name: &str, raw: Option<&str>) -> Result<()> {
        let schema = self.schema;

        if schema.settings().help && name == HELP_OPTION {
            print_help(schema, self.sink);
        }

        let Some(config) = schema.get(name) else {
            return self.resolve_unknown(display, name, raw);
        };

        if config.required && raw.is_none_or(str::is_empty) {
            return self.report(format!(
                "In option \"{display}\": Required option value must be non-empty, i.e. \"{display}=<value>\"."
            ));
        }

        match &config.kind {
            OptionKind::String(c) => self.resolve_typed(display, name, raw, c),
            OptionKind::Number(c) => self.resolve_typed(display, name, raw, c),
            OptionKind::Integer(c) => self.resolve_typed(display, name, raw, c),
            OptionKind::Boolean(c) => self.resolve_typed(display, name, raw, c),
        }
    }

    fn resolve_unknown(&mut self, display: &str, name: &str, raw: Option<&str>) -> Result<()> {
        let settings = self.schema.settings();
        if settings.flag_unknowns {
            self.report(format!("Unrecognized option \"{display}\"."))?;
        }
        if !settings.ignore_unknowns {
            let value = match raw {
                Some(text) => Value::from(text),
                None => Value::Boolean(true),
            };
            self.result.set(name, value);
        }
        Ok(())
    }

    fn resolve_typed<T: OptionValue>(
        &mut self,
        display: &str,
        name: &str,
        raw: Option<&str>,
        constraints: &Constraints<T>,
    ) -> Result<()> {
        let coerced = match raw {
            None => Some(T::zero()),
            Some(text) => T::from_text(text),
        };

        let Some(value) = coerced else {
            // Keep the raw text so the option still shows up in the result.
            let text = raw.unwrap_or_default();
            self.report(TypeMismatch::new(display, text, T::TYPE).to_string())?;
            if let Some(allowed) = &constraints.allowed_values {
                self.report(invalid_value(display, text, allowed))?;
            }
            self.result.set(name, Value::from(text));
            return Ok(());
        };

        if let Some(validator) = &constraints.validator {
            if !validator.check(&value) {
                let custom = constraints
                    .validation_error
                    .as_ref()
                    .map(|m| m.render(&value))
                    .filter(|m| !m.is_empty());
                let message = custom.unwrap_or_else(|| {
                    format!("In option \"{display}\": Failed user data validation for \"{value}\".")
                });
                self.report(message)?;
            }
        }

        if let Some(allowed) = &constraints.allowed_values {
            if !allowed.contains(&value) {
                self.report(invalid_value(display, &value.to_string(), allowed))?;
            }
        }

        self.result.set(name, value.into_value());
        Ok(())
    }

    /// Fills in defaults and reports missing required options.
    fn finish(mut self) -> Result<ParseResult> {
        let schema = self.schema;
        for (name, config) in schema.options() {
            if self.result.contains(name) {
                continue;
            }
            if config.required {
                self.report(format!("Missing required option \"--{name}\"."))?;
            } else if let Some(default) = config.default_value() {
                self.result.set(name, default);
            }
        }

        debug!(
            values = self.result.values.len(),
            non_options = self.result.non_options.len(),
            errors = self.result.errors.len(),
            "Parsed arguments"
        );
        Ok(self.result)
    }
}

fn invalid_value<T: OptionValue>(display: &str, value: &str, allowed: &[T]) -> String {
    let allowed: Vec<serde_json::Value> = allowed
        .iter()
        .map(|v| v.clone().into_value().to_json())
        .collect();
    format!(
        "In option \"{display}\": Invalid value \"{value}\". Allowed values are {}.",
        serde_json::Value::Array(allowed)
    )
}
