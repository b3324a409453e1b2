//! Schema-driven command-line argument parsing.
//!
//! This crate turns an argument vector into a typed result according to a
//! declared option schema:
//!
//! - [`Schema`]: validated, immutable option declarations plus parser
//!   switches, built with [`SchemaBuilder`] or loaded from a JSON/YAML
//!   document ([`Schema::from_value`], [`Schema::load`]).
//! - [`OptionConfig`]: a single option with its alias, required flag,
//!   description and the type-specific [`Constraints`] carried by
//!   [`OptionKind`].
//! - [`parse_args`]: tokenizes argv (`--long[=v]`, `-abc`, `-s=v`, `--`),
//!   coerces values, runs validators and allowed-value checks, then fills
//!   in defaults. Produces a [`ParseResult`].
//! - [`help_text`]: renders the aligned, wrapped option list inside the
//!   schema's help template.
//!
//! Argument errors are thrown ([`Error::Aborted`]), collected into
//! [`ParseResult::errors`], printed to an [`OutputSink`], or silently
//! dropped, depending on the schema switches. Schema errors are always
//! fatal and surface from [`SchemaBuilder::build`] as [`SchemaError`].
//!
//! # Example
//!
//! ```
//! use parse_args_core::*;
//!
//! let schema = Schema::builder()
//!     .option("all", OptionConfig::boolean().alias('a').description("show all"))
//!     .option("depth", OptionConfig::integer().alias('d').default_value(1))
//!     .option("sort", OptionConfig::string().allowed_values(["name", "size"]))
//!     .return_errors(true)
//!     .build()
//!     .unwrap();
//!
//! let result = parse_args(["node", "ls.js", "-a", "--sort=time", "src"], &schema).unwrap();
//!
//! assert_eq!(result.get_bool("all"), Some(true));
//! assert_eq!(result.get_i64("depth"), Some(1));
//! assert_eq!(result.non_options, vec!["src"]);
//! assert_eq!(
//!     result.errors,
//!     vec![r#"In option "--sort": Invalid value "time". Allowed values are ["name","size"]."#]
//! );
//! ```

mod args_parser;
mod coerce;
mod declaration;
mod error;
mod help;
mod output;
mod parser;
mod result;
mod schema;
mod settings;
mod types;
mod validate;

pub use args_parser::ArgsParser;
pub use coerce::{OptionValue, TypeMismatch, coerce};
pub use error::{Error, Result, SchemaError};
pub use help::{DEFAULT_HELP_TEMPLATE, OPTIONS_PLACEHOLDER, help_text, print_help, render_options};
pub use output::{CaptureSink, OUTPUT_PREFIX, OutputSink, StdoutSink};
pub use parser::{parse_args, parse_args_with, parse_env_args, parse_env_args_with};
pub use result::ParseResult;
pub use schema::{HELP_ALIAS, HELP_DESCRIPTION, HELP_OPTION, Schema, SchemaBuilder};
pub use settings::ParseSettings;
pub use types::*;
pub use validate::RESERVED_OPTION_NAMES;
