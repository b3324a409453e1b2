//! Reusable parser bound to one schema and one output sink.

use crate::error::Result;
use crate::help::{help_text, print_help};
use crate::output::{OutputSink, StdoutSink};
use crate::parser::{parse_args_with, parse_env_args_with};
use crate::result::ParseResult;
use crate::schema::Schema;

/// A parser that owns its schema and printer.
///
/// Replacing the printer only affects this instance; other parsers and the
/// free functions keep printing to their own sinks.
///
/// # Examples
///
/// ```
/// use parse_args_core::{ArgsParser, CaptureSink, OptionConfig, Schema};
///
/// let schema = Schema::builder()
///     .option("name", OptionConfig::string().alias('n'))
///     .help(true)
///     .build()
///     .unwrap();
///
/// let sink = CaptureSink::new();
/// let parser = ArgsParser::new(schema).with_output_printer(sink.clone());
///
/// let result = parser.parse(["node", "app", "-n=x", "-?"]).unwrap();
/// assert_eq!(result.get_str("name"), Some("x"));
/// assert_eq!(sink.messages(), vec![parser.help_text()]);
/// ```
pub struct ArgsParser {
    schema: Schema,
    sink: Box<dyn OutputSink>,
}

impl ArgsParser {
    /// Creates a parser printing to standard output.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            sink: Box::new(StdoutSink),
        }
    }

    pub fn with_output_printer(mut self, sink: impl OutputSink + 'static) -> Self {
        self.set_output_printer(sink);
        self
    }

    /// Replaces the printer used for help text and verbose errors.
    pub fn set_output_printer(&mut self, sink: impl OutputSink + 'static) {
        self.sink = Box::new(sink);
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// See [`crate::parse_args`].
    pub fn parse<I, S>(&self, argv: I) -> Result<ParseResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        parse_args_with(argv, &self.schema, self.sink.as_ref())
    }

    /// See [`crate::parse_env_args`].
    pub fn parse_env(&self) -> Result<ParseResult> {
        parse_env_args_with(&self.schema, self.sink.as_ref())
    }

    pub fn help_text(&self) -> String {
        help_text(&self.schema)
    }

    pub fn print_help(&self) {
        print_help(&self.schema, self.sink.as_ref());
    }
}

impl std::fmt::Debug for ArgsParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgsParser")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
