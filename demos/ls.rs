//! `ls`-style program with a custom help template.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p parse-args-demos --example ls -- --help
//! ```
//!
//! Prints:
//!
//! ```text
//! Usage: ls <options>
//!
//!   List all your files!
//!
//! Options:
//!
//!   -l, --long        use a long listing format
//!   -u, --accesstime  with -lt: sort by, and show, access time; with -l: show
//!                     access time and sort by name; otherwise: sort by access time
//!   -?, --help        Show the help text.
//!
//! Have fun seeing all your files!
//!
//! args = {"help":true}
//! ```
//!
//! Unknown options are dropped silently.

use parse_args_core::{OptionConfig, Schema, SchemaError, parse_env_args};

const HELP_TEMPLATE: &str = "\nUsage: ls <options>\n\n  List all your files!\n\n\
                             Options:\n\n{OPTIONS}\n\nHave fun seeing all your files!\n";

fn schema() -> Result<Schema, SchemaError> {
    Schema::builder()
        .option(
            "long",
            OptionConfig::boolean()
                .alias('l')
                .description("use a long listing format"),
        )
        .option(
            "accesstime",
            OptionConfig::boolean().alias('u').description(
                "with -lt: sort by, and show, access time; with -l: show access time and \
                 sort by name; otherwise: sort by access time",
            ),
        )
        .help(true)
        .ignore_unknowns(true)
        .help_template(HELP_TEMPLATE)
        .build()
}

fn main() {
    let result = schema()
        .map_err(parse_args_core::Error::from)
        .and_then(|schema| parse_env_args(&schema));

    match result {
        Ok(args) => println!("args = {}", args.to_json()),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
