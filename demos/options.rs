//! Every option field and parser switch in one schema.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p parse-args-demos --example options -- -s=ab --num=2.5 -i=3 -b
//! cargo run -p parse-args-demos --example options -- --int=2000 --what
//! cargo run -p parse-args-demos --example options -- --help
//! ```
//!
//! Argument errors are printed as they occur and also returned in the
//! result under `errors`.

use parse_args_core::{ArgsParser, OptionConfig, Schema, SchemaError};

fn schema() -> Result<Schema, SchemaError> {
    Schema::builder()
        .option(
            "str",
            // A required option cannot declare a default.
            OptionConfig::string()
                .alias('s')
                .required()
                .description("This is a string option.")
                .validator(|v| (2..=10).contains(&v.len()))
                .validation_error("The string you gave is either too long or too short!")
                .allowed_values(["ab", "bc", "cd"]),
        )
        .option(
            "num",
            OptionConfig::number()
                .alias('n')
                .default_value(1.5)
                .description(
                    "This is a number option. Number values can be either integers or \
                     floating point numbers.",
                )
                .validator(|v| v.fract() != 0.0)
                .validation_error_with(|v| format!("The given number \"{v}\" is not a float!"))
                .allowed_values([1.5, 2.5, 3.5]),
        )
        .option(
            "int",
            OptionConfig::integer()
                .alias('i')
                .description(
                    "This is an integer option. Integer options check that the specified \
                     value is not a floating point number.",
                )
                .validator(|v| *v <= 1000)
                .validation_error_with(|v| {
                    format!("The specified value ({v}) cannot be more than 1000.")
                })
                .allowed_values([1, 2, 3]),
        )
        .option(
            "boo",
            OptionConfig::boolean()
                .alias('b')
                .default_value(false)
                .description(
                    "This is a boolean option. Valid values are \"true\", \"false\", \"1\" \
                     (true) and \"0\" (false).",
                ),
        )
        .throw_on_errors(false)
        .return_errors(true)
        .verbose(true)
        .keep_all(false)
        .flag_unknowns(true)
        .ignore_unknowns(true)
        .help(true)
        .help_template("\nUsage: options <options>\n\n{OPTIONS}\n")
        .build()
}

fn main() {
    let schema = match schema() {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let parser = ArgsParser::new(schema).with_output_printer(|text: &str| eprintln!("{text}"));
    match parser.parse_env() {
        Ok(args) => println!("args = {}", args.to_json()),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
