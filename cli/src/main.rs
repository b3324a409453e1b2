use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use parse_args_core::{Schema, help_text, parse_args_with};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "parse-args")]
#[command(version, about = "Parse command-line arguments against a JSON or YAML option schema")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Log parser internals to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse arguments and print the result as JSON.
    Parse(ParseArgs),
    /// Print the help text generated from a schema.
    Help(HelpArgs),
    /// Validate one or more schema files.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema file (.json, .yaml or .yml).
    #[arg(long)]
    schema: PathBuf,
    /// Pretty-print the JSON result.
    #[arg(long)]
    pretty: bool,
    /// Arguments to parse, given after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Schema file (.json, .yaml or .yml).
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema files to validate.
    #[arg(long = "schema", required = true, num_args = 1..)]
    schemas: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Help(args) => run_help(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn load_schema(path: &Path) -> Result<Schema, String> {
    Schema::load(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    // The arguments after `--` carry no program or script path.
    let schema = load_schema(&args.schema)?
        .to_builder()
        .keep_all(true)
        .build()
        .map_err(|err| err.to_string())?;

    let stderr = |text: &str| eprintln!("{text}");
    let result = parse_args_with(args.args, &schema, &stderr).map_err(|err| err.to_string())?;

    let json = result.to_json();
    let raw = if args.pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
    .map_err(|err| format!("Failed to serialize parse result: {err}"))?;
    println!("{raw}");

    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let schema = load_schema(&args.schema)?;
    println!("{}", help_text(&schema));
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = 0;

    for path in &args.schemas {
        match Schema::load(path) {
            Ok(schema) => {
                debug!(path = %path.display(), options = schema.len(), "Schema is valid");
                println!("ok {}", path.display());
            }
            Err(err) => {
                failures += 1;
                eprintln!("{}: {err}", path.display());
            }
        }
    }

    if failures > 0 {
        return Err(format!(
            "{failures} of {} schema file(s) failed validation",
            args.schemas.len()
        ));
    }

    println!("Validated {} schema file(s).", args.schemas.len());
    Ok(())
}
