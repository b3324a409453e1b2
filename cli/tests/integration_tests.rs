use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_parse-args");

/// Schema with every option type, help enabled and errors collected.
const LS_SCHEMA: &str = r#"
long:
  alias: l
  description: Use a long listing format.
width:
  type: integer
  alias: w
  defaultValue: 80
sort:
  type: string
  allowedValues: [name, size, time]
_help: true
_returnErrors: true
"#;

fn write_schema(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write schema");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .output()
        .expect("failed to run parse-args")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_flat_json() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "ls.yaml", LS_SCHEMA);

    let output = run(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--",
        "-l",
        "--sort=size",
        "src",
    ]);

    assert!(output.status.success(), "parse should succeed");
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "long": true, "sort": "size", "width": 80, "nonOptions": ["src"] })
    );
}

#[test]
fn parse_reports_collected_errors_in_json() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "ls.yaml", LS_SCHEMA);

    let output = run(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--",
        "-w=wide",
    ]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(
        json["errors"],
        serde_json::json!(["In option \"-w\" with value \"wide\": Value is not an integer."])
    );
}

#[test]
fn parse_help_option_prints_help_to_stderr() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "ls.yaml", LS_SCHEMA);

    let output = run(&["parse", "--schema", schema.to_str().unwrap(), "--", "-?"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("  -l, --long        Use a long listing format."));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["help"], serde_json::json!(true));
}

#[test]
fn parse_fails_when_throw_on_errors_is_set() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(
        &dir,
        "strict.json",
        r#"{ "name": { "type": "string", "required": true }, "_throwOnErrors": true }"#,
    );

    let output = run(&["parse", "--schema", schema.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing required option \"--name\"."), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

#[test]
fn help_prints_rendered_options() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "ls.yaml", LS_SCHEMA);

    let output = run(&["help", "--schema", schema.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "\nOptions:\n\n\
         \x20 -l, --long        Use a long listing format.\n\
         \x20 -w, --width\n\
         \x20 --sort\n\
         \x20 -?, --help        Show the help text.\n"
    );
}

#[test]
fn help_flag_still_describes_the_binary() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("parse"), "stdout: {out}");
    assert!(out.contains("validate"), "stdout: {out}");
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_valid_schemas() {
    let dir = TempDir::new().unwrap();
    let yaml = write_schema(&dir, "ls.yaml", LS_SCHEMA);
    let json = write_schema(&dir, "empty.json", "{}");

    let output = run(&[
        "validate",
        "--schema",
        yaml.to_str().unwrap(),
        json.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains(&format!("ok {}", yaml.display())));
    assert!(out.contains("Validated 2 schema file(s)."));
}

#[test]
fn validate_rejects_required_with_default() {
    let dir = TempDir::new().unwrap();
    let bad = write_schema(
        &dir,
        "bad.json",
        r#"{ "num": { "type": "number", "required": true, "defaultValue": 1 } }"#,
    );

    let output = run(&["validate", "--schema", bad.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("\"required\" cannot be set when \"defaultValue\" is set."),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("1 of 1 schema file(s) failed validation"));
}

#[test]
fn validate_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let toml = write_schema(&dir, "schema.toml", "");

    let output = run(&["validate", "--schema", toml.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported schema file format"));
}
