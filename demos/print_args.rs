//! Prints the parsed command-line arguments as JSON.
//!
//! With an empty schema every option is accepted and stored as given.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p parse-args-demos --example print_args -- --long -a -bcd --format=%s file1 file2
//! # args = {"long":true,"a":true,"b":true,"c":true,"d":true,"format":"%s","nonOptions":["file1","file2"]}
//! ```

use parse_args_core::{Schema, parse_env_args};

fn main() {
    match parse_env_args(&Schema::default()) {
        Ok(args) => println!("args = {}", args.to_json()),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
