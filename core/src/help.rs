//! Help text rendering.
//!
//! Each option renders as one entry:
//!
//! ```text
//!   -c, --ctime       with -lt: sort by, and show, ctime (time of last
//!                     modification of file status information)
//!   --format=...      across -x, commas -m
//! ```
//!
//! Descriptions start at column 20 and wrap at column 80. Headers that
//! reach column 19 push the description to the next line.

use crate::output::OutputSink;
use crate::schema::Schema;
use crate::types::OptionConfig;

/// Template used when the schema does not set one.
pub const DEFAULT_HELP_TEMPLATE: &str = "\nOptions:\n\n";

/// Placeholder replaced by the rendered option list.
pub const OPTIONS_PLACEHOLDER: &str = "{OPTIONS}";

const DESCRIPTION_INDENT: usize = 20;
const HELP_MAX_COLUMN: usize = 80;
const DESCRIPTION_WIDTH: usize = HELP_MAX_COLUMN - DESCRIPTION_INDENT;

/// Renders the full help text, applying the schema's help template.
///
/// A template containing `{OPTIONS}` has its first placeholder replaced by
/// the option list; any other template is prepended to the list as is.
///
/// # Examples
///
/// ```
/// use parse_args_core::{OptionConfig, Schema, help_text};
///
/// let schema = Schema::builder()
///     .option("all", OptionConfig::boolean().alias('a').description("show all"))
///     .help_template("Usage: ls [options]\n{OPTIONS}\n")
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     help_text(&schema),
///     "Usage: ls [options]\n  -a, --all         show all\n"
/// );
/// ```
pub fn help_text(schema: &Schema) -> String {
    let template = schema
        .settings()
        .help_template
        .as_deref()
        .unwrap_or(DEFAULT_HELP_TEMPLATE);
    apply_template(template, &render_options(schema))
}

/// Renders the help text to `sink`.
pub fn print_help(schema: &Schema, sink: &dyn OutputSink) {
    sink.print(&help_text(schema));
}

/// Renders the option list without any template.
pub fn render_options(schema: &Schema) -> String {
    schema
        .options()
        .map(|(name, config)| option_entry(name, config))
        .collect::<Vec<_>>()
        .join("\n")
}

fn apply_template(template: &str, options: &str) -> String {
    if template.contains(OPTIONS_PLACEHOLDER) {
        template.replacen(OPTIONS_PLACEHOLDER, options, 1)
    } else {
        format!("{template}{options}")
    }
}

fn option_entry(name: &str, config: &OptionConfig) -> String {
    let mut out = String::from("  ");
    if let Some(alias) = config.alias {
        out.push_str(&format!("-{alias}, "));
    }
    out.push_str(&format!("--{name}"));
    if config.required {
        out.push_str("=...");
    }

    let Some(mut desc) = config.description.as_deref().filter(|d| !d.is_empty()) else {
        return out;
    };

    let header_width = out.chars().count();
    if header_width >= DESCRIPTION_INDENT - 1 {
        out.push('\n');
        out.push_str(&" ".repeat(DESCRIPTION_INDENT));
    } else {
        out.push_str(&" ".repeat(DESCRIPTION_INDENT - header_width));
    }

    let (line, rest) = split_line(desc, DESCRIPTION_WIDTH);
    out.push_str(line);
    desc = rest;

    while !desc.is_empty() {
        let (line, rest) = split_line(desc, DESCRIPTION_WIDTH);
        out.push('\n');
        out.push_str(&" ".repeat(DESCRIPTION_INDENT));
        out.push_str(line);
        desc = rest;
    }

    out
}

/// Splits off the first line of at most `width` characters.
///
/// Breaks at the last space before `width` (dropping the space), or hard
/// breaks at `width` when there is none.
fn split_line(s: &str, width: usize) -> (&str, &str) {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    if chars.len() <= width {
        return (s, "");
    }

    if let Some(&(idx, _)) = chars[..width].iter().rev().find(|(_, c)| *c == ' ') {
        return (&s[..idx], &s[idx + 1..]);
    }

    let idx = chars[width].0;
    (&s[..idx], &s[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line_breaks_at_last_space() {
        assert_eq!(split_line("aaa bbb ccc", 9), ("aaa bbb", "ccc"));
        assert_eq!(split_line("short", 9), ("short", ""));
        assert_eq!(split_line("abcdefghij", 4), ("abcd", "efghij"));
    }

    #[test]
    fn test_split_line_ignores_space_at_width() {
        // The space sits exactly at index `width`, so the break falls back
        // to the previous space.
        assert_eq!(split_line("ab cd ef", 5), ("ab", "cd ef"));
    }

    #[test]
    fn test_split_line_counts_chars_not_bytes() {
        assert_eq!(split_line("ééé ééé", 5), ("ééé", "ééé"));
    }

    #[test]
    fn test_apply_template() {
        assert_eq!(apply_template("A{OPTIONS}B", "x"), "AxB");
        assert_eq!(apply_template("{OPTIONS}{OPTIONS}", "x"), "x{OPTIONS}");
        assert_eq!(apply_template("Head:", "x"), "Head:x");
        assert_eq!(apply_template(DEFAULT_HELP_TEMPLATE, "x"), "\nOptions:\n\nx");
    }

    #[test]
    fn test_option_entry_layout() {
        let plain: OptionConfig = OptionConfig::boolean().into();
        assert_eq!(option_entry("flag", &plain), "  --flag");

        let required: OptionConfig = OptionConfig::string().required().description("X").into();
        assert_eq!(option_entry("format", &required), "  --format=...      X");

        let wide: OptionConfig = OptionConfig::string()
            .alias('w')
            .required()
            .description("wide")
            .into();
        assert_eq!(
            option_entry("width-limit", &wide),
            format!("  -w, --width-limit=...\n{}wide", " ".repeat(20))
        );
    }

    #[test]
    fn test_header_of_eighteen_columns_stays_inline() {
        let config: OptionConfig = OptionConfig::boolean().description("d").into();
        // "  --" + 14 chars = 18 columns.
        let entry = option_entry("abcdefghijklmn", &config);
        assert_eq!(entry, "  --abcdefghijklmn  d");
    }
}
