use crate::config::DEFAULT_CONFIG_FILE;
use crate::error::Error;

/// ANSI bold on.
const BOLD: &str = "\x1b[1m";
/// ANSI attributes off.
const RESET: &str = "\x1b[0m";

/// Render a fatal error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
    return;
}

/// Render a fatal error as a short markdown block: what happened and how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ConfigNotFound { path } => format!(
            "\
# Error: Config Not Found

`{}` does not exist.

## Fix

Pass an existing file to `--config`, or drop the flag to use `{DEFAULT_CONFIG_FILE}` when present.
",
            path.display()
        ),
        Error::InvalidRemapRule { rule } => format!(
            "\
# Error: Invalid Remap Rule

`{rule}` is not a prefix rewrite.

## Fix

Write rules as FROM=TO, for example:

    mdlinkcheck --remap-rule ../=../../de/src/
"
        ),
        Error::RootUnavailable { path, source } => format!(
            "\
# Error: Root Unavailable

`{}` cannot be opened: {source}

## Fix

Check the paths given on the command line. With no paths, the current directory is scanned.
",
            path.display()
        ),
        Error::TomlDe(err) => format!(
            "\
# Error: Invalid Config

{err}

## Fix

Recognized keys are `include`, `exclude`, `extensions` and `[[remap]]` tables with `from` and `to`.
"
        ),
        Error::Io(_) | Error::Json(_) | Error::ReadDocument { .. } | Error::Regex(_) | Error::Walk(_) => {
            format!(
                "\
# Error

{e}
"
            )
        },
    };
}
