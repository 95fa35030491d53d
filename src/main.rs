mod anchor;
mod checker;
mod config;
mod diagnostics;
mod error;
mod extract;
mod report;
mod resolver;
mod scanner;
mod types;

use std::io::IsTerminal as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::checker::{Checker, ExternalMode};
use crate::config::{Config, RemapRule};
use crate::report::StdoutReporter;
use crate::resolver::PathResolver;

#[derive(Parser)]
#[command(name = "mdlinkcheck", version, about = "Check project-internal links in markdown files")]
#[allow(clippy::struct_excessive_bools, reason = "independent CLI flags")]
struct Cli {
    /// Config file [default: .mdlinkcheck.toml in the current directory, if present]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Report external (http/https) links instead of skipping them silently
    #[arg(short, long)]
    external: bool,
    /// How reported external links are shown
    #[arg(long, value_enum, default_value_t = ExternalDisplay::Summary, requires = "external")]
    external_mode: ExternalDisplay,
    /// Print the external link summary as JSON
    #[arg(long, requires = "external")]
    json: bool,
    /// Rewrite link prefixes with the configured remap rules
    #[arg(short, long)]
    remap: bool,
    /// Extra remap rule, applied before configured ones (implies --remap)
    #[arg(long = "remap-rule", value_name = "FROM=TO", value_parser = config::parse_remap_rule)]
    remap_rules: Vec<RemapRule>,
    /// Directories to scan
    #[arg(default_value = ".")]
    roots: Vec<PathBuf>,
    /// Log each directory entered and each file checked
    #[arg(short, long)]
    verbose: bool,
}

/// Command-line choice for reported external links.
#[derive(Clone, Copy, ValueEnum)]
enum ExternalDisplay {
    /// Announce each link while scanning
    Inline,
    /// Collect links into a sorted summary after the scan
    Summary,
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| return EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact()
        .init();
    return;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    return match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
    };
}

/// Load config, scan every root, then print the external-link summary if requested.
/// Diagnostics never affect the exit status; only fatal errors do.
///
/// # Errors
///
/// Returns config, root and summary-output errors.
fn run(cli: &Cli) -> Result<(), error::Error> {
    let config = Config::load(&PathBuf::from("."), cli.config.as_deref())?;
    let remap_enabled = cli.remap || !cli.remap_rules.is_empty();
    let rules = config.remap_rules(remap_enabled, &cli.remap_rules);
    if remap_enabled && rules.is_empty() {
        tracing::warn!("remapping enabled but no remap rules configured; links are checked as written");
    }
    let resolver = PathResolver::new(rules)?;

    let mode = match (cli.external, cli.external_mode) {
        (false, _) => ExternalMode::Ignore,
        (true, ExternalDisplay::Inline) => ExternalMode::Inline,
        (true, ExternalDisplay::Summary) => ExternalMode::Summary,
    };
    let checker = Checker::new(resolver, mode)?;

    let mut reporter = StdoutReporter::default();
    report::print_scan_banner();
    let external = scanner::scan(&cli.roots, &config, &checker, &mut reporter)?;
    report::print_scan_footer();

    tracing::debug!(
        diagnostics = reporter.diagnostics,
        errors = reporter.errors,
        "scan complete"
    );

    if mode == ExternalMode::Summary {
        report::print_external_summary(external, cli.json)?;
    }

    return Ok(());
}
