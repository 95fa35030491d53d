//! Output: per-link diagnostics, scan errors, banners and the external-link summary.

use crate::error::Error;
use crate::types::{Diagnostic, ExternalLink};

/// Receives findings as the walk produces them.
pub trait Reporter {
    /// A broken link, missing anchor, style warning or inline external link.
    fn diagnostic(&mut self, diagnostic: &Diagnostic);
    /// A directory or document that could not be read. Scanning continues.
    fn scan_error(&mut self, error: &Error);
}

/// Prints every finding to stdout as soon as it arrives.
#[derive(Debug, Default)]
pub struct StdoutReporter {
    /// Diagnostics printed so far.
    pub diagnostics: usize,
    /// Scan errors printed so far.
    pub errors: usize,
}

impl Reporter for StdoutReporter {
    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics = self.diagnostics.saturating_add(1);
        println!("{diagnostic}");
    }

    fn scan_error(&mut self, error: &Error) {
        self.errors = self.errors.saturating_add(1);
        println!("error: {error}");
    }
}

/// Print the external-link summary: sorted, deduplicated, plain or JSON.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn print_external_summary(links: Vec<ExternalLink>, json: bool) -> Result<(), Error> {
    let links = sorted_summary(links);
    if json {
        println!("{}", serde_json::to_string_pretty(&links)?);
        return Ok(());
    }

    println!("*** External links ***");
    for link in &links {
        println!("{link}");
    }
    println!();
    return Ok(());
}

/// Banner printed before any document is checked.
pub fn print_scan_banner() {
    println!();
    println!("*** Check project-internal links ***");
    return;
}

/// Trailer printed after the walk.
pub fn print_scan_footer() {
    println!();
    return;
}

/// Sort by (file, line, url) and drop repeats from overlapping roots.
fn sorted_summary(mut links: Vec<ExternalLink>) -> Vec<ExternalLink> {
    links.sort();
    links.dedup();
    return links;
}

/// Records findings as display strings.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectingReporter {
    /// Rendered diagnostics, in arrival order.
    pub diagnostics: Vec<String>,
    /// Rendered scan errors, in arrival order.
    pub errors: Vec<String>,
}

#[cfg(test)]
impl Reporter for CollectingReporter {
    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.to_string());
    }

    fn scan_error(&mut self, error: &Error) {
        self.errors.push(error.to_string());
    }
}
