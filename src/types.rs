/// Core domain types: resolved link targets, external link records, diagnostics.
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// One line of checker output, located at `file:line`.
/// Emitted immediately; nothing keeps diagnostics around after printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// File the diagnostic points at.
    pub file: PathBuf,
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// One-based line number in `file`.
    pub line: u32,
}

/// The reasons a link can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Fragment missing from the document that contains the link.
    AnchorNotFound {
        /// Fragment text after `#`.
        anchor: String,
    },
    /// Fragment missing from another document.
    AnchorNotFoundInTarget {
        /// Fragment text after `#`.
        anchor: String,
        /// The document that was searched.
        target: PathBuf,
    },
    /// `<a name=...>` without quotes. Counted as found, reported as a style problem.
    AnchorNotQuoted {
        /// Fragment text after `#`.
        anchor: String,
    },
    /// External link announced inline instead of collected for the summary.
    ExternalLink {
        /// The URL exactly as written.
        url: String,
    },
    /// The link's path does not exist on disk.
    TargetNotFound {
        /// The resolved filesystem path.
        target: PathBuf,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = posix_display(&self.file);
        let line = self.line;
        return match &self.kind {
            DiagnosticKind::AnchorNotFound { anchor } => {
                write!(f, "{file}:{line}: Anchor not found: '{anchor}'")
            },
            DiagnosticKind::AnchorNotFoundInTarget { anchor, target } => write!(
                f,
                "{file}:{line}: Anchor not found in target file '{}': '{anchor}'",
                posix_display(target)
            ),
            DiagnosticKind::AnchorNotQuoted { anchor } => {
                write!(f, "{file}:{line}: Anchor name is not quoted: '{anchor}'")
            },
            DiagnosticKind::ExternalLink { url } => {
                write!(f, "{file}:{line}: Not checking external link: {url}")
            },
            DiagnosticKind::TargetNotFound { target } => write!(
                f,
                "{file}:{line}: Target file not found: '{}'",
                posix_display(target)
            ),
        };
    }
}

/// An external link collected for the end-of-run summary.
/// Field order is the sort order: file, then line, then URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    /// Referring document, forward-slash separated.
    pub file: String,
    /// One-based line number of the link.
    pub line: u32,
    /// The URL exactly as written.
    pub url: String,
}

impl Ord for ExternalLink {
    /// Compare records by (file, line, url) for a stable summary.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        return (&self.file, self.line, &self.url).cmp(&(&other.file, other.line, &other.url));
    }
}

impl PartialOrd for ExternalLink {
    /// Delegate to `Ord` implementation.
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        return Some(self.cmp(other));
    }
}

impl fmt::Display for ExternalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}:{}: {}", self.file, self.line, self.url);
    }
}

/// A project-local link after fragment splitting and path resolution.
/// When `is_self_reference` is set, `path` is the referring document itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Text after the first `#`, empty when there is none.
    pub fragment: String,
    /// True only when the raw target had no path part (`#anchor`).
    pub is_self_reference: bool,
    /// Filesystem path the link points at.
    pub path: PathBuf,
}

/// Render a path with `/` separators regardless of host platform.
pub fn posix_display(path: &Path) -> String {
    let shown = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        return shown.into_owned();
    }
    return shown.replace(std::path::MAIN_SEPARATOR, "/");
}
