//! Per-document link checking: extract, classify, verify, report.

use std::borrow::Cow;
use std::path::Path;

use crate::anchor::{self, AnchorMatch};
use crate::error::Error;
use crate::extract::LinkExtractor;
use crate::report::Reporter;
use crate::resolver::{Link, PathResolver};
use crate::types::{Diagnostic, DiagnosticKind, ExternalLink, ResolvedTarget, posix_display};

/// Checks one document at a time. Holds only compiled patterns and options.
#[derive(Debug)]
pub struct Checker {
    /// What to do with external links.
    external: ExternalMode,
    /// First-link-per-line extractor.
    extractor: LinkExtractor,
    /// Target classification and remapping.
    resolver: PathResolver,
}

/// How external links are handled during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalMode {
    /// Skip them without output.
    Ignore,
    /// Announce each one as a diagnostic while scanning.
    Inline,
    /// Collect them for the sorted end-of-run summary.
    Summary,
}

impl Checker {
    /// Check a single local link found at `file:line`.
    /// `content` is the text of `file`, used when the link points back into it.
    fn check_local_link(
        file: &Path,
        line: u32,
        content: &str,
        target: &ResolvedTarget,
        reporter: &mut dyn Reporter,
    ) -> Result<(), Error> {
        // Self-references resolve to the open document; no existence check.
        if !target.is_self_reference && !target.path.exists() {
            reporter.diagnostic(&Diagnostic {
                file: file.to_path_buf(),
                kind: DiagnosticKind::TargetNotFound { target: target.path.clone() },
                line,
            });
            return Ok(());
        }

        if target.fragment.is_empty() {
            return Ok(());
        }

        let text: Cow<'_, str> = if target.is_self_reference {
            Cow::Borrowed(content)
        } else {
            match std::fs::read_to_string(&target.path) {
                Err(source) => {
                    reporter.scan_error(&Error::ReadDocument { path: target.path.clone(), source });
                    return Ok(());
                },
                Ok(text) => Cow::Owned(text),
            }
        };

        let kind = match anchor::resolve(&text, &target.fragment)? {
            AnchorMatch::Found => return Ok(()),
            AnchorMatch::Missing if target.is_self_reference => DiagnosticKind::AnchorNotFound {
                anchor: target.fragment.clone(),
            },
            AnchorMatch::Missing => DiagnosticKind::AnchorNotFoundInTarget {
                anchor: target.fragment.clone(),
                target: target.path.clone(),
            },
            AnchorMatch::Unquoted { line: anchor_line } => {
                reporter.diagnostic(&Diagnostic {
                    file: target.path.clone(),
                    kind: DiagnosticKind::AnchorNotQuoted { anchor: target.fragment.clone() },
                    line: anchor_line,
                });
                return Ok(());
            },
        };

        reporter.diagnostic(&Diagnostic {
            file: file.to_path_buf(),
            kind,
            line,
        });
        return Ok(());
    }

    /// Check every line of `content`, the text of document `file`.
    /// Returns the external links collected in [`ExternalMode::Summary`].
    ///
    /// # Errors
    ///
    /// Returns `Error::Regex` if an anchor pattern fails to compile.
    pub fn check_content(
        &self,
        file: &Path,
        content: &str,
        reporter: &mut dyn Reporter,
    ) -> Result<Vec<ExternalLink>, Error> {
        let source_dir = file.parent().unwrap_or_else(|| return Path::new(""));
        let mut external = Vec::new();

        for (idx, raw_line) in content.lines().enumerate() {
            let line = u32::try_from(idx).unwrap_or(u32::MAX).saturating_add(1);
            let Some(raw_target) = self.extractor.extract(raw_line.trim()) else {
                continue;
            };

            match self.resolver.classify(raw_target, source_dir, file) {
                Link::External(url) => self.handle_external(file, line, url, &mut external, reporter),
                Link::Local(target) => Self::check_local_link(file, line, content, &target, reporter)?,
            }
        }

        return Ok(external);
    }

    /// Read `file` and check it.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReadDocument` if the file cannot be read as UTF-8 text,
    /// or `Error::Regex` if an anchor pattern fails to compile.
    pub fn check_document(&self, file: &Path, reporter: &mut dyn Reporter) -> Result<Vec<ExternalLink>, Error> {
        let content = std::fs::read_to_string(file).map_err(|source| {
            return Error::ReadDocument { path: file.to_path_buf(), source };
        })?;
        return self.check_content(file, &content, reporter);
    }

    /// Collect, announce or drop one external link according to the mode.
    fn handle_external(
        &self,
        file: &Path,
        line: u32,
        url: &str,
        collected: &mut Vec<ExternalLink>,
        reporter: &mut dyn Reporter,
    ) {
        match self.external {
            ExternalMode::Ignore => {},
            ExternalMode::Inline => reporter.diagnostic(&Diagnostic {
                file: file.to_path_buf(),
                kind: DiagnosticKind::ExternalLink { url: url.to_string() },
                line,
            }),
            ExternalMode::Summary => collected.push(ExternalLink {
                file: posix_display(file),
                line,
                url: url.to_string(),
            }),
        }
        return;
    }

    /// Build a checker.
    ///
    /// # Errors
    ///
    /// Returns `Error::Regex` if the link or scheme pattern fails to compile.
    pub fn new(resolver: PathResolver, external: ExternalMode) -> Result<Self, Error> {
        return Ok(Self {
            external,
            extractor: LinkExtractor::new()?,
            resolver,
        });
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use std::fs;

    use super::*;
    use crate::config::parse_remap_rule;
    use crate::report::CollectingReporter;

    fn checker(external: ExternalMode) -> Checker {
        return Checker::new(PathResolver::new(Vec::new()).unwrap(), external).unwrap();
    }

    /// Write `content` to `name` under `dir` and return its path.
    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        return path;
    }

    #[test]
    fn document_without_links_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(dir.path(), "a.md", "# Title\n\nNo links (really) [here].\n");
        let mut reporter = CollectingReporter::default();
        let external = checker(ExternalMode::Summary).check_document(&doc, &mut reporter).unwrap();
        assert!(reporter.diagnostics.is_empty());
        assert!(external.is_empty());
    }

    #[test]
    fn existing_target_without_fragment_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.md", "# B\n");
        let doc = write(dir.path(), "a.md", "See [b](b.md).\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();
        assert!(reporter.diagnostics.is_empty());
    }

    #[test]
    fn missing_target_is_reported_once_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(dir.path(), "a.md", "intro\n  [x](missing.md#sec)  \n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();

        assert_eq!(reporter.diagnostics.len(), 1);
        let message = &reporter.diagnostics[0];
        assert!(message.contains(":2: Target file not found"), "{message}");
        assert!(message.contains(&posix_display(&dir.path().join("missing.md"))), "{message}");
        assert!(!message.contains("Anchor"), "{message}");
    }

    #[test]
    fn parent_step_through_a_missing_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.md", "# B\n");
        let doc = write(dir.path(), "a.md", "[x](nope/../b.md)\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();

        let expected = format!(
            "{}:1: Target file not found: '{}'",
            posix_display(&doc),
            posix_display(&dir.path().join("nope/../b.md"))
        );
        assert_eq!(reporter.diagnostics, vec![expected]);
    }

    #[test]
    fn unquoted_anchor_warning_uses_the_joined_target_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sub/other.md", "<a name=sec></a>\n");
        let doc = write(dir.path(), "a.md", "[x](sub/./other.md#sec)\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();

        let expected = format!(
            "{}:1: Anchor name is not quoted: 'sec'",
            posix_display(&dir.path().join("sub/./other.md"))
        );
        assert_eq!(reporter.diagnostics, vec![expected]);
    }

    #[test]
    fn local_heading_anchor_matches_case_insensitively() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(dir.path(), "a.md", "[x](#section-one)\n\n## Section One\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();
        assert!(reporter.diagnostics.is_empty(), "{:?}", reporter.diagnostics);
    }

    #[test]
    fn missing_local_anchor_does_not_mention_a_target_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(dir.path(), "a.md", "# Top\n[x](#missing-anchor)\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();

        assert_eq!(reporter.diagnostics.len(), 1);
        let message = &reporter.diagnostics[0];
        assert!(message.ends_with(":2: Anchor not found: 'missing-anchor'"), "{message}");
        assert!(!message.contains("target file"), "{message}");
    }

    #[test]
    fn missing_cross_document_anchor_names_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let other = write(dir.path(), "other.md", "# Other\n");
        let doc = write(dir.path(), "a.md", "[x](other.md#nowhere)\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();

        let expected = format!(
            "{}:1: Anchor not found in target file '{}': 'nowhere'",
            posix_display(&doc),
            posix_display(&other)
        );
        assert_eq!(reporter.diagnostics, vec![expected]);
    }

    #[test]
    fn unquoted_anchor_is_a_style_warning_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "other.md", "# Other\n\n<a name=sec></a>\n");
        let doc = write(dir.path(), "a.md", "[x](other.md#sec)\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();

        assert_eq!(reporter.diagnostics.len(), 1);
        let message = &reporter.diagnostics[0];
        assert!(message.contains("not quoted"), "{message}");
        assert!(message.contains("other.md:3:"), "{message}");
        assert!(!message.contains("Anchor not found"), "{message}");
    }

    #[test]
    fn quoted_anchor_is_accepted_silently() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "other.md", "<a name=\"sec\"></a>\n");
        let doc = write(dir.path(), "a.md", "[x](other.md#sec)\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();
        assert!(reporter.diagnostics.is_empty());
    }

    #[test]
    fn external_links_follow_the_mode() {
        let dir = tempfile::tempdir().unwrap();
        let doc = write(dir.path(), "a.md", "[x](http://example.com)\n");

        let mut ignored = CollectingReporter::default();
        let collected = checker(ExternalMode::Ignore).check_document(&doc, &mut ignored).unwrap();
        assert!(ignored.diagnostics.is_empty());
        assert!(collected.is_empty());

        let mut summary = CollectingReporter::default();
        let collected = checker(ExternalMode::Summary).check_document(&doc, &mut summary).unwrap();
        assert!(summary.diagnostics.is_empty());
        assert_eq!(collected, vec![ExternalLink {
            file: posix_display(&doc),
            line: 1,
            url: "http://example.com".to_string(),
        }]);

        let mut inline = CollectingReporter::default();
        let collected = checker(ExternalMode::Inline).check_document(&doc, &mut inline).unwrap();
        assert!(collected.is_empty());
        assert_eq!(inline.diagnostics.len(), 1);
        assert!(inline.diagnostics[0].ends_with(":1: Not checking external link: http://example.com"));
    }

    #[test]
    fn only_the_first_link_on_a_line_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.md", "");
        let doc = write(dir.path(), "a.md", "[ok](b.md) then [broken](nope.md)\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();
        assert!(reporter.diagnostics.is_empty());
    }

    #[test]
    fn remapped_links_resolve_through_the_rules() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "de/src/guide.md", "# Guide\n");
        let doc = write(dir.path(), "book/chapter/page.md", "[g](../guide.md#guide)\n");

        let mut plain = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut plain).unwrap();
        assert_eq!(plain.diagnostics.len(), 1);

        let rules = vec![parse_remap_rule("../=../../de/src/").unwrap()];
        let remapping = Checker::new(PathResolver::new(rules).unwrap(), ExternalMode::Ignore).unwrap();
        let mut remapped = CollectingReporter::default();
        remapping.check_document(&doc, &mut remapped).unwrap();
        assert!(remapped.diagnostics.is_empty(), "{:?}", remapped.diagnostics);
    }

    #[test]
    fn unreadable_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut reporter = CollectingReporter::default();
        let result = checker(ExternalMode::Ignore).check_document(&dir.path().join("gone.md"), &mut reporter);
        assert!(matches!(result, Err(Error::ReadDocument { .. })));
    }

    #[test]
    fn anchor_in_a_directory_target_is_a_scan_error_not_a_crash() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let doc = write(dir.path(), "a.md", "[x](sub#part)\n");
        let mut reporter = CollectingReporter::default();
        checker(ExternalMode::Ignore).check_document(&doc, &mut reporter).unwrap();
        assert!(reporter.diagnostics.is_empty());
        assert_eq!(reporter.errors.len(), 1);
    }
}
