//! Classify raw link targets and resolve local ones to filesystem paths.

use std::borrow::Cow;
use std::path::Path;

use regex::Regex;

use crate::config::RemapRule;
use crate::error::Error;
use crate::types::ResolvedTarget;

/// `http://` or `https://`; scheme tokens are case-sensitive.
const EXTERNAL_SCHEME_PATTERN: &str = r"^https*://";

/// What a raw link target turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link<'a> {
    /// Network location; never checked on disk.
    External(&'a str),
    /// Project-local file, possibly with a fragment.
    Local(ResolvedTarget),
}

/// Splits, remaps and joins raw link targets.
#[derive(Debug)]
pub struct PathResolver {
    /// Compiled [`EXTERNAL_SCHEME_PATTERN`].
    external: Regex,
    /// Active rewrite rules; empty when remapping is off.
    rules: Vec<RemapRule>,
}

impl PathResolver {
    /// Classify `raw` as found in `source`, whose containing directory is `source_dir`.
    ///
    /// External targets stop here. Local targets are split on the first `#`;
    /// an empty path part means the link points back into `source`.
    pub fn classify<'a>(&self, raw: &'a str, source_dir: &Path, source: &Path) -> Link<'a> {
        if self.external.is_match(raw) {
            return Link::External(raw);
        }

        let (path_part, fragment) = raw.split_once('#').unwrap_or((raw, ""));

        if path_part.is_empty() {
            return Link::Local(ResolvedTarget {
                fragment: fragment.to_string(),
                is_self_reference: true,
                path: source.to_path_buf(),
            });
        }

        let rewritten = self.rewrite(path_part);
        return Link::Local(ResolvedTarget {
            fragment: fragment.to_string(),
            is_self_reference: false,
            path: source_dir.join(rewritten.as_ref()),
        });
    }

    /// Build a resolver with the given rewrite rules (empty disables remapping).
    ///
    /// # Errors
    ///
    /// Returns `Error::Regex` if the scheme pattern fails to compile.
    pub fn new(rules: Vec<RemapRule>) -> Result<Self, Error> {
        return Ok(Self {
            external: Regex::new(EXTERNAL_SCHEME_PATTERN)?,
            rules,
        });
    }

    /// Apply the first rule whose `from` prefixes `path_part`. At most one rewrite.
    /// Depends only on `path_part` and the rule set, never on the referring document.
    pub fn rewrite<'a>(&self, path_part: &'a str) -> Cow<'a, str> {
        for rule in &self.rules {
            if let Some(rest) = path_part.strip_prefix(rule.from.as_str()) {
                return Cow::Owned(format!("{}{rest}", rule.to));
            }
        }
        return Cow::Borrowed(path_part);
    }
}
