//! First-match extraction of inline markdown link targets.
//!
//! Only the first `[label](target)` on a line is seen. Lines with several
//! links are under-reported; reference-style links and links split across
//! lines are not recognized at all.

use regex::Regex;

use crate::error::Error;

/// Non-greedy label followed immediately by a non-greedy parenthesized target.
const INLINE_LINK_PATTERN: &str = r"\[.*?\]\((.*?)\)";

/// Pulls the target out of the first inline link on a line.
#[derive(Debug)]
pub struct LinkExtractor {
    /// Compiled [`INLINE_LINK_PATTERN`].
    pattern: Regex,
}

impl LinkExtractor {
    /// Return the target of the first inline link on `line`, if any.
    /// No escaping rules apply; this is a plain first-match heuristic.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        return self.pattern.captures(line)?.get(1).map(|m| return m.as_str());
    }

    /// Compile the link pattern.
    ///
    /// # Errors
    ///
    /// Returns `Error::Regex` if the pattern fails to compile.
    pub fn new() -> Result<Self, Error> {
        return Ok(Self {
            pattern: Regex::new(INLINE_LINK_PATTERN)?,
        });
    }
}
