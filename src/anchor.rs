//! Decide whether a fragment is satisfied by an `<a name>` tag or a heading.

use regex::{Regex, RegexBuilder};

use crate::error::Error;

/// Outcome of looking a fragment up in a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMatch {
    /// A quoted `<a name="...">` or a matching heading exists.
    Found,
    /// Neither form exists.
    Missing,
    /// Only satisfied by `<a name=...>` without quotes, at this one-based line.
    Unquoted {
        /// Line of the first unquoted anchor tag.
        line: u32,
    },
}

/// Build the heading pattern body: `-` in the fragment matches a dash, space
/// or tab in the heading, so `section-one` matches `Section One`.
fn heading_text_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len().saturating_mul(2));
    let mut buf = [0_u8; 4];
    for ch in fragment.chars() {
        if ch == '-' {
            pattern.push_str(r"[- \t]");
        } else {
            pattern.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
        }
    }
    return pattern;
}

/// Case-insensitive, line-anchored heading pattern for `fragment`.
///
/// # Errors
///
/// Returns `Error::Regex` if the pattern fails to compile.
fn heading_regex(fragment: &str) -> Result<Regex, Error> {
    return Ok(RegexBuilder::new(&format!(r"^#+[ \t]+{}", heading_text_pattern(fragment)))
        .case_insensitive(true)
        .multi_line(true)
        .build()?);
}

/// One-based line number of a byte offset in `text`.
fn line_of_offset(text: &str, offset: usize) -> u32 {
    let newlines = text.get(..offset).map_or(0, |before| return before.matches('\n').count());
    return u32::try_from(newlines).unwrap_or(u32::MAX).saturating_add(1);
}

/// Look `fragment` up in `text`.
///
/// `<a name>` tags must carry the fragment exactly; headings match it
/// case-insensitively. An unquoted anchor tag wins over every other form
/// so the style problem surfaces even when a heading would also match.
///
/// # Errors
///
/// Returns `Error::Regex` if a lookup pattern fails to compile.
pub fn resolve(text: &str, fragment: &str) -> Result<AnchorMatch, Error> {
    let name = regex::escape(fragment);

    let unquoted = Regex::new(&format!(r#"<a\s+name\s*=\s*{name}(?:[\s/>]|$)"#))?;
    if let Some(m) = unquoted.find(text) {
        return Ok(AnchorMatch::Unquoted {
            line: line_of_offset(text, m.start()),
        });
    }

    let quoted = Regex::new(&format!(r#"<a\s+name\s*=\s*"{name}""#))?;
    let heading = heading_regex(fragment)?;
    if quoted.is_match(text) || heading.is_match(text) {
        return Ok(AnchorMatch::Found);
    }

    return Ok(AnchorMatch::Missing);
}
