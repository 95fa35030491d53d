use std::path::Path;

use crate::error::Error;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".mdlinkcheck.toml";

/// Project configuration loaded from `.mdlinkcheck.toml`.
/// Include/exclude patterns are path prefixes applied to markdown files,
/// relative to the scan root they were found under.
#[derive(Debug)]
pub struct Config {
    /// Path prefixes excluded from scanning.
    exclude: Vec<String>,
    /// Recognized document extensions, without the dot.
    extensions: Vec<String>,
    /// Path prefixes to scan; empty means everything.
    include: Vec<String>,
    /// Ordered prefix-rewrite rules for the remapped output layout.
    remap: Vec<RemapRule>,
}

/// One prefix rewrite: a path part starting with `from` has that prefix replaced by `to`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RemapRule {
    /// Prefix matched against the link's path part.
    pub from: String,
    /// Replacement for the matched prefix.
    pub to: String,
}

/// Raw TOML structure for `.mdlinkcheck.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct MdlinkcheckTomlConfig {
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::extensions`].
    #[serde(default = "default_extensions")]
    extensions: Vec<String>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// See [`Config::remap`].
    #[serde(default)]
    remap: Vec<RemapRule>,
}

impl Config {
    /// Whether a file extension names a markdown document.
    pub fn is_document_extension(&self, ext: &str) -> bool {
        return self.extensions.iter().any(|e| return e == ext);
    }

    /// Load config from an explicit path, or from `.mdlinkcheck.toml` in `root`.
    /// A missing default file yields defaults; a missing explicit file is an
    /// error. A file that exists but is malformed is always an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` for a missing explicit file,
    /// `Error::Io` if reading fails, or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, Error> {
        let path = explicit.map_or_else(|| return root.join(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if explicit.is_some() {
                    return Err(Error::ConfigNotFound { path });
                }
                return Ok(Self::scan_everything_by_default());
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        return Self::parse(&content);
    }

    /// Parse config from TOML content.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: MdlinkcheckTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            exclude: raw.exclude,
            extensions: raw.extensions,
            include: raw.include,
            remap: raw.remap,
        });
    }

    /// Remap rules to use for this run: command-line rules first, then configured ones.
    /// Empty when remapping is disabled.
    pub fn remap_rules(&self, enabled: bool, extra: &[RemapRule]) -> Vec<RemapRule> {
        if !enabled {
            return Vec::new();
        }
        return extra.iter().chain(&self.remap).cloned().collect();
    }

    /// Default config: every markdown file, standard extensions, no remapping.
    fn scan_everything_by_default() -> Self {
        return Self {
            exclude: Vec::new(),
            extensions: default_extensions(),
            include: Vec::new(),
            remap: Vec::new(),
        };
    }

    /// Check whether a markdown file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

/// Extensions recognized when the config does not list any.
fn default_extensions() -> Vec<String> {
    return ["md", "mkd", "markdown"].iter().map(|e| return (*e).to_string()).collect();
}

/// Parse a `FROM=TO` command-line remap rule. `TO` may be empty.
///
/// # Errors
///
/// Returns `Error::InvalidRemapRule` if there is no `=` or `FROM` is empty.
pub fn parse_remap_rule(input: &str) -> Result<RemapRule, Error> {
    let Some((from, to)) = input.split_once('=') else {
        return Err(Error::InvalidRemapRule { rule: input.to_string() });
    };
    if from.is_empty() {
        return Err(Error::InvalidRemapRule { rule: input.to_string() });
    }
    return Ok(RemapRule {
        from: from.to_string(),
        to: to.to_string(),
    });
}
