/// Crate-level error types for mdlinkcheck.
use std::path::PathBuf;

/// All errors in mdlinkcheck carry the path or input that failed, so a scan
/// error printed mid-run still points at the offending file or directory.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An explicitly requested config file does not exist on disk.
    #[error("config not found: {}", path.display())]
    ConfigNotFound {
        /// Path to the missing config file.
        path: PathBuf,
    },

    /// A `--remap-rule` argument is not of the form `FROM=TO`.
    #[error("invalid remap rule `{rule}`: expected FROM=TO with a non-empty FROM")]
    InvalidRemapRule {
        /// The rule exactly as given on the command line.
        rule: String,
    },

    /// Underlying I/O error from the filesystem or stdout.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of the external-link summary failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// A document or anchor target exists but could not be read as text.
    #[error("cannot read {}: {source}", path.display())]
    ReadDocument {
        /// File that could not be read.
        path: PathBuf,
        /// The underlying read failure.
        source: std::io::Error,
    },

    /// A link or anchor pattern failed to compile.
    #[error("regex: {0}")]
    Regex(
        /// The wrapped regex error.
        #[from]
        regex::Error,
    ),

    /// A scan root is missing, or is a directory that cannot be listed.
    #[error("cannot open root {}: {source}", path.display())]
    RootUnavailable {
        /// The root path as given.
        path: PathBuf,
        /// Why the root could not be opened.
        source: std::io::Error,
    },

    /// TOML deserialization of the config file failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// A directory entry could not be listed during the walk.
    #[error("walk: {0}")]
    Walk(
        /// The wrapped walkdir error, which names the failing path.
        #[from]
        walkdir::Error,
    ),
}
