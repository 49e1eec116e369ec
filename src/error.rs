//! Crate-level error types.
//!
//! Library resolution failures are [`ResolveError`]s; this module wraps them
//! together with manifest and CLI failures for the binary.

use crate::config::ResolveError;
use thiserror::Error;

/// Result type alias for manifest loading and CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type of the crate
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration resolution errors
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Project descriptor lacks a required entry
    #[error("Missing '{field}' in {manifest}")]
    MissingManifestField {
        /// Field name, e.g. `package.version`
        field: String,
        /// Manifest path
        manifest: String,
    },
}

impl Error {
    /// Stable message key of the failure.
    pub fn message_key(&self) -> &'static str {
        match self {
            Error::Resolve(err) => err.key(),
            Error::Cli(CliError::InvalidArguments { .. }) => "cli.invalid-arguments",
            Error::Cli(CliError::MissingManifestField { .. }) => "manifest.missing-field",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::Toml(_) => "manifest.parse",
            Error::Anyhow(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_errors_keep_their_key() {
        let err: Error = ResolveError::MissingShortcutTarget.into();
        assert_eq!(err.message_key(), "installer.shortcut.target-not-set");
        assert_eq!(err.to_string(), "shortcut target is not set");
    }

    #[test]
    fn toml_errors_are_manifest_errors() {
        let err: Error = toml::from_str::<toml::Value>("[package")
            .unwrap_err()
            .into();
        assert_eq!(err.message_key(), "manifest.parse");
    }
}
