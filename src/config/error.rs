//! Resolution errors.
//!
//! Every failure carries a stable message key and its interpolation arguments
//! so integrations can localize the diagnostic. The `Display` form is the
//! English rendering of the same message.

use super::capability::CapabilityTier;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for resolution operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Terminal failure of a resolution pass.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A symbolic option string outside its closed set.
    #[error("invalid {family} '{received}', valid values: {}", .valid_values.join(", "))]
    InvalidOption {
        /// Option family, e.g. "compression level"
        family: &'static str,
        /// The string supplied by the user
        received: String,
        /// External forms of every member of the family
        valid_values: Vec<String>,
    },

    /// An explicitly configured file does not exist.
    #[error("{field}: file {} does not exist", .path.display())]
    FileNotFound {
        /// Configuration field that referenced the file
        field: String,
        /// The missing path
        path: PathBuf,
    },

    /// A configured path exists but has the wrong kind (file vs folder).
    #[error("{field}: {} is not a {expected}", .path.display())]
    WrongFileType {
        /// Configuration field that referenced the path
        field: String,
        /// The offending path
        path: PathBuf,
        /// Expected kind ("file" or "folder")
        expected: String,
    },

    /// Fields were used that the toolchain does not support.
    #[error(
        "{} not supported by this toolchain ({tier} requires {required}): {}",
        parameters_phrase(.names),
        .names.join(", ")
    )]
    UnsupportedParameters {
        /// Capability tier the fields belong to
        tier: CapabilityTier,
        /// Human-readable minimum requirement of the tier
        required: String,
        /// Every violating field, in declaration order
        names: Vec<&'static str>,
    },

    /// The declared EULA encoding differs from the detected one.
    #[error("EULA encoding is declared as {expected}, but the file is {actual}")]
    EncodingMismatch {
        /// Declared encoding
        expected: String,
        /// Detected encoding
        actual: String,
    },

    /// The EULA file starts with a byte order mark the backend cannot read.
    #[error("{}: unsupported encoding ({bom} byte order mark)", .path.display())]
    UnsupportedEncoding {
        /// EULA file
        path: PathBuf,
        /// Name of the detected byte order mark
        bom: &'static str,
    },

    /// File association without an extension.
    #[error("file association extension is not set")]
    MissingExtension,

    /// File association without a target executable.
    #[error("target of the file association for extension '{extension}' is not set")]
    MissingTarget {
        /// Extension of the incomplete association
        extension: String,
    },

    /// Shortcut without a target.
    #[error("shortcut target is not set")]
    MissingShortcutTarget,

    /// Post-install checkbox requiring a target without one.
    #[error("post-install checkbox of type '{action}' requires a target")]
    MissingCheckboxTarget {
        /// Checkbox type
        action: String,
    },

    /// Post-install checkbox field that is meaningless for its type.
    #[error("post-install checkbox of type '{action}' does not accept '{field}'")]
    CheckboxFieldNotAllowed {
        /// Checkbox type
        action: String,
        /// Rejected field
        field: &'static str,
    },

    /// After-install runnable with arguments but no target.
    #[error("after-install runnable target is not set")]
    MissingRunnableTarget,

    /// Installation directory type unavailable on the target OS.
    #[error("installation directory type '{kind}' is not supported on {os}")]
    InstallationDirectoryTypeNotSupported {
        /// Installation directory type
        kind: String,
        /// Target operating system
        os: String,
    },

    /// Packaging kind unavailable on the target OS.
    #[error("packaging '{packaging}' is not supported on {os}")]
    PackagingNotSupported {
        /// Packaging kind
        packaging: String,
        /// Target operating system
        os: String,
    },

    /// A required project context field was not provided.
    #[error("project context is missing {field}")]
    MissingProjectField {
        /// Missing field
        field: &'static str,
    },

    /// Filesystem failure while inspecting a configured file.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Independent violations collected from one stage.
    #[error("{} configuration errors: {}", .0.len(), join_messages(.0))]
    Multiple(Vec<ResolveError>),
}

impl ResolveError {
    /// Collapse a list of errors into one, unwrapping a single entry.
    ///
    /// Callers only pass non-empty lists.
    pub fn multiple(mut errors: Vec<ResolveError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            ResolveError::Multiple(errors)
        }
    }

    /// Stable message key for catalog lookup.
    pub fn key(&self) -> &'static str {
        match self {
            ResolveError::InvalidOption { .. } => "config.invalid-option",
            ResolveError::FileNotFound { .. } => "config.file-not-found",
            ResolveError::WrongFileType { .. } => "config.wrong-file-type",
            ResolveError::UnsupportedParameters { names, .. } if names.len() == 1 => {
                "installer.unsupported-parameter"
            }
            ResolveError::UnsupportedParameters { .. } => "installer.unsupported-parameters",
            ResolveError::EncodingMismatch { .. } => "eula.encoding-mismatch",
            ResolveError::UnsupportedEncoding { .. } => "eula.unsupported-encoding",
            ResolveError::MissingExtension => "installer.file-association.extension-not-set",
            ResolveError::MissingTarget { .. } => "installer.file-association.target-not-set",
            ResolveError::MissingShortcutTarget => "installer.shortcut.target-not-set",
            ResolveError::MissingCheckboxTarget { .. } => "installer.checkbox.target-not-set",
            ResolveError::CheckboxFieldNotAllowed { .. } => "installer.checkbox.field-not-allowed",
            ResolveError::MissingRunnableTarget => "installer.after-install.target-not-set",
            ResolveError::InstallationDirectoryTypeNotSupported { .. } => {
                "installer.installation-directory.unsupported-type"
            }
            ResolveError::PackagingNotSupported { .. } => "packaging.unsupported",
            ResolveError::MissingProjectField { .. } => "project.missing-field",
            ResolveError::Io { .. } => "config.io",
            ResolveError::Multiple(_) => "config.multiple",
        }
    }

    /// Interpolation arguments for the message key, in message order.
    pub fn args(&self) -> Vec<String> {
        match self {
            ResolveError::InvalidOption {
                family,
                received,
                valid_values,
            } => vec![
                family.to_string(),
                received.clone(),
                valid_values.join(", "),
            ],
            ResolveError::FileNotFound { field, path } => {
                vec![field.clone(), path.display().to_string()]
            }
            ResolveError::WrongFileType {
                field,
                path,
                expected,
            } => vec![field.clone(), path.display().to_string(), expected.clone()],
            ResolveError::UnsupportedParameters {
                tier,
                required,
                names,
            } => vec![names.join(","), tier.to_string(), required.clone()],
            ResolveError::EncodingMismatch { expected, actual } => {
                vec![actual.clone(), expected.clone()]
            }
            ResolveError::UnsupportedEncoding { path, bom } => {
                vec![path.display().to_string(), bom.to_string()]
            }
            ResolveError::MissingExtension | ResolveError::MissingShortcutTarget => Vec::new(),
            ResolveError::MissingRunnableTarget => Vec::new(),
            ResolveError::MissingTarget { extension } => vec![extension.clone()],
            ResolveError::MissingCheckboxTarget { action } => vec![action.clone()],
            ResolveError::CheckboxFieldNotAllowed { action, field } => {
                vec![action.clone(), field.to_string()]
            }
            ResolveError::InstallationDirectoryTypeNotSupported { kind, os } => {
                vec![kind.clone(), os.clone()]
            }
            ResolveError::PackagingNotSupported { packaging, os } => {
                vec![packaging.clone(), os.clone()]
            }
            ResolveError::MissingProjectField { field } => vec![field.to_string()],
            ResolveError::Io { path, source } => {
                vec![path.display().to_string(), source.to_string()]
            }
            ResolveError::Multiple(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }

    /// Number of individual violations this error stands for.
    pub fn violation_count(&self) -> usize {
        match self {
            ResolveError::Multiple(errors) => errors.iter().map(Self::violation_count).sum(),
            ResolveError::UnsupportedParameters { names, .. } => names.len(),
            _ => 1,
        }
    }
}

fn parameters_phrase(names: &[&str]) -> &'static str {
    if names.len() == 1 {
        "parameter is"
    } else {
        "parameters are"
    }
}

fn join_messages(errors: &[ResolveError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Run `validate` over every item, reporting all failures in item order.
pub(crate) fn validate_each<T>(
    items: &mut [T],
    mut validate: impl FnMut(&mut T) -> Result<()>,
) -> Result<()> {
    let errors: Vec<ResolveError> = items
        .iter_mut()
        .filter_map(|item| validate(item).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ResolveError::multiple(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_error_is_not_wrapped() {
        let err = ResolveError::multiple(vec![ResolveError::MissingExtension]);
        assert!(matches!(err, ResolveError::MissingExtension));
    }

    #[test]
    fn validate_each_keeps_item_order() {
        let mut items = vec!["a", "ok", "b"];
        let err = validate_each(&mut items, |item| {
            if *item == "ok" {
                Ok(())
            } else {
                Err(ResolveError::MissingTarget {
                    extension: item.to_string(),
                })
            }
        })
        .unwrap_err();

        assert_eq!(err.key(), "config.multiple");
        assert_eq!(err.args(), vec![
            "target of the file association for extension 'a' is not set".to_string(),
            "target of the file association for extension 'b' is not set".to_string(),
        ]);
    }

    #[test]
    fn unsupported_parameter_key_depends_on_count() {
        let one = ResolveError::UnsupportedParameters {
            tier: CapabilityTier::ExtendedInstaller,
            required: "toolchain 11.3 or later".into(),
            names: vec!["registry_key"],
        };
        let two = ResolveError::UnsupportedParameters {
            tier: CapabilityTier::ExtendedInstaller,
            required: "toolchain 11.3 or later".into(),
            names: vec!["cleanup_after_uninstall", "registry_key"],
        };
        assert_eq!(one.key(), "installer.unsupported-parameter");
        assert_eq!(two.key(), "installer.unsupported-parameters");
        assert_eq!(two.args()[0], "cleanup_after_uninstall,registry_key");
        assert_eq!(two.violation_count(), 2);
    }
}
