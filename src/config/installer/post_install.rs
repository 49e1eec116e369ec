//! Post-install action checkboxes.

use crate::config::error::{ResolveError, Result};
use crate::config::options::{SymbolicOption, canonicalize_or, symbolic_option};
use serde::{Deserialize, Serialize};

symbolic_option! {
    /// Action performed when a post-install checkbox stays checked.
    #[derive(Default)]
    pub enum PostInstallActionType: "post-install action" {
        #[default]
        Run => "RUN",
        Open => "OPEN",
        Restart => "RESTART",
    }
}

fn default_checked() -> bool {
    true
}

/// A checkbox shown on the last installer screen.
///
/// # Configuration
///
/// ```toml
/// [[package.metadata.bundle.packaging.installer.post_install_checkboxes]]
/// type = "open"
/// target = "README.txt"
/// checked = false
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostInstallCheckbox {
    /// `run`, `open` or `restart`.
    ///
    /// Default: `run`
    #[serde(rename = "type")]
    pub action: Option<String>,

    /// File inside the package to run or open; not allowed for `restart`.
    pub target: Option<String>,

    /// Working directory for `run`.
    pub working_directory: Option<String>,

    /// Command-line arguments for `run`.
    pub arguments: Vec<String>,

    /// Initial checkbox state.
    ///
    /// Default: true
    #[serde(default = "default_checked")]
    pub checked: bool,
}

impl Default for PostInstallCheckbox {
    fn default() -> Self {
        Self {
            action: None,
            target: None,
            working_directory: None,
            arguments: Vec::new(),
            checked: default_checked(),
        }
    }
}

impl PostInstallCheckbox {
    /// Validates the field combination allowed for the checkbox type.
    pub fn validate(&mut self) -> Result<()> {
        let action = canonicalize_or(&mut self.action, PostInstallActionType::default())?;
        let not_allowed = |field| ResolveError::CheckboxFieldNotAllowed {
            action: action.as_parameter(),
            field,
        };

        match action {
            PostInstallActionType::Run | PostInstallActionType::Open => {
                if self.target.is_none() {
                    return Err(ResolveError::MissingCheckboxTarget {
                        action: action.as_parameter(),
                    });
                }
            }
            PostInstallActionType::Restart => {
                if self.target.is_some() {
                    return Err(not_allowed("target"));
                }
            }
        }

        if action != PostInstallActionType::Run {
            if self.working_directory.is_some() {
                return Err(not_allowed("working_directory"));
            }
            if !self.arguments.is_empty() {
                return Err(not_allowed("arguments"));
            }
        }

        Ok(())
    }

    /// Parsed action type; meaningful after validation.
    pub fn action(&self) -> PostInstallActionType {
        self.action
            .as_deref()
            .and_then(PostInstallActionType::parse_lenient)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkbox(action: Option<&str>, target: Option<&str>) -> PostInstallCheckbox {
        PostInstallCheckbox {
            action: action.map(String::from),
            target: target.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn run_is_default_and_needs_target() {
        let mut cb = checkbox(None, None);
        match cb.validate().unwrap_err() {
            ResolveError::MissingCheckboxTarget { action } => assert_eq!(action, "run"),
            other => panic!("unexpected error: {other}"),
        }

        let mut cb = checkbox(None, Some("bin/app.exe"));
        cb.validate().unwrap();
        assert_eq!(cb.action.as_deref(), Some("run"));
        assert!(cb.checked);
    }

    #[test]
    fn restart_rejects_target() {
        let mut cb = checkbox(Some("restart"), Some("bin/app.exe"));
        assert!(matches!(
            cb.validate().unwrap_err(),
            ResolveError::CheckboxFieldNotAllowed { field: "target", .. }
        ));

        let mut cb = checkbox(Some("Restart"), None);
        cb.validate().unwrap();
        assert_eq!(cb.action(), PostInstallActionType::Restart);
    }

    #[test]
    fn open_rejects_run_only_fields() {
        let mut cb = checkbox(Some("open"), Some("README.txt"));
        cb.arguments = vec!["-v".into()];
        assert!(matches!(
            cb.validate().unwrap_err(),
            ResolveError::CheckboxFieldNotAllowed {
                field: "arguments",
                ..
            }
        ));

        let mut cb = checkbox(Some("open"), Some("README.txt"));
        cb.working_directory = Some("docs".into());
        assert!(matches!(
            cb.validate().unwrap_err(),
            ResolveError::CheckboxFieldNotAllowed {
                field: "working_directory",
                ..
            }
        ));
    }
}
