//! Executable run once installation completes.

use crate::config::error::{ResolveError, Result};
use serde::{Deserialize, Serialize};

/// An executable from the package started after a successful install.
///
/// # Configuration
///
/// ```toml
/// [package.metadata.bundle.packaging.installer.after_install_runnable]
/// target = "bin/setup-wizard.exe"
/// arguments = ["--first-run"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AfterInstallRunnable {
    /// Location of the executable inside the package.
    pub target: Option<String>,

    /// Command-line arguments.
    pub arguments: Vec<String>,
}

impl AfterInstallRunnable {
    /// Whether the user configured the runnable at all.
    pub fn is_defined(&self) -> bool {
        self.target.is_some() || !self.arguments.is_empty()
    }

    /// Requires a target once anything is configured.
    pub fn validate(&self) -> Result<()> {
        if self.target.is_none() {
            return Err(ResolveError::MissingRunnableTarget);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_without_target_fail() {
        let runnable = AfterInstallRunnable {
            target: None,
            arguments: vec!["--first-run".into()],
        };
        assert!(runnable.is_defined());
        assert!(matches!(
            runnable.validate().unwrap_err(),
            ResolveError::MissingRunnableTarget
        ));
    }

    #[test]
    fn empty_runnable_is_undefined() {
        assert!(!AfterInstallRunnable::default().is_defined());
    }
}
