//! (Windows) Shortcuts created by the installer.

use crate::config::error::{ResolveError, Result};
use crate::config::files::PackageFile;
use crate::config::options::{SymbolicOption, canonicalize_or, symbolic_option};
use serde::{Deserialize, Serialize};
use std::path::Path;

symbolic_option! {
    /// Where a shortcut is placed.
    #[derive(Default)]
    pub enum ShortcutLocation: "shortcut location" {
        #[default]
        ProgramFolder => "PROGRAM_FOLDER",
        Desktop => "DESKTOP",
        StartMenu => "START_MENU",
        Startup => "STARTUP",
    }
}

/// A shortcut to a file in the package.
///
/// # Configuration
///
/// ```toml
/// [[package.metadata.bundle.packaging.installer.shortcuts]]
/// location = "desktop"
/// target = "bin/myapp.exe"
/// name = "My App"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shortcut {
    /// `program-folder`, `desktop`, `start-menu` or `startup`.
    ///
    /// Default: `program-folder`
    pub location: Option<String>,

    /// Location of the shortcut target inside the package.
    pub target: Option<String>,

    /// Shortcut name.
    ///
    /// Default: file stem of `target`
    pub name: Option<String>,

    /// Shortcut icon.
    pub icon: PackageFile,

    /// Working directory inside the package.
    pub working_directory: Option<String>,

    /// Command-line arguments passed to the target.
    pub arguments: Vec<String>,
}

impl Shortcut {
    /// Validates the shortcut and fills the location and name defaults.
    pub fn validate(&mut self) -> Result<()> {
        let target = self
            .target
            .clone()
            .ok_or(ResolveError::MissingShortcutTarget)?;

        canonicalize_or(&mut self.location, ShortcutLocation::default())?;

        if self.name.is_none() {
            let stem = Path::new(&target)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| target.clone());
            self.name = Some(stem);
        }

        self.icon.validate_file(&format!("shortcuts[{target}].icon"))
    }

    /// Parsed location; meaningful after validation.
    pub fn location(&self) -> ShortcutLocation {
        self.location
            .as_deref()
            .and_then(ShortcutLocation::parse_lenient)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_is_required() {
        let mut shortcut = Shortcut::default();
        assert!(matches!(
            shortcut.validate().unwrap_err(),
            ResolveError::MissingShortcutTarget
        ));
    }

    #[test]
    fn defaults_are_filled() {
        let mut shortcut = Shortcut {
            target: Some("bin/my-app.exe".into()),
            ..Default::default()
        };
        shortcut.validate().unwrap();
        assert_eq!(shortcut.location.as_deref(), Some("program-folder"));
        assert_eq!(shortcut.name.as_deref(), Some("my-app"));
        assert_eq!(shortcut.location(), ShortcutLocation::ProgramFolder);
    }

    #[test]
    fn location_is_canonicalized() {
        let mut shortcut = Shortcut {
            target: Some("bin/app.exe".into()),
            location: Some("START_MENU".into()),
            ..Default::default()
        };
        shortcut.validate().unwrap();
        assert_eq!(shortcut.location.as_deref(), Some("start-menu"));
    }

    #[test]
    fn unknown_location_is_rejected() {
        let mut shortcut = Shortcut {
            target: Some("bin/app.exe".into()),
            location: Some("taskbar".into()),
            ..Default::default()
        };
        assert_eq!(shortcut.validate().unwrap_err().key(), "config.invalid-option");
    }
}
