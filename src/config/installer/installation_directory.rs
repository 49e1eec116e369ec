//! Default installation directory.

use crate::config::capability::ToolchainCapabilities;
use crate::config::error::{ResolveError, Result};
use crate::config::options::{SymbolicOption, canonicalize, symbolic_option};
use serde::{Deserialize, Serialize};

symbolic_option! {
    /// Base the installation path is relative to.
    pub enum InstallationDirectoryType: "installation directory type" {
        ProgramFilesFolder => "PROGRAM_FILES_FOLDER",
        SystemDrive => "SYSTEM_DRIVE",
        AbsolutePath => "ABSOLUTE_PATH",
        CurrentDirectory => "CURRENT_DIRECTORY",
        UserHome => "USER_HOME",
    }
}

impl InstallationDirectoryType {
    fn is_windows_only(self) -> bool {
        matches!(
            self,
            InstallationDirectoryType::ProgramFilesFolder | InstallationDirectoryType::SystemDrive
        )
    }

    fn is_unix_only(self) -> bool {
        matches!(
            self,
            InstallationDirectoryType::CurrentDirectory | InstallationDirectoryType::UserHome
        )
    }
}

/// Where the installer proposes to install the application.
///
/// # Configuration
///
/// ```toml
/// [package.metadata.bundle.packaging.installer.installation_directory]
/// type = "program-files-folder"
/// path = "MyCompany/MyApp"
/// fixed = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallationDirectory {
    /// Base of `path`.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Default installation path.
    pub path: Option<String>,

    /// Forbid the user from changing the directory.
    pub fixed: bool,
}

impl InstallationDirectory {
    /// Whether any field differs from its default.
    pub fn is_defined(&self) -> bool {
        self.kind.is_some() || self.path.is_some() || self.fixed
    }

    /// Checks that the type exists and is available on the target OS.
    pub fn validate(&mut self, toolchain: &ToolchainCapabilities) -> Result<()> {
        let Some(kind) = canonicalize::<InstallationDirectoryType>(&mut self.kind)? else {
            return Ok(());
        };

        let os = toolchain.target_os();
        let unsupported = if os.is_windows() {
            kind.is_unix_only()
        } else {
            kind.is_windows_only()
        };

        if unsupported {
            return Err(ResolveError::InstallationDirectoryTypeNotSupported {
                kind: kind.as_parameter(),
                os: os.as_parameter(),
            });
        }

        Ok(())
    }
}
