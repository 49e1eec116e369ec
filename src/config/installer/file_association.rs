//! (Windows) File extension associations.

use crate::config::error::{ResolveError, Result};
use crate::config::files::PackageFile;
use serde::{Deserialize, Serialize};

fn default_checked() -> bool {
    true
}

/// Associates a file name extension with an executable in the package.
///
/// # Configuration
///
/// ```toml
/// [[package.metadata.bundle.packaging.installer.file_associations]]
/// extension = "myscript"
/// target = "bin/myapp.exe"
/// description = "MyApp script"
/// arguments = ["--open"]
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAssociation {
    /// Extension without the leading dot, e.g. `myscript`.
    pub extension: Option<String>,

    /// File type description shown by the OS, e.g. "MP3 Format Sound".
    ///
    /// Default: empty string
    pub description: Option<String>,

    /// Location of the associated executable inside the package.
    pub target: Option<String>,

    /// Text used in the "Associate *.ext files with ..." prompt.
    ///
    /// Default: empty string
    pub target_description: Option<String>,

    /// Icon for files with this extension.
    ///
    /// Default: the icon of the target executable
    pub icon: PackageFile,

    /// Command-line arguments passed to the target.
    pub arguments: Vec<String>,

    /// Initial state of the association checkbox.
    ///
    /// Default: true
    #[serde(default = "default_checked")]
    pub checked: bool,
}

impl Default for FileAssociation {
    fn default() -> Self {
        Self {
            extension: None,
            description: None,
            target: None,
            target_description: None,
            icon: PackageFile::default(),
            arguments: Vec::new(),
            checked: default_checked(),
        }
    }
}

impl FileAssociation {
    /// Validates the association and fills empty descriptions.
    pub fn validate(&mut self) -> Result<()> {
        let extension = self
            .extension
            .clone()
            .ok_or(ResolveError::MissingExtension)?;

        if self.target.is_none() {
            return Err(ResolveError::MissingTarget { extension });
        }

        self.icon
            .validate_file(&format!("file_associations[{extension}].icon"))?;

        self.description.get_or_insert_with(String::new);
        self.target_description.get_or_insert_with(String::new);

        Ok(())
    }
}
