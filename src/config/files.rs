//! File references and convention-based defaults.
//!
//! A file-valued field is either set explicitly (the path must exist), or
//! left unset, in which case a fixed file name under the project resource
//! directory is adopted if it is present on disk.

use super::error::{ResolveError, Result};
use super::options::{SymbolicOption, symbolic_option};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolves a file field against its conventional default.
///
/// - explicit and existing: kept as is
/// - explicit and missing: [`ResolveError::FileNotFound`], never the convention
/// - unset: `base_dir/conventional_name` if it exists, otherwise unset
pub fn resolve_with_convention(
    field: &str,
    explicit: Option<PathBuf>,
    base_dir: &Path,
    conventional_name: &str,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return if path.exists() {
            Ok(Some(path))
        } else {
            Err(ResolveError::FileNotFound {
                field: field.to_string(),
                path,
            })
        };
    }

    let conventional = base_dir.join(conventional_name);
    if conventional.exists() {
        log::info!("Using {} by convention: {}", field, conventional.display());
        Ok(Some(conventional))
    } else {
        log::debug!("No {} found at {}", field, conventional.display());
        Ok(None)
    }
}

symbolic_option! {
    /// Kind of filesystem entry a [`PackageFile`] points to.
    #[derive(Default)]
    pub enum PackageFileType: "package file type" {
        #[default]
        Auto => "AUTO",
        File => "FILE",
        Folder => "FOLDER",
    }
}

/// A file or folder placed into the package.
///
/// `path` is the location on the build machine. `package_path` is the folder
/// inside the package; when only `package_path` is set the entry is expected
/// to be in the package already.
///
/// # Configuration
///
/// ```toml
/// [package.metadata.bundle.packaging.installer.uninstall_callback]
/// path = "native/uninstall.dll"
/// package_path = "bin"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageFile {
    /// Entry kind: `auto`, `file` or `folder`.
    ///
    /// Default: `auto`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,

    /// Source location on the build machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Destination folder inside the package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_path: Option<String>,
}

impl PackageFile {
    /// Creates a package file pointing at `path`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Whether the user configured anything for this entry.
    pub fn is_defined(&self) -> bool {
        self.path.is_some() || self.package_path.is_some()
    }

    /// Validates the entry, reporting problems against `field`.
    ///
    /// The type is rewritten in canonical form.
    pub fn validate(&mut self, field: &str) -> Result<()> {
        let file_type = super::options::canonicalize_or(&mut self.file_type, PackageFileType::Auto)?;

        let Some(path) = &self.path else {
            return Ok(());
        };

        if !path.exists() {
            return Err(ResolveError::FileNotFound {
                field: field.to_string(),
                path: path.clone(),
            });
        }

        let mismatch = match file_type {
            PackageFileType::File => path.is_dir(),
            PackageFileType::Folder => !path.is_dir(),
            PackageFileType::Auto => false,
        };
        if mismatch {
            return Err(ResolveError::WrongFileType {
                field: field.to_string(),
                path: path.clone(),
                expected: file_type.as_parameter(),
            });
        }

        Ok(())
    }

    /// Validates the entry as a regular file.
    pub fn validate_file(&mut self, field: &str) -> Result<()> {
        self.file_type = Some(PackageFileType::File.as_parameter());
        self.validate(field)
    }
}
