//! Native installer configuration.
//!
//! [`InstallerConfig`] is the raw tree collected from the project descriptor.
//! [`InstallerResolver`] turns it into a [`ResolvedInstaller`]: conventional
//! files filled in, capability tiers checked, every nested entry validated
//! and the EULA encoding matched to a backend flag.
//!
//! # Module Organization
//!
//! - `resolve` - the resolution pipeline
//! - `after_install` - executable run after installation
//! - `file_association` - extension associations
//! - `installation_directory` - default installation directory
//! - `post_install` - post-install checkboxes
//! - `shortcut` - shortcuts

mod after_install;
mod file_association;
mod installation_directory;
mod post_install;
mod resolve;
mod shortcut;

pub use after_install::AfterInstallRunnable;
pub use file_association::FileAssociation;
pub use installation_directory::{InstallationDirectory, InstallationDirectoryType};
pub use post_install::{PostInstallActionType, PostInstallCheckbox};
pub use resolve::{InstallerResolver, ResolvedInstaller, Stage};
pub use shortcut::{Shortcut, ShortcutLocation};

use super::files::PackageFile;
use super::options::symbolic_option;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

symbolic_option! {
    /// Language forced on the installer screens.
    pub enum SetupLanguage: "setup language" {
        Autodetect => "AUTODETECT",
        English => "ENGLISH",
        French => "FRENCH",
        German => "GERMAN",
        Japanese => "JAPANESE",
        Russian => "RUSSIAN",
        Polish => "POLISH",
        Spanish => "SPANISH",
        Italian => "ITALIAN",
        Brazilian => "BRAZILIAN",
    }
}

symbolic_option! {
    /// Compression applied to packaged files.
    pub enum CompressionLevel: "compression level" {
        Fast => "FAST",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

/// Installer configuration as supplied by the user.
///
/// File fields left unset are filled from the project resource directory
/// when the conventional file exists (see [`InstallerResolver`]).
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle.packaging.installer]
/// eula = "legal/eula.txt"
/// eula_encoding = "autodetect"
/// language = "german"
/// compression_level = "high"
/// cleanup_after_uninstall = true
/// registry_key = "MyCompany/MyApp"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    // === License ===
    /// End-user license agreement shown during installation.
    ///
    /// Plain text, US-ASCII or UTF-16LE.
    ///
    /// Default: `eula.txt` in the resource directory, if present
    pub eula: Option<PathBuf>,

    /// Encoding of `eula`: `us-ascii`, `utf-16le` or `autodetect`.
    ///
    /// With `autodetect` the byte order mark decides.
    ///
    /// Default: `autodetect`
    pub eula_encoding: Option<String>,

    // === Appearance ===
    /// (Windows) Splash screen image in BMP format.
    ///
    /// Default: `installerSplash.bmp` in the resource directory, if present
    pub installer_splash: Option<PathBuf>,

    /// Forced setup language.
    ///
    /// Default: None (chosen from the target system locale)
    pub language: Option<String>,

    /// (Windows) First screen image of the install wizard, 177×314 pixels.
    ///
    /// Default: `welcomeImage.bmp` in the resource directory, if present
    pub welcome_image: Option<PathBuf>,

    /// (Windows) Corner image of later wizard screens, 109×59 pixels.
    ///
    /// Default: `installerImage.bmp` in the resource directory, if present
    pub installer_image: Option<PathBuf>,

    /// (Windows) First screen image of the uninstall wizard, 177×314 pixels.
    ///
    /// Default: `uninstallerImage.bmp` in the resource directory, if present
    pub uninstaller_image: Option<PathBuf>,

    // === Behavior ===
    /// Remove every file from the installation folder on uninstall.
    ///
    /// Default: false (only files created by the installer are removed)
    pub cleanup_after_uninstall: bool,

    /// Executable started after a successful installation.
    pub after_install_runnable: AfterInstallRunnable,

    /// Compression of packaged files: `fast`, `medium` or `high`.
    ///
    /// Default: None (backend default)
    pub compression_level: Option<String>,

    /// Proposed installation directory.
    pub installation_directory: InstallationDirectory,

    /// (Windows) Registry key used to store update information.
    ///
    /// Default: None (backend derives `vendor/product/version`)
    pub registry_key: Option<String>,

    /// (Windows) Shortcuts to create.
    pub shortcuts: Vec<Shortcut>,

    /// Suppress the default "Start <executable>" post-install action.
    pub no_default_post_install_actions: bool,

    /// Checkboxes shown after installation.
    pub post_install_checkboxes: Vec<PostInstallCheckbox>,

    /// (Windows) File extension associations.
    pub file_associations: Vec<FileAssociation>,

    // === Callbacks ===
    /// Install callback dynamic library.
    ///
    /// Default: `install.dll` / `libinstall.so` in the resource directory, if present
    pub install_callback: Option<PathBuf>,

    /// Uninstall callback dynamic library; must ship inside the package.
    ///
    /// Default: `uninstall.dll` / `libuninstall.so` in the resource directory, if present
    pub uninstall_callback: PackageFile,
}
