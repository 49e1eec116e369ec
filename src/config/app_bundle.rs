//! macOS application bundle (.app) settings.

use super::error::Result;
use super::files::resolve_with_convention;
use super::project::ProjectContext;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Conventional bundle icon in the resource directory.
const ICON_FILE: &str = "icon.icns";

/// Environment variable providing the default `developer_id`.
pub const DEVELOPER_ID_ENV: &str = "OSX_DEVELOPER_ID";

/// Environment variable providing the default `publisher_id`.
pub const PUBLISHER_ID_ENV: &str = "OSX_PUBLISHER_ID";

fn default_high_resolution_capable() -> bool {
    true
}

fn default_install_path() -> String {
    "/Applications".to_string()
}

/// macOS application bundle configuration.
///
/// Values end up in the bundle's `Info.plist` and in the `.pkg` installer.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle.packaging.app_bundle]
/// bundle_name = "My App"
/// identifier = "com.example.myapp"
/// high_resolution_capable = true
/// ```
///
/// # Signing
///
/// `developer_id` and `publisher_id` fall back to the `OSX_DEVELOPER_ID` and
/// `OSX_PUBLISHER_ID` environment variables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppBundleConfig {
    /// Bundle file name, without `.app`.
    ///
    /// Default: project output name
    pub file_name: Option<String>,

    /// `CFBundleName`.
    ///
    /// Default: product name
    pub bundle_name: Option<String>,

    /// `CFBundleIdentifier`.
    ///
    /// Default: `<group_id>.<artifact_name>`
    pub identifier: Option<String>,

    /// `CFBundleShortVersionString`.
    ///
    /// Default: the first three numeric components of the project version
    pub short_version: Option<String>,

    /// `CFBundleVersion`.
    ///
    /// Default: project version
    pub version: Option<String>,

    /// `CFBundleIconFile`.
    ///
    /// Default: `icon.icns` in the resource directory, if present
    pub icon: Option<PathBuf>,

    /// `NSHighResolutionCapable`.
    ///
    /// Default: true
    #[serde(default = "default_high_resolution_capable")]
    pub high_resolution_capable: bool,

    /// "Developer ID Application" certificate name used to sign the bundle.
    pub developer_id: Option<String>,

    /// "Developer ID Installer" certificate name used to sign the `.pkg`.
    pub publisher_id: Option<String>,

    /// Default installation path of the `.pkg` installer.
    ///
    /// Default: `/Applications`
    #[serde(default = "default_install_path")]
    pub install_path: String,
}

impl Default for AppBundleConfig {
    fn default() -> Self {
        Self {
            file_name: None,
            bundle_name: None,
            identifier: None,
            short_version: None,
            version: None,
            icon: None,
            high_resolution_capable: default_high_resolution_capable(),
            developer_id: None,
            publisher_id: None,
            install_path: default_install_path(),
        }
    }
}

impl AppBundleConfig {
    /// Fills unset fields from the project, reading signing identities from
    /// the process environment.
    pub fn resolve(self, project: &ProjectContext) -> Result<Self> {
        self.resolve_with_env(project, |key| std::env::var(key).ok())
    }

    /// Like [`AppBundleConfig::resolve`] with an explicit environment lookup.
    pub fn resolve_with_env(
        mut self,
        project: &ProjectContext,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        self.file_name
            .get_or_insert_with(|| project.output_name().to_string());
        self.bundle_name
            .get_or_insert_with(|| project.product().to_string());
        self.identifier.get_or_insert_with(|| match project.group_id() {
            Some(group) => format!("{}.{}", group, project.artifact_name()),
            None => project.artifact_name().to_string(),
        });

        self.icon = resolve_with_convention(
            "app_bundle.icon",
            self.icon.take(),
            project.resources_dir(),
            ICON_FILE,
        )?;

        self.version
            .get_or_insert_with(|| project.version().to_string());
        self.short_version
            .get_or_insert_with(|| short_version(project.version()));

        if self.developer_id.is_none() {
            self.developer_id = env(DEVELOPER_ID_ENV);
        }
        if self.publisher_id.is_none() {
            self.publisher_id = env(PUBLISHER_ID_ENV);
        }

        log::debug!(
            "App bundle {} ({})",
            self.file_name.as_deref().unwrap_or_default(),
            self.identifier.as_deref().unwrap_or_default()
        );

        Ok(self)
    }
}

/// Leading numeric components of `version`, at most three.
///
/// `1.2.3.4` becomes `1.2.3` and `2.0-beta` becomes `2.0`. A version without
/// any numeric prefix is returned unchanged.
pub fn short_version(version: &str) -> String {
    let mut parts = Vec::new();
    for component in version.split('.').take(3) {
        let digits: String = component
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            break;
        }
        let truncated = digits.len() < component.len();
        parts.push(digits);
        if truncated {
            break;
        }
    }

    if parts.is_empty() {
        version.to_string()
    } else {
        parts.join(".")
    }
}
