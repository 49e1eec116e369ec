//! Project context supplied by the build-tool integration.

use super::error::{ResolveError, Result};
use super::options::symbolic_option;
use std::path::{Path, PathBuf};

symbolic_option! {
    /// Operating system the packaged application targets.
    pub enum TargetOs: "target OS" {
        Windows => "WINDOWS",
        Linux => "LINUX",
        MacOs => "MACOS",
    }
}

impl TargetOs {
    /// Operating system this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else if cfg!(target_os = "macos") {
            TargetOs::MacOs
        } else {
            TargetOs::Linux
        }
    }

    /// Whether the target is Windows.
    pub fn is_windows(self) -> bool {
        self == TargetOs::Windows
    }

    /// Platform file name of a dynamic library called `name`.
    ///
    /// `install` becomes `install.dll`, `libinstall.dylib` or `libinstall.so`.
    pub fn mangle_dll_name(self, name: &str) -> String {
        match self {
            TargetOs::Windows => format!("{name}.dll"),
            TargetOs::MacOs => format!("lib{name}.dylib"),
            TargetOs::Linux => format!("lib{name}.so"),
        }
    }
}

/// Project-level facts the resolver needs but does not own.
///
/// Constructed via [`ProjectContextBuilder`].
#[derive(Clone, Debug)]
pub struct ProjectContext {
    /// Directory holding conventional packaging resources (`eula.txt`, images, callbacks).
    resources_dir: PathBuf,

    /// Product name displayed to users.
    product: String,

    /// Vendor (company) name.
    vendor: Option<String>,

    /// Product version string.
    version: String,

    /// Reverse-domain group of the project, e.g. `com.example`.
    group_id: Option<String>,

    /// Artifact (crate) name.
    artifact_name: String,

    /// Base name of the produced executable or bundle.
    output_name: String,
}

impl ProjectContext {
    /// Returns the packaging resource directory.
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Returns the product name.
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Returns the vendor name.
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    /// Returns the version string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the group identifier.
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    /// Returns the artifact name.
    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    /// Returns the output name.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Path of a conventional resource file.
    pub fn resource(&self, file_name: &str) -> PathBuf {
        self.resources_dir.join(file_name)
    }
}

/// Builder for [`ProjectContext`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_config::config::ProjectContextBuilder;
///
/// # fn example() -> kodegen_bundler_config::config::Result<()> {
/// let project = ProjectContextBuilder::new()
///     .resources_dir("assets/bundle")
///     .product("MyApp")
///     .version("1.0.0")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ProjectContextBuilder {
    resources_dir: Option<PathBuf>,
    product: Option<String>,
    vendor: Option<String>,
    version: Option<String>,
    group_id: Option<String>,
    artifact_name: Option<String>,
    output_name: Option<String>,
}

impl ProjectContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the packaging resource directory.
    ///
    /// # Required
    pub fn resources_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.resources_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the product name.
    ///
    /// # Required
    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    /// Sets the vendor name.
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Sets the version string.
    ///
    /// # Required
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the group identifier.
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Sets the artifact name.
    ///
    /// Default: the product name
    pub fn artifact_name(mut self, artifact_name: impl Into<String>) -> Self {
        self.artifact_name = Some(artifact_name.into());
        self
    }

    /// Sets the output name.
    ///
    /// Default: the artifact name
    pub fn output_name(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = Some(output_name.into());
        self
    }

    /// Builds the context.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MissingProjectField`] if `resources_dir`,
    /// `product` or `version` is missing.
    pub fn build(self) -> Result<ProjectContext> {
        let resources_dir = self
            .resources_dir
            .ok_or(ResolveError::MissingProjectField {
                field: "resources_dir",
            })?;
        let product = self
            .product
            .ok_or(ResolveError::MissingProjectField { field: "product" })?;
        let version = self
            .version
            .ok_or(ResolveError::MissingProjectField { field: "version" })?;
        let artifact_name = self.artifact_name.unwrap_or_else(|| product.clone());
        let output_name = self.output_name.unwrap_or_else(|| artifact_name.clone());

        Ok(ProjectContext {
            resources_dir,
            product,
            vendor: self.vendor,
            version,
            group_id: self.group_id,
            artifact_name,
            output_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dll_names_are_platform_mangled() {
        assert_eq!(TargetOs::Windows.mangle_dll_name("install"), "install.dll");
        assert_eq!(TargetOs::Linux.mangle_dll_name("install"), "libinstall.so");
        assert_eq!(
            TargetOs::MacOs.mangle_dll_name("uninstall"),
            "libuninstall.dylib"
        );
    }

    #[test]
    fn builder_requires_core_fields() {
        let err = ProjectContextBuilder::new()
            .product("MyApp")
            .version("1.0")
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MissingProjectField {
                field: "resources_dir"
            }
        ));
    }

    #[test]
    fn builder_derives_names() {
        let project = ProjectContextBuilder::new()
            .resources_dir("res")
            .product("MyApp")
            .version("1.0")
            .build()
            .unwrap();
        assert_eq!(project.artifact_name(), "MyApp");
        assert_eq!(project.output_name(), "MyApp");
        assert_eq!(project.resource("eula.txt"), Path::new("res").join("eula.txt"));
    }
}
