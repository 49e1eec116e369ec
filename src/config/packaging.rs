//! Packaging root: artifact kind, compiler options and the per-kind configs.

use super::app_bundle::AppBundleConfig;
use super::capability::ToolchainCapabilities;
use super::error::{ResolveError, Result};
use super::installer::{InstallerConfig, InstallerResolver, ResolvedInstaller};
use super::options::{
    DiskFootprintReduction, InlineExpansion, PackagingType, RuntimeFlavor, StackTraceSupport,
    SymbolicOption, canonicalize_or,
};
use super::project::{ProjectContext, TargetOs};
use serde::{Deserialize, Serialize};

/// Packaging configuration as read from the project descriptor.
///
/// # Configuration
///
/// Add to `Cargo.toml`:
///
/// ```toml
/// [package.metadata.bundle.packaging]
/// packaging = "excelsior-installer"
///
/// [package.metadata.bundle.packaging.compiler]
/// inline_expansion = "low"
/// stack_trace_support = "full"
///
/// [package.metadata.bundle.packaging.installer]
/// language = "english"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    /// `none`, `zip`, `tar-gz`, `excelsior-installer`, `osx-app-bundle` or `native-bundle`.
    ///
    /// Default: `zip`
    pub packaging: Option<String>,

    /// Optimizing compiler options.
    pub compiler: CompilerOptions,

    /// Settings for `excelsior-installer` packaging.
    pub installer: InstallerConfig,

    /// Settings for `osx-app-bundle` packaging.
    pub app_bundle: AppBundleConfig,
}

/// Optimizing compiler options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Default: `aggressive`
    pub inline_expansion: Option<String>,

    /// Default: `minimal`
    pub stack_trace_support: Option<String>,

    /// Unknown values are ignored with a warning.
    pub disk_footprint_reduction: Option<String>,

    /// Unknown values are ignored with a warning.
    pub runtime_flavor: Option<String>,
}

/// Parsed compiler options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedCompilerOptions {
    pub inline_expansion: InlineExpansion,
    pub stack_trace_support: StackTraceSupport,
    /// None when unset or unknown
    pub disk_footprint_reduction: Option<DiskFootprintReduction>,
    /// None when unset or unknown
    pub runtime_flavor: Option<RuntimeFlavor>,
}

impl CompilerOptions {
    /// Parses every option, canonicalizing the raw strings in place.
    pub fn resolve(&mut self) -> Result<ResolvedCompilerOptions> {
        Ok(ResolvedCompilerOptions {
            inline_expansion: canonicalize_or(&mut self.inline_expansion, InlineExpansion::default())?,
            stack_trace_support: canonicalize_or(
                &mut self.stack_trace_support,
                StackTraceSupport::default(),
            )?,
            disk_footprint_reduction: lenient(&mut self.disk_footprint_reduction),
            runtime_flavor: lenient(&mut self.runtime_flavor),
        })
    }
}

/// Parses an option that tolerates unknown values, dropping them.
fn lenient<T: SymbolicOption>(field: &mut Option<String>) -> Option<T> {
    let raw = field.take()?;
    match T::parse_lenient(&raw) {
        Some(value) => {
            *field = Some(value.as_parameter());
            Some(value)
        }
        None => {
            log::warn!("Ignoring unknown {} '{}'", T::FAMILY, raw);
            None
        }
    }
}

/// Fully resolved packaging configuration.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedPackaging {
    /// Artifact kind after `native-bundle` is mapped to the target's native format.
    pub packaging: PackagingType,

    /// Parsed compiler options.
    pub compiler: ResolvedCompilerOptions,

    /// Resolved installer, for `excelsior-installer` packaging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installer: Option<ResolvedInstaller>,

    /// Resolved app bundle, for `osx-app-bundle` packaging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_bundle: Option<AppBundleConfig>,
}

/// Resolves a [`PackagingConfig`] for one project and toolchain.
pub struct PackagingResolver<'a> {
    project: &'a ProjectContext,
    toolchain: &'a ToolchainCapabilities,
}

impl<'a> PackagingResolver<'a> {
    /// Creates a resolver for `project` built with `toolchain`.
    pub fn new(project: &'a ProjectContext, toolchain: &'a ToolchainCapabilities) -> Self {
        Self { project, toolchain }
    }

    /// Resolves the configuration, reading app bundle signing identities
    /// from the process environment.
    pub fn resolve(&self, config: PackagingConfig) -> Result<ResolvedPackaging> {
        self.resolve_with_env(config, |key| std::env::var(key).ok())
    }

    /// Like [`PackagingResolver::resolve`] with an explicit environment lookup.
    ///
    /// Only the configuration of the selected packaging kind is resolved.
    pub fn resolve_with_env(
        &self,
        mut config: PackagingConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedPackaging> {
        let requested = canonicalize_or(&mut config.packaging, PackagingType::default())?;
        let packaging = self.native_packaging(requested)?;
        log::debug!("Packaging {} for {}", packaging, self.toolchain.target_os());

        let compiler = config.compiler.resolve()?;

        let installer = if packaging == PackagingType::ExcelsiorInstaller {
            Some(InstallerResolver::new(self.project, self.toolchain).resolve(config.installer)?)
        } else {
            None
        };

        let app_bundle = if packaging == PackagingType::OsxAppBundle {
            Some(config.app_bundle.resolve_with_env(self.project, env)?)
        } else {
            None
        };

        Ok(ResolvedPackaging {
            packaging,
            compiler,
            installer,
            app_bundle,
        })
    }

    /// Maps `native-bundle` to the target's format and rejects kinds the
    /// target cannot produce.
    fn native_packaging(&self, requested: PackagingType) -> Result<PackagingType> {
        let os = self.toolchain.target_os();
        let packaging = match requested {
            PackagingType::NativeBundle if os == TargetOs::MacOs => PackagingType::OsxAppBundle,
            PackagingType::NativeBundle => PackagingType::ExcelsiorInstaller,
            other => other,
        };

        let supported = match packaging {
            PackagingType::ExcelsiorInstaller => os != TargetOs::MacOs,
            PackagingType::OsxAppBundle => os == TargetOs::MacOs,
            _ => true,
        };
        if !supported {
            return Err(ResolveError::PackagingNotSupported {
                packaging: packaging.as_parameter(),
                os: os.as_parameter(),
            });
        }

        Ok(packaging)
    }
}
