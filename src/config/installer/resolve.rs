//! Installer resolution pipeline.
//!
//! Stages run strictly in order and the first failing stage rejects the
//! configuration:
//!
//! 1. Defaulted - EULA encoding parsed, conventional files adopted
//! 2. CapabilityChecked - every capability tier gated
//! 3. Validated - options parsed, nested entries validated
//! 4. Resolved - EULA encoding detected and mapped to a backend flag
//!
//! Conventional defaults of capability-gated files are only adopted when the
//! toolchain has the tier, so a default never trips the gate.

use super::{
    CompressionLevel, FileAssociation, InstallerConfig, PostInstallCheckbox, SetupLanguage,
    Shortcut,
};
use crate::config::capability::{CapabilityTier, ToolchainCapabilities};
use crate::config::encoding::{EulaEncoding, EulaFlag, eula_flag};
use crate::config::error::{Result, validate_each};
use crate::config::files::resolve_with_convention;
use crate::config::options::{SymbolicOption, canonicalize, canonicalize_or};
use crate::config::project::ProjectContext;
use serde::Serialize;

const EULA_FILE: &str = "eula.txt";
const SPLASH_FILE: &str = "installerSplash.bmp";
const WELCOME_IMAGE_FILE: &str = "welcomeImage.bmp";
const INSTALLER_IMAGE_FILE: &str = "installerImage.bmp";
const UNINSTALLER_IMAGE_FILE: &str = "uninstallerImage.bmp";

/// Resolution state reached by an installer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// As constructed by the caller
    Raw,
    /// Conventional defaults applied
    Defaulted,
    /// Capability tiers checked
    CapabilityChecked,
    /// Nested entries validated
    Validated,
    /// Ready for the backend
    Resolved,
}

impl Stage {
    /// Get the stage name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Raw => "raw",
            Stage::Defaulted => "defaulted",
            Stage::CapabilityChecked => "capability-checked",
            Stage::Validated => "validated",
            Stage::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully resolved installer configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedInstaller {
    /// The configuration with every default filled in.
    pub config: InstallerConfig,

    /// Backend flag for the EULA, when a EULA is packaged.
    pub eula_flag: Option<EulaFlag>,

    /// Parsed setup language.
    pub language: Option<SetupLanguage>,

    /// Parsed compression level.
    pub compression_level: Option<CompressionLevel>,
}

struct Validated {
    config: InstallerConfig,
    language: Option<SetupLanguage>,
    compression_level: Option<CompressionLevel>,
}

/// Resolves [`InstallerConfig`] values for one project and toolchain.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_config::config::{
///     Edition, InstallerConfig, InstallerResolver, ProjectContextBuilder, TargetOs,
///     ToolchainCapabilities,
/// };
///
/// # fn example() -> kodegen_bundler_config::config::Result<()> {
/// let project = ProjectContextBuilder::new()
///     .resources_dir("assets/bundle")
///     .product("MyApp")
///     .version("1.0.0")
///     .build()?;
/// let toolchain = ToolchainCapabilities::new(
///     semver::Version::new(15, 0, 0),
///     Edition::Enterprise,
///     TargetOs::Windows,
/// );
///
/// let resolved = InstallerResolver::new(&project, &toolchain).resolve(InstallerConfig::default())?;
/// if let Some(flag) = resolved.eula_flag {
///     println!("EULA flag: {flag}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct InstallerResolver<'a> {
    project: &'a ProjectContext,
    toolchain: &'a ToolchainCapabilities,
}

impl<'a> InstallerResolver<'a> {
    /// Creates a resolver for `project` built with `toolchain`.
    pub fn new(project: &'a ProjectContext, toolchain: &'a ToolchainCapabilities) -> Self {
        Self { project, toolchain }
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that rejects the configuration.
    /// Capability and collection stages report all their violations at once.
    pub fn resolve(&self, config: InstallerConfig) -> Result<ResolvedInstaller> {
        log::debug!(
            "Resolving installer configuration for {} ({})",
            self.project.product(),
            Stage::Raw
        );

        let (config, eula_encoding) = advance(Stage::Defaulted, self.fill_defaults(config))?;
        let config = advance(Stage::CapabilityChecked, self.check_capabilities(config))?;
        let validated = advance(Stage::Validated, self.validate(config))?;
        let eula_flag = advance(
            Stage::Resolved,
            self.resolve_eula_flag(&validated.config, eula_encoding),
        )?;

        Ok(ResolvedInstaller {
            config: validated.config,
            eula_flag,
            language: validated.language,
            compression_level: validated.compression_level,
        })
    }

    fn fill_defaults(&self, mut config: InstallerConfig) -> Result<(InstallerConfig, EulaEncoding)> {
        let eula_encoding = canonicalize_or(&mut config.eula_encoding, EulaEncoding::Autodetect)?;
        let resources = self.project.resources_dir();

        config.eula = resolve_with_convention("eula", config.eula.take(), resources, EULA_FILE)?;
        config.installer_splash = resolve_with_convention(
            "installer_splash",
            config.installer_splash.take(),
            resources,
            SPLASH_FILE,
        )?;

        if self.toolchain.supports(CapabilityTier::ExtendedInstaller) {
            let os = self.toolchain.target_os();
            config.install_callback = resolve_with_convention(
                "install_callback",
                config.install_callback.take(),
                resources,
                &os.mangle_dll_name("install"),
            )?;

            if !config.uninstall_callback.is_defined() {
                let uninstall = self.project.resource(&os.mangle_dll_name("uninstall"));
                if uninstall.exists() {
                    log::info!("Using uninstall_callback by convention: {}", uninstall.display());
                    config.uninstall_callback.path = Some(uninstall);
                }
            }
        }

        if self.toolchain.supports(CapabilityTier::AdvancedInstaller) {
            config.welcome_image = resolve_with_convention(
                "welcome_image",
                config.welcome_image.take(),
                resources,
                WELCOME_IMAGE_FILE,
            )?;
            config.installer_image = resolve_with_convention(
                "installer_image",
                config.installer_image.take(),
                resources,
                INSTALLER_IMAGE_FILE,
            )?;
            config.uninstaller_image = resolve_with_convention(
                "uninstaller_image",
                config.uninstaller_image.take(),
                resources,
                UNINSTALLER_IMAGE_FILE,
            )?;
        }

        Ok((config, eula_encoding))
    }

    fn check_capabilities(&self, config: InstallerConfig) -> Result<InstallerConfig> {
        let c = &config;

        self.toolchain
            .gate(CapabilityTier::ExtendedInstaller)
            .field("language", c.language.is_some())
            .field("after_install_runnable", c.after_install_runnable.is_defined())
            .field("compression_level", c.compression_level.is_some())
            .field("installation_directory", c.installation_directory.is_defined())
            .field("shortcuts", !c.shortcuts.is_empty())
            .field("cleanup_after_uninstall", c.cleanup_after_uninstall)
            .field("registry_key", c.registry_key.is_some())
            .field(
                "no_default_post_install_actions",
                c.no_default_post_install_actions,
            )
            .field("post_install_checkboxes", !c.post_install_checkboxes.is_empty())
            .field("file_associations", !c.file_associations.is_empty())
            .field("install_callback", c.install_callback.is_some())
            .field("uninstall_callback", c.uninstall_callback.is_defined())
            .field("welcome_image", c.welcome_image.is_some())
            .field("installer_image", c.installer_image.is_some())
            .field("uninstaller_image", c.uninstaller_image.is_some())
            .check()?;

        // Unknown levels are left for validation to reject.
        let slow_compression = c
            .compression_level
            .as_deref()
            .and_then(CompressionLevel::parse_lenient)
            .is_some_and(|level| level != CompressionLevel::Fast);

        self.toolchain
            .gate(CapabilityTier::AdvancedInstaller)
            .field("compression_level", slow_compression)
            .field("post_install_checkboxes", !c.post_install_checkboxes.is_empty())
            .field("file_associations", !c.file_associations.is_empty())
            .field("welcome_image", c.welcome_image.is_some())
            .field("installer_image", c.installer_image.is_some())
            .field("uninstaller_image", c.uninstaller_image.is_some())
            .check()?;

        Ok(config)
    }

    fn validate(&self, mut config: InstallerConfig) -> Result<Validated> {
        let language = canonicalize::<SetupLanguage>(&mut config.language)?;

        if config.after_install_runnable.is_defined() {
            config.after_install_runnable.validate()?;
        }

        let compression_level = canonicalize::<CompressionLevel>(&mut config.compression_level)?;

        if config.installation_directory.is_defined() {
            config.installation_directory.validate(self.toolchain)?;
        }

        validate_each(&mut config.shortcuts, Shortcut::validate)?;
        validate_each(
            &mut config.post_install_checkboxes,
            PostInstallCheckbox::validate,
        )?;
        validate_each(&mut config.file_associations, FileAssociation::validate)?;

        config.uninstall_callback.validate_file("uninstall_callback")?;

        Ok(Validated {
            config,
            language,
            compression_level,
        })
    }

    fn resolve_eula_flag(
        &self,
        config: &InstallerConfig,
        declared: EulaEncoding,
    ) -> Result<Option<EulaFlag>> {
        match &config.eula {
            Some(eula) => {
                let flag = eula_flag(eula, declared)?;
                log::debug!("EULA {} uses {}", eula.display(), flag);
                Ok(Some(flag))
            }
            None => Ok(None),
        }
    }
}

/// Logs the stage transition of `result`.
fn advance<T>(stage: Stage, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => log::debug!("Installer configuration {stage}"),
        Err(err) => log::debug!("Installer configuration rejected before {stage}: {err}"),
    }
    result
}
