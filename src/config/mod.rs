//! Packaging configuration resolution and validation.
//!
//! This module turns a user-supplied packaging configuration into a fully
//! resolved one: symbolic options parsed and canonicalized, conventional
//! resource files adopted, capability tiers checked against the toolchain,
//! and every nested installer entry validated.

mod app_bundle;
mod capability;
mod encoding;
mod error;
mod files;
mod installer;
mod options;
mod packaging;
mod project;

pub use app_bundle::{AppBundleConfig, DEVELOPER_ID_ENV, PUBLISHER_ID_ENV, short_version};
pub use capability::{CapabilityTier, Edition, TierGate, ToolchainCapabilities};
pub use encoding::{EulaEncoding, EulaFlag, detect_encoding, eula_flag};
pub use error::{ResolveError, Result};
pub use files::{PackageFile, PackageFileType, resolve_with_convention};
pub use installer::{
    AfterInstallRunnable, CompressionLevel, FileAssociation, InstallationDirectory,
    InstallationDirectoryType, InstallerConfig, InstallerResolver, PostInstallActionType,
    PostInstallCheckbox, ResolvedInstaller, SetupLanguage, Shortcut, ShortcutLocation, Stage,
};
pub use options::{
    DiskFootprintReduction, InlineExpansion, PackagingType, RuntimeFlavor, StackTraceSupport,
    SymbolicOption, constant_to_parameter, normalize, parameter_to_constant,
};
pub use packaging::{
    CompilerOptions, PackagingConfig, PackagingResolver, ResolvedCompilerOptions,
    ResolvedPackaging,
};
pub use project::{ProjectContext, ProjectContextBuilder, TargetOs};
