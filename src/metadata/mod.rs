//! Project context and packaging configuration from a single Cargo.toml

use crate::config::{PackagingConfig, ProjectContext, ProjectContextBuilder};
use crate::error::{CliError, Result};
use std::path::Path;

/// Conventional packaging resource directory, relative to the manifest.
const DEFAULT_RESOURCES_DIR: &str = "assets/bundle";

/// Everything the resolver needs from a Cargo.toml
pub struct CargoManifest {
    /// Project facts ([package] section + [package.metadata.bundle])
    pub project: ProjectContext,

    /// Raw packaging configuration ([package.metadata.bundle.packaging])
    pub packaging: PackagingConfig,
}

/// Load project context and packaging configuration from Cargo.toml
///
/// The resource directory is, in order of precedence, `resources_override`,
/// `[package.metadata.bundle] resources` (relative to the manifest), or
/// `assets/bundle` next to the manifest.
pub fn load_manifest(cargo_toml_path: &Path, resources_override: Option<&Path>) -> Result<CargoManifest> {
    let manifest = std::fs::read_to_string(cargo_toml_path)?;
    let toml_value: toml::Value = toml::from_str(&manifest)?;

    let missing = |field: &str| CliError::MissingManifestField {
        field: field.to_string(),
        manifest: cargo_toml_path.display().to_string(),
    };

    let package = toml_value.get("package").ok_or_else(|| missing("package"))?;
    let name = str_field(package, "name").ok_or_else(|| missing("package.name"))?;
    let version = str_field(package, "version").ok_or_else(|| missing("package.version"))?;

    // Primary binary from [[bin]], falling back to the package name
    let binary_name = toml_value
        .get("bin")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|first| str_field(first, "name"))
        .unwrap_or(name);

    let bundle = package.get("metadata").and_then(|m| m.get("bundle"));
    let bundle_str = |key: &str| bundle.and_then(|b| str_field(b, key));

    let cargo_dir = cargo_toml_path.parent().unwrap_or_else(|| Path::new("."));
    let resources_dir = resources_override
        .map(Path::to_path_buf)
        .or_else(|| bundle_str("resources").map(|dir| cargo_dir.join(dir)))
        .unwrap_or_else(|| cargo_dir.join(DEFAULT_RESOURCES_DIR));

    if !resources_dir.is_dir() {
        log::warn!("Resource directory not found: {}", resources_dir.display());
    }

    let mut builder = ProjectContextBuilder::new()
        .resources_dir(&resources_dir)
        .product(bundle_str("product_name").unwrap_or(name))
        .version(version)
        .artifact_name(name)
        .output_name(binary_name);
    if let Some(vendor) = bundle_str("publisher") {
        builder = builder.vendor(vendor);
    }
    if let Some(group) = bundle_str("group_id") {
        builder = builder.group_id(group);
    }
    let project = builder.build()?;

    let packaging = parse_packaging(bundle)?;

    log::debug!(
        "Loaded {} {} with resources at {}",
        project.product(),
        project.version(),
        project.resources_dir().display()
    );

    Ok(CargoManifest { project, packaging })
}

/// Parse [package.metadata.bundle.packaging] into a [`PackagingConfig`]
fn parse_packaging(bundle: Option<&toml::Value>) -> Result<PackagingConfig> {
    match bundle.and_then(|b| b.get("packaging")) {
        Some(value) => {
            let config: PackagingConfig = value.clone().try_into()?;
            Ok(config)
        }
        None => {
            log::debug!("No [package.metadata.bundle.packaging] section, using defaults");
            Ok(PackagingConfig::default())
        }
    }
}

fn str_field<'a>(value: &'a toml::Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(|v| v.as_str())
}
