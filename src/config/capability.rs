//! Toolchain capability descriptor and the gate that enforces it.
//!
//! Capabilities are facts about the toolchain, grouped into tiers. Each tier
//! owns a set of configuration fields; using any of them without the tier is
//! rejected, listing every offending field at once.

use super::error::{ResolveError, Result};
use super::options::symbolic_option;
use super::project::TargetOs;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

symbolic_option! {
    /// Toolchain product edition.
    #[derive(Default)]
    pub enum Edition: "edition" {
        Standard => "STANDARD",
        Professional => "PROFESSIONAL",
        #[default]
        Enterprise => "ENTERPRISE",
    }
}

/// A named group of fields that require a minimum toolchain capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapabilityTier {
    /// Installer parameters introduced in toolchain 11.3
    ExtendedInstaller,
    /// Installer parameters that also need a non-Standard edition
    AdvancedInstaller,
}

impl CapabilityTier {
    /// Every tier, in evaluation order.
    pub const ALL: [CapabilityTier; 2] = [
        CapabilityTier::ExtendedInstaller,
        CapabilityTier::AdvancedInstaller,
    ];

    /// Get the tier name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityTier::ExtendedInstaller => "extended-installer",
            CapabilityTier::AdvancedInstaller => "advanced-installer",
        }
    }

    /// First toolchain version providing the tier.
    pub fn min_version(&self) -> Version {
        Version::new(11, 3, 0)
    }

    /// Human-readable requirement, used in diagnostics.
    pub fn requirement(&self) -> String {
        match self {
            CapabilityTier::ExtendedInstaller => {
                format!("toolchain {} or later", self.min_version())
            }
            CapabilityTier::AdvancedInstaller => format!(
                "toolchain {} or later, {} or {} edition",
                self.min_version(),
                Edition::Professional,
                Edition::Enterprise
            ),
        }
    }

    fn is_provided_by(&self, version: &Version, edition: Edition) -> bool {
        match self {
            CapabilityTier::ExtendedInstaller => *version >= self.min_version(),
            CapabilityTier::AdvancedInstaller => {
                *version >= self.min_version() && edition != Edition::Standard
            }
        }
    }
}

impl std::fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the target toolchain can do.
///
/// Passed explicitly to the resolver; never looked up globally.
#[derive(Debug, Clone)]
pub struct ToolchainCapabilities {
    version: Version,
    edition: Edition,
    target_os: TargetOs,
    tiers: BTreeSet<CapabilityTier>,
}

impl ToolchainCapabilities {
    /// Derives the available tiers from the toolchain version and edition.
    pub fn new(version: Version, edition: Edition, target_os: TargetOs) -> Self {
        let tiers = CapabilityTier::ALL
            .into_iter()
            .filter(|tier| tier.is_provided_by(&version, edition))
            .collect();

        Self {
            version,
            edition,
            target_os,
            tiers,
        }
    }

    /// Uses an explicit tier set instead of deriving it.
    pub fn with_tiers(
        version: Version,
        edition: Edition,
        target_os: TargetOs,
        tiers: impl IntoIterator<Item = CapabilityTier>,
    ) -> Self {
        Self {
            version,
            edition,
            target_os,
            tiers: tiers.into_iter().collect(),
        }
    }

    /// Returns the toolchain version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Returns the toolchain edition.
    pub fn edition(&self) -> Edition {
        self.edition
    }

    /// Returns the target operating system.
    pub fn target_os(&self) -> TargetOs {
        self.target_os
    }

    /// Whether the toolchain provides `tier`.
    pub fn supports(&self, tier: CapabilityTier) -> bool {
        self.tiers.contains(&tier)
    }

    /// Starts a gate check for the fields of `tier`.
    pub fn gate(&self, tier: CapabilityTier) -> TierGate<'_> {
        TierGate {
            capabilities: self,
            tier,
            used: Vec::new(),
        }
    }
}

/// Collects the fields of one tier that the user set.
///
/// Fields are recorded in declaration order; [`TierGate::check`] fails once
/// with all of them.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_config::config::{CapabilityTier, ToolchainCapabilities};
///
/// # fn example(caps: &ToolchainCapabilities) -> kodegen_bundler_config::config::Result<()> {
/// caps.gate(CapabilityTier::ExtendedInstaller)
///     .field("registry_key", true)
///     .field("cleanup_after_uninstall", false)
///     .check()?;
/// # Ok(())
/// # }
/// ```
pub struct TierGate<'a> {
    capabilities: &'a ToolchainCapabilities,
    tier: CapabilityTier,
    used: Vec<&'static str>,
}

impl TierGate<'_> {
    /// Records `name` when `is_set` is true.
    pub fn field(mut self, name: &'static str, is_set: bool) -> Self {
        if is_set {
            self.used.push(name);
        }
        self
    }

    /// Fails with every recorded field if the toolchain lacks the tier.
    pub fn check(self) -> Result<()> {
        if self.used.is_empty() || self.capabilities.supports(self.tier) {
            return Ok(());
        }

        log::debug!(
            "toolchain {} lacks {}, used fields: {:?}",
            self.capabilities.version,
            self.tier,
            self.used
        );

        Err(ResolveError::UnsupportedParameters {
            tier: self.tier,
            required: self.tier.requirement(),
            names: self.used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(version: &str, edition: Edition) -> ToolchainCapabilities {
        ToolchainCapabilities::new(Version::parse(version).unwrap(), edition, TargetOs::Windows)
    }

    #[test]
    fn tiers_follow_version_and_edition() {
        let old = caps("11.0.0", Edition::Enterprise);
        assert!(!old.supports(CapabilityTier::ExtendedInstaller));
        assert!(!old.supports(CapabilityTier::AdvancedInstaller));

        let standard = caps("11.3.0", Edition::Standard);
        assert!(standard.supports(CapabilityTier::ExtendedInstaller));
        assert!(!standard.supports(CapabilityTier::AdvancedInstaller));

        let current = caps("15.0.1", Edition::Professional);
        assert!(current.supports(CapabilityTier::AdvancedInstaller));
    }

    #[test]
    fn gate_reports_all_fields_in_declaration_order() {
        let old = caps("11.0.0", Edition::Enterprise);
        let err = old
            .gate(CapabilityTier::ExtendedInstaller)
            .field("language", false)
            .field("cleanup_after_uninstall", true)
            .field("registry_key", true)
            .check()
            .unwrap_err();

        match err {
            ResolveError::UnsupportedParameters {
                tier,
                required,
                names,
            } => {
                assert_eq!(tier, CapabilityTier::ExtendedInstaller);
                assert_eq!(required, "toolchain 11.3.0 or later");
                assert_eq!(names, vec!["cleanup_after_uninstall", "registry_key"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn gate_passes_when_tier_present_or_nothing_used() {
        let old = caps("11.0.0", Edition::Enterprise);
        assert!(old.gate(CapabilityTier::ExtendedInstaller).check().is_ok());

        let current = caps("11.3.0", Edition::Enterprise);
        assert!(
            current
                .gate(CapabilityTier::AdvancedInstaller)
                .field("file_associations", true)
                .check()
                .is_ok()
        );
    }

    #[test]
    fn explicit_tiers_override_derivation() {
        let caps = ToolchainCapabilities::with_tiers(
            Version::new(99, 0, 0),
            Edition::Enterprise,
            TargetOs::Linux,
            [CapabilityTier::ExtendedInstaller],
        );
        assert!(caps.supports(CapabilityTier::ExtendedInstaller));
        assert!(!caps.supports(CapabilityTier::AdvancedInstaller));
    }
}
