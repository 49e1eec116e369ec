//! Command line argument parsing and validation.

use crate::config::{Edition, TargetOs};
use clap::Parser;
use semver::Version;
use std::path::PathBuf;

/// Packaging configuration resolver for Rust binaries
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_config",
    version,
    about = "Packaging configuration resolver for Rust binaries",
    long_about = "Resolves and validates the packaging configuration in [package.metadata.bundle.packaging].

Fills conventional resource files, checks every option against the toolchain
capabilities and prints the resolved configuration as JSON.

Usage:
  kodegen_bundler_config --manifest Cargo.toml --toolchain-version 15.0.0
  kodegen_bundler_config --manifest Cargo.toml --toolchain-version 11.3.0 --edition standard --target-os windows

Exit code 0 = configuration is valid and was printed to stdout."
)]
pub struct Args {
    /// Path to the Cargo.toml holding the packaging configuration
    #[arg(short, long, value_name = "PATH", default_value = "Cargo.toml")]
    pub manifest: PathBuf,

    /// Version of the packaging toolchain
    #[arg(short = 't', long, value_name = "SEMVER")]
    pub toolchain_version: Version,

    /// Toolchain edition: standard, professional or enterprise
    #[arg(short, long, value_name = "EDITION", default_value = "enterprise")]
    pub edition: Edition,

    /// Target operating system: windows, linux or macos
    ///
    /// Defaults to the host operating system.
    #[arg(long, value_name = "OS")]
    pub target_os: Option<TargetOs>,

    /// Packaging resource directory, overriding the manifest
    #[arg(short, long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Target OS, falling back to the host
    pub fn target_os(&self) -> TargetOs {
        self.target_os.unwrap_or_else(TargetOs::host)
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.manifest.is_file() {
            return Err(format!(
                "Manifest not found: {}",
                self.manifest.display()
            ));
        }

        if let Some(resources) = self.resources.as_deref().filter(|dir| !dir.is_dir()) {
            return Err(format!(
                "Resource directory not found: {}",
                resources.display()
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toolchain_description() {
        let args = Args::try_parse_from([
            "kodegen_bundler_config",
            "--toolchain-version",
            "11.3.0",
            "--edition",
            "STANDARD",
            "--target-os",
            "windows",
        ])
        .unwrap();
        assert_eq!(args.toolchain_version, Version::new(11, 3, 0));
        assert_eq!(args.edition, Edition::Standard);
        assert_eq!(args.target_os(), TargetOs::Windows);
        assert_eq!(args.manifest, PathBuf::from("Cargo.toml"));
    }

    #[test]
    fn rejects_unknown_edition() {
        let result = Args::try_parse_from([
            "kodegen_bundler_config",
            "--toolchain-version",
            "15.0.0",
            "--edition",
            "ultimate",
        ]);
        assert!(result.is_err());
    }
}
