//! Command line interface for the packaging configuration resolver.

mod args;

pub use args::Args;

use crate::config::{PackagingResolver, ToolchainCapabilities};
use crate::error::{CliError, Result};
use crate::metadata;
use std::io::Write;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    run_with(Args::parse_args())
}

/// Resolve the manifest described by `args` and print it as JSON
pub fn run_with(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let manifest = metadata::load_manifest(&args.manifest, args.resources.as_deref())?;
    let toolchain = ToolchainCapabilities::new(
        args.toolchain_version.clone(),
        args.edition,
        args.target_os(),
    );

    log::info!(
        "Resolving {} for toolchain {} ({}, {})",
        args.manifest.display(),
        toolchain.version(),
        toolchain.edition(),
        toolchain.target_os()
    );

    let resolved = PackagingResolver::new(&manifest.project, &toolchain).resolve(manifest.packaging)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&resolved)?
    } else {
        serde_json::to_string(&resolved)?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;

    Ok(0)
}
