//! Packaging configuration resolver for native installers, app bundles and archives
//!
//! This library resolves the packaging section of a project descriptor into a
//! validated configuration:
//! - symbolic options parsed and normalized
//! - conventional resource files (EULA, splash, images, callbacks) adopted
//! - installer parameters gated by toolchain version and edition
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{CliError, Error, Result};
