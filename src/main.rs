//! Kodegen Bundler Config - packaging configuration resolver for Rust binaries.
//!
//! This binary resolves the packaging configuration of a Cargo.toml against a
//! toolchain description and prints the result as JSON.

use kodegen_bundler_config::cli;
use std::process;

fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {} [{}]", e, e.message_key());
            1
        }
    };

    process::exit(exit_code);
}
