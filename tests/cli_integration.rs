//! CLI integration tests for the packaging configuration resolver.
//!
//! These tests run the binary against the fixture manifest in tests/fixtures.

use std::path::PathBuf;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the resolver binary command.
fn resolver() -> Command {
    let mut cmd = Command::cargo_bin("kodegen_bundler_config").unwrap();
    cmd.env_remove("OSX_DEVELOPER_ID").env_remove("OSX_PUBLISHER_ID");
    cmd
}

/// Path of the fixture manifest.
fn fixture_manifest() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Cargo.toml")
}

#[test]
fn test_resolves_windows_installer() {
    resolver()
        .arg("--manifest")
        .arg(fixture_manifest())
        .args(["--toolchain-version", "15.0.0", "--target-os", "windows"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""packaging":"excelsior-installer""#))
        .stdout(predicate::str::contains(r#""eula_flag":"-eula""#))
        .stdout(predicate::str::contains(r#""language":"english""#))
        .stdout(predicate::str::contains(r#""inline_expansion":"low""#))
        .stdout(predicate::str::contains(r#""location":"desktop""#));
}

#[test]
fn test_old_toolchain_reports_every_extended_parameter() {
    resolver()
        .arg("--manifest")
        .arg(fixture_manifest())
        .args(["--toolchain-version", "11.0.0", "--target-os", "windows"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("[installer.unsupported-parameters]"))
        .stderr(predicate::str::contains(
            "language, shortcuts, cleanup_after_uninstall, registry_key, file_associations",
        ));
}

#[test]
fn test_standard_edition_rejects_advanced_parameters() {
    resolver()
        .arg("--manifest")
        .arg(fixture_manifest())
        .args([
            "--toolchain-version",
            "11.3.0",
            "--edition",
            "standard",
            "--target-os",
            "linux",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[installer.unsupported-parameter]"))
        .stderr(predicate::str::contains("file_associations"));
}

#[test]
fn test_macos_resolves_app_bundle() {
    resolver()
        .arg("--manifest")
        .arg(fixture_manifest())
        .args(["--toolchain-version", "15.0.0", "--target-os", "macos"])
        .env("OSX_DEVELOPER_ID", "Developer ID Application: Mock Corp")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""packaging":"osx-app-bundle""#))
        .stdout(predicate::str::contains(
            r#""identifier":"com.example.mock-binary""#,
        ))
        .stdout(predicate::str::contains(r#""file_name":"mock-kodegen""#))
        .stdout(predicate::str::contains(r#""short_version":"0.1.0""#))
        .stdout(predicate::str::contains(
            r#""developer_id":"Developer ID Application: Mock Corp""#,
        ))
        .stdout(predicate::str::contains("installer").not());
}

#[test]
fn test_missing_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    resolver()
        .arg("--manifest")
        .arg(tmp.path().join("Cargo.toml"))
        .args(["--toolchain-version", "15.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[cli.invalid-arguments]"));
}

#[test]
fn test_invalid_option_is_reported_with_valid_values() {
    let tmp = TempDir::new().unwrap();
    let manifest = tmp.path().join("Cargo.toml");
    std::fs::write(
        &manifest,
        r#"
[package]
name = "my-app"
version = "1.0.0"

[package.metadata.bundle.packaging]
packaging = "tarball"
"#,
    )
    .unwrap();

    resolver()
        .arg("--manifest")
        .arg(&manifest)
        .args(["--toolchain-version", "15.0.0", "--target-os", "linux"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[config.invalid-option]"))
        .stderr(predicate::str::contains("tar-gz"));
}
