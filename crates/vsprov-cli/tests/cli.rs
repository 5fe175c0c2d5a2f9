//! Integration tests driving the `vsprov` binary.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Isolated working directory with no inherited vsprov configuration.
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    fn vsprov(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vsprov"));
        cmd.current_dir(self.temp_dir.path());
        for var in [
            "VSPROV_CONFIG",
            "VSPROV_CHANNEL_URL",
            "VSPROV_INSTALL_ROOT",
            "VSPROV_SCRATCH_DIR",
            "VSPROV_ARCH",
            "VSPROV_LOCALE",
            "RUST_LOG",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx
        .vsprov()
        .arg("--help")
        .output()
        .expect("failed to run vsprov");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("install"));
    assert!(stdout.contains("plan"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx
        .vsprov()
        .arg("--version")
        .output()
        .expect("failed to run vsprov");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("vsprov "));
}

#[test]
fn test_hash_command() {
    let ctx = TestContext::new();
    let file = ctx.path("payload.bin");
    std::fs::write(&file, b"hello").expect("failed to write file");

    let output = ctx
        .vsprov()
        .args(["hash"])
        .arg(&file)
        .output()
        .expect("failed to run vsprov");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824 ")
    );
}

#[test]
fn test_hash_missing_file_fails() {
    let ctx = TestContext::new();
    let output = ctx
        .vsprov()
        .args(["hash", "does-not-exist.bin"])
        .output()
        .expect("failed to run vsprov");
    assert!(!output.status.success());
}

#[test]
fn test_invalid_config_fails() {
    let ctx = TestContext::new();
    let config = ctx.path("vsprov.toml");
    std::fs::write(&config, "manifest-trust = \"sometimes\"").expect("failed to write config");

    let output = ctx
        .vsprov()
        .arg("--config")
        .arg(&config)
        .arg("plan")
        .output()
        .expect("failed to run vsprov");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse"));
}

#[test]
fn test_unreachable_channel_fails() {
    let ctx = TestContext::new();
    let output = ctx
        .vsprov()
        .args(["--quiet", "--channel-url", "http://127.0.0.1:9/channel", "plan"])
        .output()
        .expect("failed to run vsprov");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Provisioning from http://127.0.0.1:9/channel failed"));
}
