//! End-to-end tests for the tether CLI.
//!
//! The package manager is stubbed with a shell script on PATH that
//! logs every invocation, so these tests exercise the real binary
//! without touching a registry or a network.

#![cfg(unix)]

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::path::PathBuf;

mod connect;
mod link;
mod reset;

/// Stub npm: logs arguments, fabricates a tarball on `pack`.
const NPM_STUB: &str = r#"#!/bin/sh
log="${NPM_LOG:?}"
printf '%s\n' "npm $*" >> "$log"
case "$1" in
  pack)
    name="stub-$$-$(date +%s%N).tgz"
    : > "$name"
    printf '%s\n' "$name"
    ;;
esac
exit 0
"#;

/// Isolated host project with a stubbed package manager.
pub struct TestContext {
    pub temp: TempDir,
    bin_dir: PathBuf,
    log_file: PathBuf,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();

        let bin_dir = temp.child("bin").path().to_path_buf();
        std::fs::create_dir_all(&bin_dir).unwrap();
        let stub = bin_dir.join("npm");
        std::fs::write(&stub, NPM_STUB).unwrap();
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&stub).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&stub, perms).unwrap();
        }

        let log_file = temp.child("npm.log").path().to_path_buf();
        std::fs::create_dir_all(temp.child("host").path()).unwrap();

        Self {
            temp,
            bin_dir,
            log_file,
        }
    }

    /// Create a Command for running tether inside the host project
    pub fn tether(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("tether").unwrap();
        cmd.current_dir(self.host_dir());

        let path = std::env::var("PATH").unwrap_or_default();
        cmd.env("PATH", format!("{}:{}", self.bin_dir.display(), path));
        cmd.env("NPM_LOG", &self.log_file);
        cmd
    }

    pub fn host_dir(&self) -> PathBuf {
        self.temp.child("host").path().to_path_buf()
    }

    pub fn create_host_manifest(&self, content: &str) {
        std::fs::write(self.host_dir().join("package.json"), content).unwrap();
    }

    /// Create a dependency source directory next to the host project
    pub fn create_dep(&self, dir: &str, name: &str, version: &str) {
        let dep_dir = self.temp.child(dir).path().to_path_buf();
        std::fs::create_dir_all(&dep_dir).unwrap();
        std::fs::write(
            dep_dir.join("package.json"),
            format!(r#"{{ "name": "{}", "version": "{}" }}"#, name, version),
        )
        .unwrap();
    }

    /// Everything the stub package manager was asked to do
    pub fn npm_log(&self) -> String {
        std::fs::read_to_string(&self.log_file).unwrap_or_default()
    }

    /// Parsed contents of the registry store file
    pub fn registry_json(&self) -> serde_json::Value {
        let content =
            std::fs::read_to_string(self.host_dir().join(".tether.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}
