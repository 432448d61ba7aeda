//! Shared fixtures for the CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub const SETTINGS: &str = "rootProject.name = 'demo'\ninclude 'core'\ninclude 'utils'\n";
pub const BUILD: &str = "dependencies {\n    /* Features */\n    implementation project(':features:hello')\n}\n";

/// `postgen` isolated from the user's config and environment.
pub fn postgen(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("postgen").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("GIT");
    cmd
}

/// A generated project with one feature directory.
pub struct Project {
    pub tmp: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("demo");
        fs::create_dir_all(root.join("bootstrap/app")).unwrap();
        fs::create_dir_all(root.join("features/payments")).unwrap();
        fs::write(root.join("settings.gradle"), SETTINGS).unwrap();
        fs::write(root.join("bootstrap/app/build.gradle"), BUILD).unwrap();
        Self { tmp }
    }

    pub fn home(&self) -> &Path {
        self.tmp.path()
    }

    pub fn root(&self) -> PathBuf {
        self.tmp.path().join("demo")
    }

    pub fn feature_dir(&self) -> PathBuf {
        self.root().join("features/payments")
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).unwrap()
    }

    pub fn write(&self, rel: &str, content: &str) {
        fs::write(self.root().join(rel), content).unwrap();
    }

    /// Write an executable shell script under the project root.
    #[cfg(unix)]
    pub fn script(&self, rel: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.root().join(rel);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }
}
