//! Shared harness for driving the built binary
//!
//! The wrapper is exercised the way it is deployed: symlinked under toolchain
//! names in one directory, with a fake toolchain in another. Every fake tool
//! prints its arguments one per line and exits with `FAKE_EXIT`.

#![allow(dead_code)]

use std::ffi::OsStr;
use std::fs;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn ccwrap_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ccwrap"))
}

/// Runs the binary under its own name with a clean environment.
pub fn ccwrap(args: &[&str], vars: &[(&str, &str)]) -> Output {
    Command::new(ccwrap_bin())
        .args(args)
        .env_clear()
        .env("PATH", "/usr/bin:/bin")
        .envs(vars.iter().copied())
        .output()
        .expect("Failed to execute ccwrap")
}

pub fn lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

pub struct Toolchain {
    pub wrappers: TempDir,
    pub tools: TempDir,
}

impl Toolchain {
    pub fn new() -> Self {
        Self {
            wrappers: TempDir::new().expect("Failed to create wrapper dir"),
            tools: TempDir::new().expect("Failed to create tool dir"),
        }
    }

    /// Links the wrapper binary under `name`.
    pub fn wrap(&self, name: &str) -> PathBuf {
        let link = self.wrappers.path().join(name);
        symlink(ccwrap_bin(), &link).expect("Failed to symlink wrapper");
        link
    }

    /// Installs a fake tool that echoes its arguments.
    pub fn tool(&self, name: &str) -> PathBuf {
        self.script(name, "for arg in \"$@\"; do echo \"$arg\"; done\nexit ${FAKE_EXIT:-0}\n")
    }

    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.tools.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("Failed to write tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to mark tool executable");
        path
    }

    /// `PATH` with the wrapper directory ahead of the fake toolchain.
    pub fn search_path(&self) -> std::ffi::OsString {
        std::env::join_paths([self.wrappers.path(), self.tools.path()])
            .expect("Failed to join search path")
    }

    pub fn run<S: AsRef<OsStr>>(&self, name: &str, args: &[S], vars: &[(&str, &str)]) -> Output {
        Command::new(self.wrappers.path().join(name))
            .args(args)
            .env_clear()
            .env("PATH", self.search_path())
            .envs(vars.iter().copied())
            .output()
            .expect("Failed to execute wrapper")
    }

    pub fn tools_dir(&self) -> &Path {
        self.tools.path()
    }
}
