// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for CLI specs.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use assert_cmd::Command;
use tempfile::TempDir;

/// The `drv` binary from this workspace.
///
/// Cargo only exports `CARGO_BIN_EXE_drv` to tests of the package that owns
/// the binary, so from the root package it is built once on first use, with
/// the same cargo and profile, into the target directory these specs run from.
fn drv_binary() -> &'static Path {
    static BINARY: OnceLock<PathBuf> = OnceLock::new();
    BINARY.get_or_init(|| {
        if let Some(path) = option_env!("CARGO_BIN_EXE_drv") {
            return PathBuf::from(path);
        }
        let exe = std::env::current_exe().unwrap();
        let mut dir = exe.parent().unwrap();
        if dir.ends_with("deps") {
            dir = dir.parent().unwrap();
        }
        let mut build = std::process::Command::new(env!("CARGO"));
        build.current_dir(env!("CARGO_MANIFEST_DIR")).args(["build", "--quiet", "-p", "drv", "--bin", "drv"]);
        if dir.ends_with("release") {
            build.arg("--release");
        }
        let status = build.status().unwrap();
        assert!(status.success(), "building drv failed: {status}");
        dir.join(format!("drv{}", std::env::consts::EXE_SUFFIX))
    })
}

/// A `drv` invocation isolated from the host: empty `PATH`, no `DRV_*`
/// overrides, and a scratch working directory.
pub fn cli() -> Cli {
    Cli::new()
}

pub struct Cli {
    cmd: Command,
    _scratch: Option<TempDir>,
}

impl Cli {
    fn new() -> Self {
        let scratch = tempfile::tempdir().unwrap();
        let mut cmd = Command::new(drv_binary());
        cmd.current_dir(scratch.path())
            .env("PATH", scratch.path())
            .env_remove("DRV_LOG")
            .env_remove("DRV_FILELIST_THRESHOLD")
            .env_remove("DRV_FORCE_FILELISTS")
            .env_remove("DRV_TMPDIR")
            .env_remove("DRV_BATCH_SIZE_LIMIT");
        Self { cmd, _scratch: Some(scratch) }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn arg(mut self, arg: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.arg(arg);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Run and require exit status 0.
    pub fn passes(mut self) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output::from(output);
        if out.code != Some(0) {
            panic!("expected success, got {:?}\nstderr:\n{}", out.code, out.stderr);
        }
        out
    }

    /// Run and require exit status `code`.
    pub fn fails_with(mut self, code: i32) -> Output {
        let output = self.cmd.output().unwrap();
        let out = Output::from(output);
        if out.code != Some(code) {
            panic!("expected exit {code}, got {:?}\nstdout:\n{}", out.code, out.stdout);
        }
        out
    }
}

pub struct Output {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for Output {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl Output {
    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}

/// A scratch directory holding plan and config files.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }
}

pub const DRIVER: &str = "/opt/swift/bin/swift-frontend";

/// Two sources compiled per file and linked into `app` on Linux.
pub const LINUX_APP: &str = r#"{
  "target": "x86_64-unknown-linux-gnu",
  "driver": "/opt/swift/bin/swift-frontend",
  "module_name": "App",
  "inputs": ["a.swift", "b.swift"],
  "steps": [
    { "name": "compile-a", "kind": "compile", "inputs": ["a.swift"], "output_type": "object",
      "outputs": [{ "input": "a.swift", "primary": "a.o",
                    "supplementary": { "swift-dependencies": "a.swiftdeps" } }] },
    { "name": "compile-b", "kind": "compile", "inputs": ["b.swift"], "output_type": "object",
      "outputs": [{ "input": "b.swift", "primary": "b.o",
                    "supplementary": { "swift-dependencies": "b.swiftdeps" } }] },
    { "name": "link", "kind": "link", "inputs": ["compile-a", "compile-b"],
      "output_type": "image", "outputs": [{ "primary": "app" }] }
  ]
}"#;

/// `drv jobs` over `plan`, with list files under a fixed directory.
pub fn jobs(project: &Project, plan: &Path) -> Cli {
    cli().current_dir(project.path()).arg("jobs").arg(plan).args(&["--temp-dir", "/tmp/drv-jobs"])
}
