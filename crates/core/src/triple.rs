// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target triple: `arch-vendor-os[-environment]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripleError {
    #[error("target triple is empty")]
    Empty,
    #[error("target triple '{0}' needs at least an architecture and an OS")]
    MissingOs(String),
}

/// A parsed target description. Read-only once handed to a toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    arch: String,
    vendor: String,
    /// OS component including any version suffix, e.g. `macosx10.15`.
    os: String,
    environment: Option<String>,
}

impl Triple {
    pub fn arch_name(&self) -> &str {
        &self.arch
    }

    pub fn vendor_name(&self) -> &str {
        &self.vendor
    }

    /// OS name with any trailing version stripped (`macosx10.15` → `macosx`).
    pub fn os_name(&self) -> &str {
        let end = self.os.find(|c: char| c.is_ascii_digit()).unwrap_or(self.os.len());
        &self.os[..end]
    }

    /// Version suffix of the OS component, if any (`macosx10.15` → `10.15`).
    pub fn os_version(&self) -> Option<&str> {
        let start = self.os.find(|c: char| c.is_ascii_digit())?;
        Some(&self.os[start..])
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    pub fn is_darwin(&self) -> bool {
        matches!(self.os_name(), "macosx" | "macos" | "darwin" | "ios" | "tvos" | "watchos")
    }

    pub fn is_macos(&self) -> bool {
        matches!(self.os_name(), "macosx" | "macos" | "darwin")
    }

    pub fn is_linux(&self) -> bool {
        self.os_name() == "linux"
    }

    pub fn is_simulator(&self) -> bool {
        self.environment() == Some("simulator")
            || (self.is_darwin() && !self.is_macos() && self.arch.starts_with("x86"))
    }

    /// Directory name used for this platform's runtime libraries.
    pub fn platform_name(&self) -> &'static str {
        match self.os_name() {
            "macosx" | "macos" | "darwin" => "macosx",
            "ios" if self.is_simulator() => "iphonesimulator",
            "ios" => "iphoneos",
            "tvos" if self.is_simulator() => "appletvsimulator",
            "tvos" => "appletvos",
            "watchos" if self.is_simulator() => "watchsimulator",
            "watchos" => "watchos",
            "linux" if self.environment().is_some_and(|e| e.starts_with("android")) => "android",
            "linux" => "linux",
            "freebsd" => "freebsd",
            "windows" if self.environment() == Some("cygnus") => "cygwin",
            "windows" => "windows",
            "haiku" => "haiku",
            _ => "none",
        }
    }

    /// Suffix used in the names of Darwin sanitizer runtimes
    /// (`libclang_rt.asan_osx_dynamic.dylib`).
    pub fn darwin_library_suffix(&self) -> &'static str {
        match self.platform_name() {
            "iphoneos" => "ios",
            "iphonesimulator" => "iossim",
            "appletvos" => "tvos",
            "appletvsimulator" => "tvossim",
            "watchos" => "watchos",
            "watchsimulator" => "watchossim",
            _ => "osx",
        }
    }

    /// Architecture directory name used inside the resource directory.
    pub fn major_architecture_name(&self) -> &str {
        match self.arch.as_str() {
            "armv7" | "armv7s" | "armv7k" | "thumbv7" => "armv7",
            "armv6" | "thumbv6" => "armv6",
            "arm64" => "arm64",
            other => other,
        }
    }

    pub fn is_arm(&self) -> bool {
        self.arch.starts_with("arm") || self.arch.starts_with("thumb") || self.arch == "aarch64"
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.arch, self.vendor, self.os)?;
        if let Some(env) = &self.environment {
            write!(f, "-{}", env)?;
        }
        Ok(())
    }
}

impl FromStr for Triple {
    type Err = TripleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TripleError::Empty);
        }
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [arch, vendor, os] => Ok(Triple {
                arch: arch.to_string(),
                vendor: vendor.to_string(),
                os: os.to_string(),
                environment: None,
            }),
            [arch, vendor, os, env @ ..] if !env.is_empty() => Ok(Triple {
                arch: arch.to_string(),
                vendor: vendor.to_string(),
                os: os.to_string(),
                environment: Some(env.join("-")),
            }),
            // `arch-os` shorthand
            [arch, os] if !os.is_empty() => Ok(Triple {
                arch: arch.to_string(),
                vendor: "unknown".to_string(),
                os: os.to_string(),
                environment: None,
            }),
            _ => Err(TripleError::MissingOs(s.to_string())),
        }
    }
}

impl Serialize for Triple {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Triple {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "triple_tests.rs"]
mod tests;
