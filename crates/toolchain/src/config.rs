// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Driver configuration: a TOML file overlaid by `DRV_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::env;

/// Member count above which an argument category moves into a list file.
pub const TOO_MANY_FILES: usize = 128;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{key} must be at least 1")]
    NotPositive { key: &'static str },
}

/// All keys are optional.
///
/// ```toml
/// filelist_threshold = 64
/// force_filelists = false
/// temp_dir = "/tmp/drv"
/// batch_size_limit = 25
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    pub filelist_threshold: usize,
    pub force_filelists: bool,
    pub temp_dir: Option<PathBuf>,
    pub batch_size_limit: Option<usize>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            filelist_threshold: TOO_MANY_FILES,
            force_filelists: false,
            temp_dir: None,
            batch_size_limit: None,
        }
    }
}

impl DriverConfig {
    drv_core::setters! {
        set {
            filelist_threshold: usize,
            force_filelists: bool,
        }
        option {
            temp_dir: PathBuf,
            batch_size_limit: usize,
        }
    }

    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml(&text, path)
    }

    /// Load `path` if given, else defaults, then apply environment overrides.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = env::filelist_threshold() {
            self.filelist_threshold = n;
        }
        if let Some(force) = env::force_filelists() {
            self.force_filelists = force;
        }
        if let Some(dir) = env::temp_dir() {
            self.temp_dir = Some(dir);
        }
        if let Some(n) = env::batch_size_limit() {
            self.batch_size_limit = Some(n);
        }
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.filelist_threshold == 0 {
            return Err(ConfigError::NotPositive { key: "filelist_threshold" });
        }
        if self.batch_size_limit == Some(0) {
            return Err(ConfigError::NotPositive { key: "batch_size_limit" });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
