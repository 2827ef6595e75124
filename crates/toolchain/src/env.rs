// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the toolchain crate.
//!
//! Unparseable values are treated as unset.

use std::path::PathBuf;

/// List-file threshold override (`DRV_FILELIST_THRESHOLD`); zero is ignored.
pub fn filelist_threshold() -> Option<usize> {
    std::env::var("DRV_FILELIST_THRESHOLD")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Force list files for every category (`DRV_FORCE_FILELISTS=1|true`).
pub fn force_filelists() -> Option<bool> {
    std::env::var("DRV_FORCE_FILELISTS").ok().and_then(|s| match s.as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    })
}

/// Directory for session temporary files (`DRV_TMPDIR`).
pub fn temp_dir() -> Option<PathBuf> {
    std::env::var("DRV_TMPDIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Maximum primaries per batch job (`DRV_BATCH_SIZE_LIMIT`); zero is ignored.
pub fn batch_size_limit() -> Option<usize> {
    std::env::var("DRV_BATCH_SIZE_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// Executable search path (`PATH`).
pub fn search_path() -> Vec<PathBuf> {
    std::env::var_os("PATH").map(|p| std::env::split_paths(&p).collect()).unwrap_or_default()
}
