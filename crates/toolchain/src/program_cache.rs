// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Memoized lookup of auxiliary tool paths.
//!
//! One cache per toolchain. Entries are never invalidated, so a name resolves
//! to the same answer for the toolchain's whole lifetime.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use smol_str::SmolStr;

/// Result of searching for a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramLookup {
    Found(PathBuf),
    /// Searched and absent; callers fall back to the bare name.
    NotFound,
}

impl ProgramLookup {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ProgramLookup::Found(path) => Some(path),
            ProgramLookup::NotFound => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ProgramCache {
    entries: Mutex<HashMap<SmolStr, ProgramLookup>>,
}

impl ProgramCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached answer for `name`, running `search` on a miss.
    ///
    /// The lock is held across `search`, so concurrent callers asking for the
    /// same name wait for the first search instead of repeating it.
    pub fn resolve(
        &self,
        name: &str,
        search: impl FnOnce(&str) -> Option<PathBuf>,
    ) -> ProgramLookup {
        let mut entries = self.entries.lock();
        if let Some(hit) = entries.get(name) {
            return hit.clone();
        }
        let lookup = match search(name) {
            Some(path) => ProgramLookup::Found(path),
            None => ProgramLookup::NotFound,
        };
        tracing::debug!(program = name, found = ?lookup.path(), "program cache miss");
        entries.insert(SmolStr::new(name), lookup.clone());
        lookup
    }

    pub fn get(&self, name: &str) -> Option<ProgramLookup> {
        self.entries.lock().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// First `dir/name` that is an existing file.
pub fn find_in_dirs<'a>(name: &str, dirs: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    dirs.into_iter().map(|dir| dir.join(name)).find(|candidate| candidate.is_file())
}

#[cfg(test)]
#[path = "program_cache_tests.rs"]
mod tests;
