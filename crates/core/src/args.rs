// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed view of the parsed driver options.
//!
//! Option parsing happens upstream; this is the read-only argument model the
//! invocation builders consult. Field order within each list is the order the
//! user wrote the options in and is preserved when forwarding.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArgList {
    /// `-driver-use-filelists`: use list files for every category regardless of size.
    pub driver_use_filelists: bool,
    /// `-O`, `-Onone`, `-Osize`, ... forwarded verbatim.
    pub opt_level: Option<String>,
    /// `-g`
    pub debug_info: bool,
    /// `-sdk`
    pub sdk: Option<String>,
    /// `-resource-dir`
    pub resource_dir: Option<String>,
    /// `-module-cache-path`
    pub module_cache_path: Option<String>,
    /// `-I`
    pub import_paths: Vec<String>,
    /// `-F`
    pub framework_paths: Vec<String>,
    /// `-Fsystem`
    pub system_framework_paths: Vec<String>,
    /// `-L`
    pub library_paths: Vec<String>,
    /// `-l`
    pub link_libraries: Vec<String>,
    /// `-framework`
    pub frameworks: Vec<String>,
    /// `-D`
    pub defines: Vec<String>,
    /// `-Xfrontend`
    pub frontend_flags: Vec<String>,
    /// `-Xcc`
    pub clang_flags: Vec<String>,
    /// `-Xlinker`
    pub linker_flags: Vec<String>,
    /// `-Xclang-linker`
    pub clang_linker_flags: Vec<String>,
    /// `-sanitize=` values, e.g. `address`, `thread`.
    pub sanitizers: Vec<String>,
    /// `-use-ld`
    pub use_ld: Option<String>,
    /// `-tools-directory`
    pub tools_directory: Option<String>,
    /// `-static-stdlib`
    pub static_stdlib: bool,
    /// `-static-executable`
    pub static_executable: bool,
    /// `-import-objc-header`
    pub import_objc_header: Option<String>,
    /// `-index-store-path`
    pub index_store_path: Option<String>,
    /// `-parse-sil`
    pub parse_sil: bool,
    /// `-parse-as-library`
    pub parse_as_library: bool,
    /// `-enable-testing`
    pub enable_testing: bool,
    /// `-profile-generate`
    pub profile_generate: bool,
    /// `-v`
    pub verbose: bool,
    /// `-target-cpu`
    pub target_cpu: Option<String>,
    /// `-color-diagnostics`
    pub color_diagnostics: bool,
    /// Arguments after `--`, passed to an interpreted program.
    pub immediate_args: Vec<String>,
}

impl ArgList {
    /// True if any sanitizer was requested.
    pub fn has_sanitizers(&self) -> bool {
        !self.sanitizers.is_empty()
    }

    /// Whether the standard library is linked statically, either on its own
    /// or as part of a fully static executable.
    pub fn links_stdlib_statically(&self) -> bool {
        self.static_stdlib || self.static_executable
    }
}
