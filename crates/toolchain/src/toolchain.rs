// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The toolchain contract: one invocation builder per job action kind.
//!
//! Every builder except [`ToolChain::link_invocation`] has a working default.
//! Platforms override what they need; linking always needs platform knowledge.

use std::path::{Path, PathBuf};

use drv_core::{CommandOutput, FileType, JobActionKind, ReplMode, Triple};

use crate::env;
use crate::frontend;
use crate::invocation::InvocationInfo;
use crate::job_context::JobContext;
use crate::paths;
use crate::program_cache::{find_in_dirs, ProgramCache, ProgramLookup};

/// Names the frontend itself; resolves to the driver's configured path.
pub const SWIFT_EXECUTABLE_NAME: &str = "swift";

/// State every toolchain carries: where the frontend lives, the target, and
/// the program caches.
#[derive(Debug)]
pub struct ToolChainBase {
    driver_path: PathBuf,
    triple: Triple,
    /// Driver-relative lookups.
    cache: ProgramCache,
    /// Final answers of [`resolve_executable`], search path included.
    executables: ProgramCache,
    search_path: Vec<PathBuf>,
}

impl ToolChainBase {
    /// `driver_path` is the frontend binary; sibling tools are searched for in
    /// its directory. `PATH` is read once, here.
    pub fn new(driver_path: impl Into<PathBuf>, triple: Triple) -> Self {
        Self::with_search_path(driver_path, triple, env::search_path())
    }

    pub fn with_search_path(
        driver_path: impl Into<PathBuf>,
        triple: Triple,
        search_path: Vec<PathBuf>,
    ) -> Self {
        Self {
            driver_path: driver_path.into(),
            triple,
            cache: ProgramCache::new(),
            executables: ProgramCache::new(),
            search_path,
        }
    }
}

pub trait ToolChain: Send + Sync {
    fn base(&self) -> &ToolChainBase;

    fn link_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo;

    fn driver_path(&self) -> &Path {
        &self.base().driver_path
    }

    fn triple(&self) -> &Triple {
        &self.base().triple
    }

    fn program_cache(&self) -> &ProgramCache {
        &self.base().cache
    }

    fn executable_cache(&self) -> &ProgramCache {
        &self.base().executables
    }

    /// Directories searched after the driver's own directory.
    fn search_path(&self) -> &[PathBuf] {
        &self.base().search_path
    }

    fn compile_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        frontend::compile(ctx)
    }

    fn interpret_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        let mut inv = frontend::interpret(ctx);
        inv.extra_environment.extend(self.runtime_environment(ctx));
        inv
    }

    fn backend_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        frontend::backend(ctx)
    }

    fn merge_module_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        frontend::merge_module(ctx)
    }

    fn module_wrap_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        frontend::module_wrap(ctx)
    }

    fn repl_invocation(&self, mode: ReplMode, ctx: &JobContext<'_>) -> InvocationInfo {
        let use_lldb = match mode {
            ReplMode::Integrated => false,
            ReplMode::RequireLldb => true,
            ReplMode::PreferLldb => self.find_program_relative_to_driver("lldb").is_some(),
        };
        if use_lldb {
            frontend::lldb_repl(ctx)
        } else {
            frontend::integrated_repl(ctx)
        }
    }

    fn generate_dsym_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        let mut inv = InvocationInfo::new("dsymutil");
        inv.args(ctx.inputs_of_type(FileType::Image));
        inv.flag_each("-o", ctx.output.primary_output_filename());
        inv
    }

    fn verify_debug_info_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        let mut inv = InvocationInfo::new("dwarfdump");
        inv.args(["--verify", "--debug-info", "--eh-frame", "--quiet"]);
        inv.args(ctx.inputs_of_type(FileType::Image));
        inv
    }

    fn generate_pch_invocation(
        &self,
        persistent_dir: Option<&str>,
        ctx: &JobContext<'_>,
    ) -> InvocationInfo {
        frontend::generate_pch(persistent_dir, ctx)
    }

    fn autolink_extract_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        let mut inv = InvocationInfo::new("swift-autolink-extract");
        inv.args(ctx.inputs_of_type(FileType::Object));
        inv.flag_each("-o", ctx.output.primary_output_filename());
        inv
    }

    /// Where to look for `name` next to the driver. Platforms may widen it.
    fn find_program_relative_to_driver_impl(&self, name: &str) -> Option<PathBuf> {
        let dir = self.driver_path().parent()?;
        find_in_dirs(name, [dir])
    }

    /// Cached search for a sibling tool of the driver.
    fn find_program_relative_to_driver(&self, name: &str) -> Option<PathBuf> {
        let lookup = self
            .program_cache()
            .resolve(name, |name| self.find_program_relative_to_driver_impl(name));
        match lookup {
            ProgramLookup::Found(path) => Some(path),
            ProgramLookup::NotFound => None,
        }
    }

    fn lookup_type_for_extension(&self, ext: &str) -> FileType {
        FileType::from_extension(ext)
    }

    /// Whether the clang runtime for `sanitizer` exists for this target.
    fn sanitizer_runtime_lib_exists(
        &self,
        _ctx: &JobContext<'_>,
        _sanitizer: &str,
        _shared: bool,
    ) -> bool {
        false
    }

    /// Environment an interpreted program needs to find its runtime libraries.
    ///
    /// Built from `-L` paths and the runtime library directories only; the
    /// driver's own environment is left to the executor.
    fn runtime_environment(&self, ctx: &JobContext<'_>) -> Vec<(String, String)> {
        let mut dirs: Vec<String> = ctx.args().library_paths.clone();
        dirs.extend(paths::runtime_library_paths(self, ctx.args(), true));
        if dirs.is_empty() {
            return Vec::new();
        }
        vec![("LD_LIBRARY_PATH".to_string(), dirs.join(":"))]
    }
}

/// Dispatch to the one builder for `ctx.kind`.
pub fn construct_invocation(tc: &dyn ToolChain, ctx: &JobContext<'_>) -> InvocationInfo {
    match ctx.kind {
        JobActionKind::Compile => tc.compile_invocation(ctx),
        JobActionKind::Interpret => tc.interpret_invocation(ctx),
        JobActionKind::Backend => tc.backend_invocation(ctx),
        JobActionKind::MergeModule => tc.merge_module_invocation(ctx),
        JobActionKind::ModuleWrap => tc.module_wrap_invocation(ctx),
        JobActionKind::Repl { mode } => tc.repl_invocation(*mode, ctx),
        JobActionKind::GenerateDsym => tc.generate_dsym_invocation(ctx),
        JobActionKind::VerifyDebugInfo => tc.verify_debug_info_invocation(ctx),
        JobActionKind::GeneratePch { persistent_dir } => {
            tc.generate_pch_invocation(persistent_dir.as_deref(), ctx)
        }
        JobActionKind::AutolinkExtract => tc.autolink_extract_invocation(ctx),
        JobActionKind::Link { .. } => tc.link_invocation(ctx),
    }
}

/// Resolve a builder's program name to what the job should execute.
///
/// The frontend name maps to the driver path. Other tools are looked for
/// next to the driver, then on the search path; if both fail the bare name is
/// returned for the executor to resolve or report. Each name is searched, and
/// a miss logged, once per toolchain.
pub fn resolve_executable(tc: &dyn ToolChain, name: &str) -> String {
    if name == SWIFT_EXECUTABLE_NAME {
        return tc.driver_path().to_string_lossy().into_owned();
    }
    let lookup = tc.executable_cache().resolve(name, |name| {
        let found = tc
            .find_program_relative_to_driver(name)
            .or_else(|| find_in_dirs(name, tc.search_path().iter().map(PathBuf::as_path)));
        if found.is_none() {
            tracing::warn!(program = name, "tool not found, using bare name");
        }
        found
    });
    match lookup {
        ProgramLookup::Found(path) => path.to_string_lossy().into_owned(),
        ProgramLookup::NotFound => name.to_string(),
    }
}

/// For an index-data job only the index-file path may be primary; every
/// other job may treat any input as primary.
pub fn can_compile_input_argument_be_primary(output: &CommandOutput, arg: &str) -> bool {
    output.primary_output_type() != FileType::IndexData || output.index_file_path() == Some(arg)
}

#[cfg(test)]
#[path = "toolchain_tests.rs"]
mod tests;
