// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Apple platforms, linked directly with `ld`.

use std::path::Path;

use drv_core::{FileType, JobActionKind, LinkKind, ListFileCategory, ListFileRequest, OutputMode};

use crate::invocation::InvocationInfo;
use crate::job_context::JobContext;
use crate::paths::{self, display};
use crate::program_cache::find_in_dirs;
use crate::toolchain::{ToolChain, ToolChainBase};

use super::sanitizer_runtime_name;

#[derive(Debug)]
pub struct Darwin {
    base: ToolChainBase,
}

impl Darwin {
    pub fn new(base: ToolChainBase) -> Self {
        Self { base }
    }

    /// Linker flag and version for the minimum deployment target.
    fn deployment_target(&self) -> (&'static str, String) {
        let triple = self.triple();
        let sim = triple.is_simulator();
        let (flag, default) = match triple.os_name() {
            "ios" if sim => ("-ios_simulator_version_min", "7.0.0"),
            "ios" => ("-ios_version_min", "7.0.0"),
            "tvos" if sim => ("-tvos_simulator_version_min", "9.0.0"),
            "tvos" => ("-tvos_version_min", "9.0.0"),
            "watchos" if sim => ("-watchos_simulator_version_min", "2.0.0"),
            "watchos" => ("-watchos_version_min", "2.0.0"),
            _ => ("-macosx_version_min", "10.9.0"),
        };
        let version = triple.os_version().map_or_else(|| default.to_string(), full_version);
        (flag, version)
    }

    fn archive_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        let mut inv = InvocationInfo::new("libtool");
        inv.arg("-static");
        if ctx.should_use_link_input_file_list() {
            let path = ctx.temp_path("inputs", "LinkFileList");
            inv.arg("-filelist").arg(path.clone());
            inv.filelist(ListFileRequest::new(path, FileType::Object, ListFileCategory::LinkInputs));
        } else {
            inv.args(ctx.link_inputs());
        }
        inv.flag_each("-o", ctx.output.primary_output_filename());
        inv
    }

    fn sanitizer_runtime_file(&self, sanitizer: &str, shared: bool) -> String {
        let suffix = self.triple().darwin_library_suffix();
        let name = sanitizer_runtime_name(sanitizer);
        if shared {
            format!("libclang_rt.{name}_{suffix}_dynamic.dylib")
        } else {
            format!("libclang_rt.{name}_{suffix}.a")
        }
    }
}

/// Pad `10.15` to `10.15.0`.
fn full_version(version: &str) -> String {
    let parts = version.split('.').count();
    let mut full = version.to_string();
    for _ in parts..3 {
        full.push_str(".0");
    }
    full
}

impl ToolChain for Darwin {
    fn base(&self) -> &ToolChainBase {
        &self.base
    }

    fn sanitizer_runtime_lib_exists(
        &self,
        ctx: &JobContext<'_>,
        sanitizer: &str,
        shared: bool,
    ) -> bool {
        paths::clang_library_path(self, ctx.args())
            .join(self.sanitizer_runtime_file(sanitizer, shared))
            .exists()
    }

    /// The dynamic loader reads `DYLD_*` rather than `LD_LIBRARY_PATH`.
    fn runtime_environment(&self, ctx: &JobContext<'_>) -> Vec<(String, String)> {
        let args = ctx.args();
        let mut env = Vec::new();
        let mut libs: Vec<String> = args.library_paths.clone();
        libs.extend(paths::runtime_library_paths(self, args, true));
        env.push(("DYLD_LIBRARY_PATH".to_string(), libs.join(":")));
        let frameworks: Vec<&str> = args
            .framework_paths
            .iter()
            .chain(&args.system_framework_paths)
            .map(String::as_str)
            .collect();
        if !frameworks.is_empty() {
            env.push(("DYLD_FRAMEWORK_PATH".to_string(), frameworks.join(":")));
        }
        env
    }

    fn link_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        let link = match ctx.kind {
            JobActionKind::Link { link } => *link,
            _ => LinkKind::Executable,
        };
        if link == LinkKind::StaticLibrary {
            return self.archive_invocation(ctx);
        }

        let args = ctx.args();
        let triple = self.triple();
        let mut inv = InvocationInfo::new("ld");
        if let Some(tools) = &args.tools_directory {
            if let Some(ld) = find_in_dirs("ld", [Path::new(tools)]) {
                inv.executable_name = display(&ld);
            }
        }
        if link == LinkKind::DynamicLibrary {
            inv.arg("-dylib");
        }

        if ctx.should_use_link_input_file_list() {
            let path = ctx.temp_path("inputs", "LinkFileList");
            inv.arg("-filelist").arg(path.clone());
            inv.filelist(ListFileRequest::new(path, FileType::Object, ListFileCategory::LinkInputs));
        } else {
            inv.args(ctx.link_inputs());
        }

        // Debuggers find module ASTs through the linked image.
        let modules: Vec<&str> = if ctx.output_info.compiler_mode == OutputMode::SingleCompile {
            ctx.inputs_of_type(FileType::SwiftModule)
        } else {
            ctx.inputs
                .iter()
                .filter(|job| job.output.primary_output_type() == FileType::SwiftModule)
                .flat_map(|job| job.output.primary_output_filenames())
                .chain(
                    ctx.input_actions
                        .iter()
                        .filter(|a| a.file_type == FileType::SwiftModule)
                        .map(|a| a.path.as_str()),
                )
                .collect()
        };
        inv.flag_each("-add_ast_path", modules);

        inv.flag_each("-F", args.framework_paths.iter().chain(&args.system_framework_paths));
        if let Some(sdk) = &args.sdk {
            inv.arg("-syslibroot").arg(sdk);
        }
        inv.args(["-lobjc", "-lSystem"]);
        inv.arg("-arch").arg(triple.arch_name());

        let runtime_dirs = paths::runtime_library_paths(self, args, true);
        inv.flag_each("-L", &runtime_dirs);

        for sanitizer in &args.sanitizers {
            if self.sanitizer_runtime_lib_exists(ctx, sanitizer, true) {
                let lib = paths::clang_library_path(self, args)
                    .join(self.sanitizer_runtime_file(sanitizer, true));
                inv.arg(display(&lib));
                inv.arg("-rpath").arg(display(&paths::clang_library_path(self, args)));
            } else {
                tracing::warn!(sanitizer = %sanitizer, "sanitizer runtime not found");
            }
        }

        if args.profile_generate {
            let profile = paths::clang_library_path(self, args)
                .join(format!("libclang_rt.profile_{}.a", triple.darwin_library_suffix()));
            inv.arg(display(&profile));
        }

        if !args.links_stdlib_statically() {
            inv.flag_each("-rpath", &runtime_dirs);
        }

        let (flag, version) = self.deployment_target();
        inv.arg(flag).arg(version);
        inv.arg("-no_objc_category_merging");

        inv.flag_each("-L", &args.library_paths);
        for lib in &args.link_libraries {
            inv.arg(format!("-l{lib}"));
        }
        inv.flag_each("-framework", &args.frameworks);
        inv.args(&args.linker_flags);

        inv.flag_each("-o", ctx.output.primary_output_filename());
        inv
    }
}

#[cfg(test)]
#[path = "darwin_tests.rs"]
mod tests;
