// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Linux, FreeBSD and other ELF targets, linked through `clang++`.

use std::path::{Path, PathBuf};

use drv_core::{FileType, JobActionKind, LinkKind, ListFileCategory, ListFileRequest, Triple};

use crate::invocation::InvocationInfo;
use crate::job_context::JobContext;
use crate::paths::{self, display};
use crate::program_cache::find_in_dirs;
use crate::toolchain::{ToolChain, ToolChainBase};

use super::sanitizer_runtime_name;

#[derive(Debug)]
pub struct GenericUnix {
    base: ToolChainBase,
}

impl GenericUnix {
    pub fn new(base: ToolChainBase) -> Self {
        Self { base }
    }

    /// `gold` where the system linker is known to mishandle Swift metadata.
    fn default_linker(&self) -> Option<&'static str> {
        match self.triple().arch_name() {
            "arm" | "armeb" | "armv7" | "thumb" | "thumbeb" | "aarch64" => Some("gold"),
            "x86_64" | "ppc64" | "ppc64le" | "s390x" | "systemz" => Some("gold"),
            _ => None,
        }
    }

    fn should_provide_rpath_to_linker(&self) -> bool {
        true
    }

    fn archive_invocation(&self, ctx: &JobContext<'_>) -> InvocationInfo {
        let mut inv = InvocationInfo::new("ar");
        inv.arg("crs");
        inv.args(ctx.output.primary_output_filename());
        if ctx.should_use_link_input_file_list() {
            let path = ctx.temp_path("inputs", "LinkFileList");
            inv.arg(format!("@{path}"));
            inv.filelist(ListFileRequest::new(path, FileType::Object, ListFileCategory::LinkInputs));
        } else {
            inv.args(ctx.link_inputs());
        }
        inv
    }
}

fn triple_has_pie(triple: &Triple) -> bool {
    triple.is_linux()
}

impl ToolChain for GenericUnix {
    fn base(&self) -> &ToolChainBase {
        &self.base
    }

    fn sanitizer_runtime_lib_exists(
        &self,
        ctx: &JobContext<'_>,
        sanitizer: &str,
        _shared: bool,
    ) -> bool {
        let name = format!(
            "libclang_rt.{}-{}.a",
            sanitizer_runtime_name(sanitizer),
            self.triple().arch_name()
        );
        paths::clang_library_path(self, ctx.args()).join(name).exists()
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
        let mut inv = InvocationInfo::new("clang++");

        if link == LinkKind::DynamicLibrary {
            inv.arg("-shared");
        }
        if let Some(linker) = args.use_ld.as_deref().or(self.default_linker()) {
            inv.arg(format!("-fuse-ld={linker}"));
        }
        if let Some(tools) = &args.tools_directory {
            if let Some(clang) = find_in_dirs("clang++", [Path::new(tools)]) {
                inv.executable_name = display(&clang);
            }
            inv.arg("-B").arg(tools);
        }
        if triple_has_pie(triple) && link == LinkKind::Executable {
            inv.arg("-pie");
        }

        let shared = !args.links_stdlib_statically();
        let runtime_dirs = paths::runtime_library_paths(self, args, shared);
        if !args.static_executable && self.should_provide_rpath_to_linker() {
            for dir in &runtime_dirs {
                inv.args(["-Xlinker", "-rpath", "-Xlinker"]).arg(dir);
            }
        }

        let resource = paths::resource_dir(self, args, shared);
        inv.arg(display(&resource.join(triple.major_architecture_name()).join("swiftrt.o")));

        if ctx.should_use_link_input_file_list() {
            let path = ctx.temp_path("inputs", "LinkFileList");
            inv.arg(format!("@{path}"));
            inv.filelist(ListFileRequest::new(path, FileType::Object, ListFileCategory::LinkInputs));
        } else {
            inv.args(ctx.link_inputs());
        }

        inv.flag_each("-F", &args.framework_paths);
        inv.flag_each("-iframework", &args.system_framework_paths);
        if let Some(sdk) = &args.sdk {
            inv.arg("--sysroot").arg(sdk);
        }

        for job in &ctx.inputs {
            if job.output.primary_output_type() == FileType::AutolinkFile {
                for file in job.output.primary_output_filenames() {
                    inv.arg(format!("@{file}"));
                }
            }
        }

        inv.flag_each("-L", &runtime_dirs);

        let static_dir = paths::resource_dir(self, args, false);
        let link_file = if args.static_executable {
            Some(static_dir.join("static-executable-args.lnk"))
        } else if args.static_stdlib {
            Some(static_dir.join("static-stdlib-args.lnk"))
        } else {
            inv.arg("-lswiftCore");
            None
        };
        if let Some(link_file) = link_file {
            if link_file.is_file() {
                inv.arg(format!("@{}", display(&link_file)));
            } else {
                tracing::warn!(path = %link_file.display(), "static link file not found");
            }
        }

        inv.arg(format!("--target={triple}"));

        if link == LinkKind::Executable && args.has_sanitizers() {
            let available: Vec<&str> = args
                .sanitizers
                .iter()
                .map(String::as_str)
                .filter(|san| {
                    let found = self.sanitizer_runtime_lib_exists(ctx, san, false);
                    if !found {
                        tracing::warn!(sanitizer = %san, "sanitizer runtime not found");
                    }
                    found
                })
                .collect();
            if !available.is_empty() {
                inv.arg(format!("-fsanitize={}", available.join(",")));
                if available.contains(&"thread") {
                    inv.args(["-lBlocksRuntime", "-ldispatch"]);
                }
            }
        }

        if args.profile_generate {
            let profile: PathBuf = paths::clang_library_path(self, args)
                .join(format!("libclang_rt.profile-{}.a", triple.arch_name()));
            inv.arg(display(&profile)).arg("-u__llvm_profile_runtime");
        }

        if args.verbose {
            inv.arg("-v");
        }

        inv.flag_each("-L", &args.library_paths);
        for lib in &args.link_libraries {
            inv.arg(format!("-l{lib}"));
        }
        inv.flag_each("-Xlinker", &args.linker_flags);
        inv.args(&args.clang_linker_flags);

        inv.flag_each("-o", ctx.output.primary_output_filename());
        inv
    }
}

#[cfg(test)]
#[path = "unix_tests.rs"]
mod tests;
