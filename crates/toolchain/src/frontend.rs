// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Default builders for jobs run by the frontend itself.

use drv_core::{FileType, ListFileCategory, ListFileRequest};

use crate::invocation::InvocationInfo;
use crate::job_context::JobContext;
use crate::toolchain::SWIFT_EXECUTABLE_NAME;

/// Flags every frontend job receives: target, search paths, code generation
/// options and pass-through flags.
pub fn add_common_frontend_args(ctx: &JobContext<'_>, inv: &mut InvocationInfo) {
    let args = ctx.args();
    inv.arg("-target").arg(ctx.toolchain.triple().to_string());
    if let Some(cpu) = &args.target_cpu {
        inv.arg("-target-cpu").arg(cpu);
    }
    if let Some(sdk) = &args.sdk {
        inv.arg("-sdk").arg(sdk);
    }
    if let Some(dir) = &args.resource_dir {
        inv.arg("-resource-dir").arg(dir);
    }
    inv.flag_each("-I", &args.import_paths);
    inv.flag_each("-F", &args.framework_paths);
    inv.flag_each("-Fsystem", &args.system_framework_paths);
    if let Some(dir) = &args.module_cache_path {
        inv.arg("-module-cache-path").arg(dir);
    }
    inv.flag_each("-D", &args.defines);
    if args.debug_info {
        inv.arg("-g");
    }
    if let Some(level) = &args.opt_level {
        inv.arg(level);
    }
    if args.enable_testing {
        inv.arg("-enable-testing");
    }
    if args.color_diagnostics {
        inv.arg("-color-diagnostics");
    }
    if args.profile_generate {
        inv.arg("-profile-generate");
    }
    if args.has_sanitizers() {
        inv.arg(format!("-sanitize={}", args.sanitizers.join(",")));
    }
    if let Some(header) = &args.import_objc_header {
        inv.arg("-import-objc-header").arg(header);
    }
    inv.flag_each("-Xcc", &args.clang_flags);
    // -Xfrontend values are already frontend flags
    inv.args(&args.frontend_flags);
}

fn add_module_name(ctx: &JobContext<'_>, inv: &mut InvocationInfo) {
    inv.arg("-module-name").arg(&ctx.output_info.module_name);
}

pub fn compile(ctx: &JobContext<'_>) -> InvocationInfo {
    let args = ctx.args();
    let mut inv = InvocationInfo::new(SWIFT_EXECUTABLE_NAME);
    inv.arg("-frontend").arg(ctx.frontend_action_flag());
    inv.arg("-frontend-mode").arg(ctx.compute_frontend_mode_for_compile().as_str());
    ctx.add_frontend_input_and_output_arguments(&mut inv);
    add_common_frontend_args(ctx, &mut inv);
    if args.parse_sil {
        inv.arg("-parse-sil");
    }
    if args.parse_as_library {
        inv.arg("-parse-as-library");
    }
    if let Some(store) = &args.index_store_path {
        inv.arg("-index-store-path").arg(store);
    }
    if let Some(index) = ctx.output.index_file_path() {
        inv.arg("-index-file").arg("-index-file-path").arg(index);
    }
    add_module_name(ctx, &mut inv);
    inv
}

pub fn interpret(ctx: &JobContext<'_>) -> InvocationInfo {
    let args = ctx.args();
    let mut inv = InvocationInfo::new(SWIFT_EXECUTABLE_NAME);
    inv.arg("-frontend").arg("-interpret");
    let sources = ctx.input_actions.iter().filter(|a| a.file_type.is_part_of_swift_compilation());
    inv.args(sources.map(|a| a.path.as_str()));
    add_common_frontend_args(ctx, &mut inv);
    if args.parse_sil {
        inv.arg("-parse-sil");
    }
    add_module_name(ctx, &mut inv);
    for lib in &args.link_libraries {
        inv.arg(format!("-l{lib}"));
    }
    inv.flag_each("-framework", &args.frameworks);
    // arguments for the interpreted program come last
    if !args.immediate_args.is_empty() {
        inv.arg("--").args(&args.immediate_args);
    }
    inv
}

pub fn backend(ctx: &JobContext<'_>) -> InvocationInfo {
    let mut inv = InvocationInfo::new(SWIFT_EXECUTABLE_NAME);
    inv.arg("-frontend").arg(ctx.frontend_action_flag());
    inv.flag_each("-primary-file", ctx.inputs_of_type(FileType::LlvmBc));
    add_common_frontend_args(ctx, &mut inv);
    add_module_name(ctx, &mut inv);
    inv.flag_each("-o", ctx.output.primary_output_filenames());
    inv
}

/// Supplementary outputs a merge-module job can write, with their flags.
const MERGE_MODULE_OUTPUT_FLAGS: &[(FileType, &str)] = &[
    (FileType::SwiftDoc, "-emit-module-doc-path"),
    (FileType::SwiftSourceInfo, "-emit-module-source-info-path"),
    (FileType::SwiftInterface, "-emit-module-interface-path"),
    (FileType::SerializedDiagnostics, "-serialize-diagnostics-path"),
    (FileType::ObjcHeader, "-emit-objc-header-path"),
    (FileType::Tbd, "-emit-tbd-path"),
];

pub fn merge_module(ctx: &JobContext<'_>) -> InvocationInfo {
    let mut inv = InvocationInfo::new(SWIFT_EXECUTABLE_NAME);
    inv.arg("-frontend").arg("-merge-modules").arg("-emit-module");
    if ctx.should_use_merge_module_input_file_list() {
        let path = ctx.temp_path("inputs", "");
        inv.arg("-filelist").arg(path.clone());
        inv.filelist(ListFileRequest::new(
            path,
            FileType::SwiftModule,
            ListFileCategory::MergeModuleInputs,
        ));
    } else {
        inv.args(ctx.inputs_of_type(FileType::SwiftModule));
    }
    add_common_frontend_args(ctx, &mut inv);
    add_module_name(ctx, &mut inv);
    for (ty, flag) in MERGE_MODULE_OUTPUT_FLAGS {
        inv.flag_each(flag, ctx.output.additional_outputs_for_type(*ty));
    }
    inv.arg("-parse-as-library");
    inv.flag_each("-o", ctx.output.primary_output_filenames());
    inv
}

pub fn module_wrap(ctx: &JobContext<'_>) -> InvocationInfo {
    let mut inv = InvocationInfo::new(SWIFT_EXECUTABLE_NAME);
    inv.arg("-modulewrap");
    inv.args(ctx.inputs_of_type(FileType::SwiftModule));
    inv.arg("-target").arg(ctx.toolchain.triple().to_string());
    inv.flag_each("-o", ctx.output.primary_output_filenames());
    inv
}

/// Frontend arguments shared by both REPL flavors.
fn repl_frontend_args(ctx: &JobContext<'_>) -> InvocationInfo {
    let mut inv = InvocationInfo::new(SWIFT_EXECUTABLE_NAME);
    add_common_frontend_args(ctx, &mut inv);
    add_module_name(ctx, &mut inv);
    for lib in &ctx.args().link_libraries {
        inv.arg(format!("-l{lib}"));
    }
    inv.flag_each("-framework", &ctx.args().frameworks);
    inv
}

pub fn integrated_repl(ctx: &JobContext<'_>) -> InvocationInfo {
    let mut inv = InvocationInfo::new(SWIFT_EXECUTABLE_NAME);
    inv.arg("-frontend").arg("-repl");
    inv.args(repl_frontend_args(ctx).arguments);
    inv
}

/// LLDB takes the frontend arguments as a single `--repl=` value.
pub fn lldb_repl(ctx: &JobContext<'_>) -> InvocationInfo {
    let frontend = repl_frontend_args(ctx).arguments.join(" ");
    let mut inv = InvocationInfo::new("lldb");
    inv.arg(format!("--repl={frontend}"));
    inv
}

pub fn generate_pch(persistent_dir: Option<&str>, ctx: &JobContext<'_>) -> InvocationInfo {
    let mut inv = InvocationInfo::new(SWIFT_EXECUTABLE_NAME);
    inv.arg("-frontend");
    add_common_frontend_args(ctx, &mut inv);
    inv.args(ctx.inputs_of_type(FileType::ObjcHeader));
    if let Some(store) = &ctx.args().index_store_path {
        inv.arg("-index-store-path").arg(store);
    }
    inv.arg("-emit-pch");
    match persistent_dir {
        Some(dir) => {
            inv.arg("-pch-output-dir").arg(dir);
        }
        None => {
            inv.flag_each("-o", ctx.output.primary_output_filename());
        }
    }
    inv
}

#[cfg(test)]
#[path = "frontend_tests.rs"]
mod tests;
