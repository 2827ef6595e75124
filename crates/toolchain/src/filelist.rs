// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What each list-file request should contain once written.
//!
//! Plain lists hold one path per line. The supplementary-output map is a
//! YAML mapping from each input to its outputs by type.

use drv_core::{Job, ListFileCategory, ListFileRequest, OutputMode};

use crate::compilation::Compilation;
use crate::job_context::JobContext;
use crate::toolchain::ToolChain;

/// Lines of the file `request` describes for `job`.
pub fn filelist_entries(
    tc: &dyn ToolChain,
    compilation: &Compilation,
    job: &Job,
    request: &ListFileRequest,
) -> Vec<String> {
    let output_info = if job.is_batch() {
        compilation.output_info().with_mode(OutputMode::BatchModeCompile)
    } else {
        compilation.output_info().clone()
    };
    let ctx = JobContext::resolve(
        compilation,
        tc,
        &job.kind,
        &job.inputs,
        &job.input_actions,
        &job.output,
        &output_info,
    );
    let owned = |paths: Vec<&str>| -> Vec<String> {
        paths.into_iter().map(str::to_string).collect()
    };
    match request.category {
        ListFileCategory::TopLevelInputs => ctx
            .top_level_input_files()
            .filter(|(ty, _)| ty.is_part_of_swift_compilation())
            .map(|(_, path)| path.to_string())
            .collect(),
        ListFileCategory::PrimaryInputs => owned(ctx.primary_inputs()),
        ListFileCategory::Outputs => owned(job.output.outputs_for_type(request.file_type)),
        ListFileCategory::MergeModuleInputs => owned(ctx.inputs_of_type(request.file_type)),
        ListFileCategory::LinkInputs => owned(ctx.link_inputs()),
        ListFileCategory::SupplementaryOutputs => supplementary_output_map(job),
    }
}

fn supplementary_output_map(job: &Job) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in job.output.entries() {
        if entry.supplementary.is_empty() {
            continue;
        }
        lines.push(format!("{}:", yaml_quote(&entry.input)));
        for (ty, path) in &entry.supplementary {
            lines.push(format!("  {}: {}", ty, yaml_quote(path)));
        }
    }
    lines
}

fn yaml_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Every list file `job` requests, paired with its contents.
pub fn job_filelists(
    tc: &dyn ToolChain,
    compilation: &Compilation,
    job: &Job,
) -> Vec<(ListFileRequest, Vec<String>)> {
    job.filelists
        .iter()
        .map(|request| (request.clone(), filelist_entries(tc, compilation, job, request)))
        .collect()
}

#[cfg(test)]
#[path = "filelist_tests.rs"]
mod tests;
