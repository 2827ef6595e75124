// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_helpers::{info, linux, per_file_graph, session_with, sources};
use drv_core::test_support::{object_output, JobBuilder};
use drv_core::{ActionGraph, OutputEntry};

fn frontend_args(
    compilation: &Compilation,
    input: ActionId,
    output: &CommandOutput,
    output_info: &OutputInfo,
) -> InvocationInfo {
    let tc = linux();
    let kind = JobActionKind::Compile;
    let ctx = JobContext::resolve(compilation, &tc, &kind, &[], &[input], output, output_info);
    let mut inv = InvocationInfo::new("swift");
    ctx.add_frontend_input_and_output_arguments(&mut inv);
    inv
}

fn standard(n: usize) -> Compilation {
    let (graph, _) = per_file_graph(&sources(n));
    session_with(graph, ArgList::default(), OutputMode::StandardCompile)
}

#[yare::parameterized(
    below = { 127, false },
    at = { 128, false },
    above = { 129, true },
)]
fn input_file_list_threshold_is_strict(count: usize, expected: bool) {
    let compilation = standard(count);
    let tc = linux();
    let kind = JobActionKind::Compile;
    let output = object_output("s0.swift", &[]);
    let output_info = info(OutputMode::StandardCompile);
    let ctx = JobContext::resolve(
        &compilation,
        &tc,
        &kind,
        &[],
        &[ActionId::new(0)],
        &output,
        &output_info,
    );
    assert_eq!(ctx.should_use_input_file_list(), expected);
    // one primary never needs a list
    assert!(!ctx.should_use_primary_input_file_list());
}

/// Entries for sources `from..to`, each with a primary of type `ty`.
fn outputs_of(ty: FileType, from: usize, to: usize) -> CommandOutput {
    (from..to).fold(CommandOutput::new(ty), |output, i| {
        let entry = OutputEntry::new(format!("s{i}.swift")).primary(format!("s{i}.{}", ty.extension()));
        output.with_entry(entry)
    })
}

#[yare::parameterized(
    primary_at = { "primary", 128, false },
    primary_above = { "primary", 129, true },
    outputs_at = { "outputs", 128, false },
    outputs_above = { "outputs", 129, true },
    merge_module_at = { "merge-module", 128, false },
    merge_module_above = { "merge-module", 129, true },
    link_at = { "link", 128, false },
    link_above = { "link", 129, true },
)]
fn every_category_threshold_is_strict(category: &str, count: usize, expected: bool) {
    let mut compilation = standard(count);
    let upstream_type = match category {
        "merge-module" => Some(FileType::SwiftModule),
        "link" => Some(FileType::Object),
        _ => None,
    };
    let jobs: Vec<JobId> = upstream_type
        .map(|ty| {
            (0..count)
                .map(|i| {
                    let action = ActionId::new(i as u32 * 2 + 1);
                    let job = JobBuilder::new(JobActionKind::Compile, action)
                        .output(outputs_of(ty, i, i + 1))
                        .build();
                    compilation.add_job(job).unwrap()
                })
                .collect()
        })
        .unwrap_or_default();
    let primaries: Vec<ActionId> =
        if category == "primary" { (0..count).map(|i| ActionId::new(i as u32 * 2)).collect() } else { Vec::new() };
    let produced = if category == "outputs" { count } else { 1 };
    let output = outputs_of(FileType::Object, 0, produced);
    let output_info = info(OutputMode::BatchModeCompile);

    let tc = linux();
    let kind = JobActionKind::Compile;
    let ctx = JobContext::resolve(&compilation, &tc, &kind, &jobs, &primaries, &output, &output_info);
    let actual = match category {
        "primary" => ctx.should_use_primary_input_file_list(),
        "outputs" => ctx.should_use_main_output_file_list(),
        "merge-module" => ctx.should_use_merge_module_input_file_list(),
        _ => ctx.should_use_link_input_file_list(),
    };
    assert_eq!(actual, expected);
}

#[test]
fn single_primary_inline() {
    let compilation = standard(3);
    let inv = frontend_args(
        &compilation,
        ActionId::new(2),
        &object_output("s1.swift", &[]),
        &info(OutputMode::StandardCompile),
    );
    assert_eq!(
        inv.arguments,
        ["s0.swift", "-primary-file", "s1.swift", "s2.swift", "-o", "s1.o"]
    );
    assert!(inv.filelists.is_empty());
    assert!(!compilation.has_all_sources_path());
}

#[test]
fn too_many_sources_use_shared_list_and_inline_primary() {
    let compilation = standard(129);
    let inv = frontend_args(
        &compilation,
        ActionId::new(0),
        &object_output("s0.swift", &[]),
        &info(OutputMode::StandardCompile),
    );
    let sources = compilation.all_sources_path().to_string();
    assert_eq!(inv.arguments, ["-filelist", sources.as_str(), "-primary-file", "s0.swift", "-o", "s0.o"]);
    assert_eq!(inv.filelists.len(), 1);
    assert_eq!(inv.filelists[0].category, ListFileCategory::TopLevelInputs);
    assert_eq!(inv.filelists[0].file_type, FileType::Swift);
}

#[test]
fn all_sources_list_is_shared_between_jobs() {
    let compilation = standard(130);
    let first = frontend_args(
        &compilation,
        ActionId::new(0),
        &object_output("s0.swift", &[]),
        &info(OutputMode::StandardCompile),
    );
    let second = frontend_args(
        &compilation,
        ActionId::new(2),
        &object_output("s1.swift", &[]),
        &info(OutputMode::StandardCompile),
    );
    assert_eq!(first.filelists[0].path, second.filelists[0].path);
    assert_eq!(compilation.temp_files().len(), 1);
}

#[test]
fn forced_filelists_cover_every_category() {
    let (graph, _) = per_file_graph(&sources(2));
    let args = ArgList { driver_use_filelists: true, ..ArgList::default() };
    let compilation = session_with(graph, args, OutputMode::StandardCompile);
    let inv = frontend_args(
        &compilation,
        ActionId::new(0),
        &object_output("s0.swift", &[]),
        &info(OutputMode::StandardCompile),
    );
    assert_eq!(
        inv.arguments,
        [
            "-filelist",
            "/tmp/drv/sources-0",
            "-primary-filelist",
            "/tmp/drv/primaryInputs-1",
            "-output-filelist",
            "/tmp/drv/outputs-2",
        ]
    );
    let categories: Vec<_> = inv.filelists.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        [ListFileCategory::TopLevelInputs, ListFileCategory::PrimaryInputs, ListFileCategory::Outputs]
    );
    assert_eq!(inv.filelists[2].file_type, FileType::Object);
}

#[test]
fn supplementary_map_only_for_batch_jobs() {
    let (graph, _) = per_file_graph(&sources(2));
    let args = ArgList { driver_use_filelists: true, ..ArgList::default() };
    let compilation = session_with(graph, args, OutputMode::StandardCompile);
    let output = object_output("s0.swift", &[FileType::SwiftDeps]);

    let standard = frontend_args(&compilation, ActionId::new(0), &output, &info(OutputMode::StandardCompile));
    let map = |inv: &InvocationInfo| {
        inv.filelists.iter().find(|r| r.category == ListFileCategory::SupplementaryOutputs).cloned()
    };
    assert!(map(&standard).is_none());
    assert!(standard.arguments.iter().any(|a| a == "-emit-reference-dependencies-path"));

    let batch = frontend_args(&compilation, ActionId::new(0), &output, &info(OutputMode::BatchModeCompile));
    let request = map(&batch).unwrap();
    assert_eq!(request.file_type, FileType::Invalid);
    assert!(batch.arguments.iter().any(|a| a == "-supplementary-output-file-map"));
    assert!(!batch.arguments.iter().any(|a| a == "-emit-reference-dependencies-path"));
}

#[test]
fn supplementary_flags_follow_fixed_order() {
    let compilation = standard(1);
    let output = object_output("s0.swift", &[FileType::SwiftDeps, FileType::SwiftModule]);
    let inv = frontend_args(&compilation, ActionId::new(0), &output, &info(OutputMode::StandardCompile));
    let module = inv.arguments.iter().position(|a| a == "-emit-module-path").unwrap();
    let deps = inv.arguments.iter().position(|a| a == "-emit-reference-dependencies-path").unwrap();
    assert!(module < deps);
    assert_eq!(inv.arguments[module + 1], "s0.swiftmodule");
}

fn mixed_graph() -> ActionGraph {
    let mut graph = ActionGraph::new();
    let a = graph.add_input("a.swift", FileType::Swift).unwrap();
    let lib = graph.add_input("lib.o", FileType::Object).unwrap();
    let b = graph.add_input("b.swift", FileType::Swift).unwrap();
    graph.add_job(JobActionKind::Compile, vec![a, lib, b], FileType::Object).unwrap();
    graph
}

#[test]
fn whole_module_passes_every_input_through() {
    let compilation = session_with(mixed_graph(), ArgList::default(), OutputMode::SingleCompile);
    let output = CommandOutput::new(FileType::Object).with_entry(OutputEntry::new("").primary("Main.o"));
    let inv = frontend_args(&compilation, ActionId::new(0), &output, &info(OutputMode::SingleCompile));
    assert_eq!(inv.arguments, ["a.swift", "lib.o", "b.swift", "-o", "Main.o"]);
}

#[test]
fn per_file_compiles_filter_non_swift_inputs() {
    let compilation = session_with(mixed_graph(), ArgList::default(), OutputMode::StandardCompile);
    let inv = frontend_args(
        &compilation,
        ActionId::new(0),
        &object_output("a.swift", &[]),
        &info(OutputMode::StandardCompile),
    );
    assert_eq!(inv.arguments, ["-primary-file", "a.swift", "b.swift", "-o", "a.o"]);
}

#[test]
fn index_data_designates_one_primary() {
    let compilation = session_with(mixed_graph(), ArgList::default(), OutputMode::SingleCompile);
    let output = CommandOutput::new(FileType::IndexData).with_index_file_path("b.swift");
    let tc = linux();
    let kind = JobActionKind::Compile;
    let output_info = info(OutputMode::SingleCompile);
    let ctx = JobContext::resolve(
        &compilation,
        &tc,
        &kind,
        &[],
        &[ActionId::new(0), ActionId::new(2)],
        &output,
        &output_info,
    );
    assert_eq!(ctx.primary_inputs(), ["b.swift"]);
    let mut inv = InvocationInfo::new("swift");
    ctx.add_frontend_input_and_output_arguments(&mut inv);
    assert_eq!(inv.arguments, ["a.swift", "lib.o", "-primary-file", "b.swift"]);
}

#[yare::parameterized(
    no_primaries = { OutputMode::StandardCompile, 0, FrontendMode::WholeModule },
    one_primary = { OutputMode::StandardCompile, 1, FrontendMode::SingleFile },
    many_primaries = { OutputMode::StandardCompile, 3, FrontendMode::Batch },
    batch = { OutputMode::BatchModeCompile, 1, FrontendMode::Batch },
    whole_module = { OutputMode::SingleCompile, 0, FrontendMode::WholeModule },
)]
fn frontend_mode(mode: OutputMode, primaries: usize, expected: FrontendMode) {
    let compilation = standard(3);
    let tc = linux();
    let kind = JobActionKind::Compile;
    let output = CommandOutput::new(FileType::Object);
    let output_info = info(mode);
    let inputs: Vec<ActionId> = (0..primaries as u32).map(|i| ActionId::new(i * 2)).collect();
    let ctx = JobContext::resolve(&compilation, &tc, &kind, &[], &inputs, &output, &output_info);
    assert_eq!(ctx.compute_frontend_mode_for_compile(), expected);
}

#[yare::parameterized(
    object = { FileType::Object, "-c" },
    assembly = { FileType::Assembly, "-S" },
    module = { FileType::SwiftModule, "-emit-module" },
    nothing = { FileType::Nothing, "-typecheck" },
)]
fn action_flag_follows_primary_output(ty: FileType, flag: &str) {
    let compilation = standard(1);
    let tc = linux();
    let kind = JobActionKind::Compile;
    let output = CommandOutput::new(ty);
    let output_info = info(OutputMode::StandardCompile);
    let ctx = JobContext::resolve(&compilation, &tc, &kind, &[], &[], &output, &output_info);
    assert_eq!(ctx.frontend_action_flag(), flag);
}

#[test]
fn nothing_output_writes_no_output_flag() {
    let compilation = standard(1);
    let inv = frontend_args(
        &compilation,
        ActionId::new(0),
        &CommandOutput::new(FileType::Nothing),
        &info(OutputMode::StandardCompile),
    );
    assert_eq!(inv.arguments, ["-primary-file", "s0.swift"]);
}

#[test]
fn link_inputs_skip_module_artifacts() {
    let (graph, _) = per_file_graph(&sources(2));
    let mut compilation = session_with(graph, ArgList::default(), OutputMode::StandardCompile);
    let object = compilation.add_job(
        JobBuilder::compile(1)
            .output(object_output("s0.swift", &[FileType::SwiftModule]))
            .build(),
    ).unwrap();
    let module = compilation.add_job(
        JobBuilder::new(JobActionKind::MergeModule, ActionId::new(4))
            .output(
                CommandOutput::new(FileType::SwiftModule)
                    .with_entry(OutputEntry::new("").primary("Main.swiftmodule")),
            )
            .build(),
    ).unwrap();

    let tc = linux();
    let kind = JobActionKind::Link { link: drv_core::LinkKind::Executable };
    let output = CommandOutput::new(FileType::Image);
    let output_info = info(OutputMode::StandardCompile);
    let ctx = JobContext::resolve(&compilation, &tc, &kind, &[object, module], &[], &output, &output_info);
    assert_eq!(ctx.link_inputs(), ["s0.o"]);
    assert_eq!(ctx.inputs_of_type(FileType::SwiftModule), ["s0.swiftmodule", "Main.swiftmodule"]);
    assert!(!ctx.should_use_link_input_file_list());
}

#[test]
fn unresolved_ids_are_skipped() {
    let compilation = standard(1);
    let tc = linux();
    let kind = JobActionKind::Compile;
    let output = CommandOutput::new(FileType::Object);
    let output_info = info(OutputMode::StandardCompile);
    let ctx = JobContext::resolve(
        &compilation,
        &tc,
        &kind,
        &[JobId::new(7)],
        &[ActionId::new(1), ActionId::new(40)],
        &output,
        &output_info,
    );
    assert!(ctx.inputs.is_empty());
    assert!(ctx.input_actions.is_empty());
}
