// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures shared by this crate's unit tests.

use std::collections::HashMap;

use drv_core::test_support::object_output;
use drv_core::{
    ActionGraph, ActionId, ArgList, CommandOutput, FileType, JobActionKind, OutputInfo, OutputMode,
};

use crate::compilation::Compilation;
use crate::config::DriverConfig;
use crate::toolchain::ToolChainBase;
use crate::toolchains::{Darwin, GenericUnix};

pub const DRIVER: &str = "/toolchain/usr/bin/swift-frontend";

/// Toolchain base with no search path, so tool lookups never hit the host.
pub fn base(triple: &str) -> ToolChainBase {
    ToolChainBase::with_search_path(DRIVER, triple.parse().unwrap(), Vec::new())
}

pub fn linux() -> GenericUnix {
    GenericUnix::new(base("x86_64-unknown-linux-gnu"))
}

pub fn macos() -> Darwin {
    Darwin::new(base("arm64-apple-macosx13.0"))
}

pub fn info(mode: OutputMode) -> OutputInfo {
    OutputInfo::new(mode, FileType::Object, "Main")
}

pub fn session_with(graph: ActionGraph, args: ArgList, mode: OutputMode) -> Compilation {
    let config = DriverConfig::default().temp_dir("/tmp/drv");
    Compilation::new(args, info(mode), graph).with_config(&config)
}

/// Sources `s0.swift .. s{n-1}.swift`, one compile action each.
pub fn sources(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("s{i}.swift")).collect()
}

/// Graph of one compile per source; returns it with the compile ids.
pub fn per_file_graph(sources: &[String]) -> (ActionGraph, Vec<ActionId>) {
    let names: Vec<&str> = sources.iter().map(String::as_str).collect();
    drv_core::test_support::compile_graph(&names)
}

/// Object plus the given supplementary outputs for every compile action.
pub fn per_file_outputs(
    graph: &ActionGraph,
    compiles: &[ActionId],
    supplementary: &[FileType],
) -> HashMap<ActionId, CommandOutput> {
    compiles
        .iter()
        .map(|id| {
            let input = graph
                .job(*id)
                .and_then(|job| job.inputs.first())
                .and_then(|input| graph.input(*input))
                .map(|input| input.path.clone())
                .unwrap_or_default();
            (*id, object_output(&input, supplementary))
        })
        .collect()
}

/// Graph with every source feeding one whole-module compile.
pub fn whole_module_graph(sources: &[String]) -> (ActionGraph, ActionId) {
    let mut graph = ActionGraph::new();
    let inputs: Vec<ActionId> =
        sources.iter().map(|s| graph.add_input(s.as_str(), FileType::Swift).unwrap()).collect();
    let compile = graph.add_job(JobActionKind::Compile, inputs, FileType::Object).unwrap();
    (graph, compile)
}
