// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

#![allow(clippy::unwrap_used)]

use crate::action::{ActionGraph, ActionId, JobActionKind};
use crate::file_type::FileType;
use crate::job::{Job, JobSource};
use crate::output::{CommandOutput, OutputEntry};

// ── Proptest strategies ─────────────────────────────────────────────────

pub mod strategies {
    use crate::file_type::FileType;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    pub fn arb_file_type() -> impl Strategy<Value = FileType> {
        proptest::sample::select(FileType::ALL)
    }

    const SUPPLEMENTARY: &[FileType] = &[
        FileType::SwiftModule,
        FileType::SwiftDoc,
        FileType::Dependencies,
        FileType::SwiftDeps,
        FileType::SerializedDiagnostics,
    ];

    /// Supplementary output kinds a compile job commonly writes.
    pub fn arb_supplementary_types() -> impl Strategy<Value = BTreeSet<FileType>> {
        proptest::collection::btree_set(proptest::sample::select(SUPPLEMENTARY), 0..3)
    }

    /// Distinct source file names, `s0.swift` .. `sN.swift`, in shuffled order.
    pub fn arb_source_names(max: usize) -> impl Strategy<Value = Vec<String>> {
        (1..=max)
            .prop_map(|n| (0..n).map(|i| format!("s{i}.swift")).collect::<Vec<_>>())
            .prop_shuffle()
    }
}

// ── Output and graph fixtures ───────────────────────────────────────────────

/// Single-file compile output: `<stem>.o` plus one path per supplementary type.
pub fn object_output(input: &str, supplementary: &[FileType]) -> CommandOutput {
    let stem = input.rsplit_once('.').map_or(input, |(stem, _)| stem);
    let entry = supplementary.iter().fold(
        OutputEntry::new(input).primary(format!("{stem}.o")),
        |entry, ty| entry.supplementary(*ty, format!("{stem}.{}", ty.extension())),
    );
    CommandOutput::new(FileType::Object).with_entry(entry)
}

/// Graph of `sources` each feeding one compile action.
///
/// Returns the graph plus the compile action ids, in source order.
pub fn compile_graph(sources: &[&str]) -> (ActionGraph, Vec<ActionId>) {
    let mut graph = ActionGraph::new();
    let mut compiles = Vec::with_capacity(sources.len());
    for source in sources {
        let input = graph.add_input(*source, FileType::for_path(source)).unwrap();
        let compile = graph.add_job(JobActionKind::Compile, vec![input], FileType::Object).unwrap();
        compiles.push(compile);
    }
    (graph, compiles)
}

// ── Job builder ───────────────────────────────────────────────────────────

/// Builds [`Job`] values directly, without a toolchain.
pub struct JobBuilder {
    job: Job,
}

impl JobBuilder {
    pub fn new(kind: JobActionKind, action: ActionId) -> Self {
        Self {
            job: Job {
                kind,
                source: JobSource::Action { action },
                inputs: Vec::new(),
                input_actions: Vec::new(),
                output: CommandOutput::new(FileType::Nothing),
                executable: "swift-frontend".to_string(),
                arguments: Vec::new(),
                extra_environment: Vec::new(),
                filelists: Vec::new(),
            },
        }
    }

    pub fn compile(action: u32) -> Self {
        Self::new(JobActionKind::Compile, ActionId::new(action))
    }

    pub fn executable(mut self, exe: impl Into<String>) -> Self {
        self.job.executable = exe.into();
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.job.arguments = args.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.job.extra_environment.push((name.to_string(), value.to_string()));
        self
    }

    pub fn output(mut self, output: CommandOutput) -> Self {
        self.job.output = output;
        self
    }

    pub fn input_actions(mut self, ids: &[u32]) -> Self {
        self.job.input_actions = ids.iter().map(|i| ActionId::new(*i)).collect();
        self
    }

    pub fn build(self) -> Job {
        self.job
    }
}
