// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compilation-wide output mode and per-job output descriptions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::file_type::FileType;

crate::string_enum! {
    /// How the driver splits source files across frontend invocations.
    #[derive(Default)]
    pub enum OutputMode("output mode") {
        /// One frontend job per primary source file.
        #[default]
        StandardCompile => "standard",
        /// One frontend job for the whole module.
        SingleCompile => "whole-module",
        /// Several primary files per frontend job.
        BatchModeCompile => "batch",
        /// Compile and run in-process.
        Immediate => "immediate",
        Repl => "repl",
    }
}

crate::string_enum! {
    /// Compile granularity label passed to the frontend with `-frontend-mode`.
    pub enum FrontendMode("frontend mode") {
        SingleFile => "single-file",
        WholeModule => "whole-module",
        Batch => "batch",
    }
}

/// Compilation-wide output settings shared by every job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputInfo {
    pub compiler_mode: OutputMode,
    /// What each compile job primarily produces.
    pub compiler_output_type: FileType,
    pub module_name: String,
}

impl OutputInfo {
    pub fn new(compiler_mode: OutputMode, compiler_output_type: FileType, module_name: impl Into<String>) -> Self {
        Self { compiler_mode, compiler_output_type, module_name: module_name.into() }
    }

    /// Whether a job with `output` can name explicit primary files.
    ///
    /// Whole-module compiles have no primaries, except index-data jobs which
    /// designate a single primary through the output's index-file path.
    pub fn might_have_explicit_primary_inputs(&self, output: &CommandOutput) -> bool {
        match self.compiler_mode {
            OutputMode::StandardCompile | OutputMode::BatchModeCompile => true,
            OutputMode::SingleCompile => output.primary_output_type() == FileType::IndexData,
            OutputMode::Immediate | OutputMode::Repl => false,
        }
    }

    /// Copy with the compiler mode replaced.
    pub fn with_mode(&self, compiler_mode: OutputMode) -> Self {
        Self { compiler_mode, ..self.clone() }
    }
}

/// Outputs produced for one input of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputEntry {
    /// The input these outputs derive from; empty for whole-module outputs.
    #[serde(default)]
    pub input: String,
    /// Path of the primary output, if the job writes one for this input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    /// Supplementary outputs (module, dependencies, diagnostics, ...) by type.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub supplementary: BTreeMap<FileType, String>,
}

impl OutputEntry {
    pub fn new(input: impl Into<String>) -> Self {
        Self { input: input.into(), ..Self::default() }
    }

    pub fn primary(mut self, path: impl Into<String>) -> Self {
        self.primary = Some(path.into());
        self
    }

    pub fn supplementary(mut self, ty: FileType, path: impl Into<String>) -> Self {
        self.supplementary.insert(ty, path.into());
        self
    }
}

/// The artifact set one job writes, built upstream and read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    primary_output_type: FileType,
    #[serde(default)]
    entries: Vec<OutputEntry>,
    /// For index-data jobs: the one input to treat as primary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index_file_path: Option<String>,
}

impl CommandOutput {
    pub fn new(primary_output_type: FileType) -> Self {
        Self { primary_output_type, entries: Vec::new(), index_file_path: None }
    }

    pub fn with_entry(mut self, entry: OutputEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn with_index_file_path(mut self, path: impl Into<String>) -> Self {
        self.index_file_path = Some(path.into());
        self
    }

    pub fn push_entry(&mut self, entry: OutputEntry) {
        self.entries.push(entry);
    }

    pub fn primary_output_type(&self) -> FileType {
        self.primary_output_type
    }

    pub fn entries(&self) -> &[OutputEntry] {
        &self.entries
    }

    pub fn index_file_path(&self) -> Option<&str> {
        self.index_file_path.as_deref()
    }

    /// Primary output paths in entry order.
    pub fn primary_output_filenames(&self) -> Vec<&str> {
        self.entries.iter().filter_map(|e| e.primary.as_deref()).collect()
    }

    /// The first primary output, for jobs that write exactly one.
    pub fn primary_output_filename(&self) -> Option<&str> {
        self.entries.iter().find_map(|e| e.primary.as_deref())
    }

    /// Supplementary outputs of `ty` in entry order.
    pub fn additional_outputs_for_type(&self, ty: FileType) -> Vec<&str> {
        self.entries.iter().filter_map(|e| e.supplementary.get(&ty).map(String::as_str)).collect()
    }

    /// The primary outputs when `ty` is the primary type, else the
    /// supplementary outputs of `ty`.
    pub fn outputs_for_type(&self, ty: FileType) -> Vec<&str> {
        if ty == self.primary_output_type {
            self.primary_output_filenames()
        } else {
            self.additional_outputs_for_type(ty)
        }
    }

    /// Types of every supplementary output across all entries.
    pub fn additional_output_types(&self) -> BTreeSet<FileType> {
        self.entries.iter().flat_map(|e| e.supplementary.keys().copied()).collect()
    }

    pub fn has_same_additional_output_types(&self, other: &CommandOutput) -> bool {
        self.additional_output_types() == other.additional_output_types()
    }

    /// All supplementary output paths, grouped by entry then type.
    pub fn supplementary_outputs(&self) -> Vec<&str> {
        self.entries.iter().flat_map(|e| e.supplementary.values().map(String::as_str)).collect()
    }

    pub fn supplementary_output_count(&self) -> usize {
        self.entries.iter().map(|e| e.supplementary.len()).sum()
    }

    /// Append another output's entries, keeping their order.
    pub fn add_outputs(&mut self, other: &CommandOutput) {
        self.entries.extend(other.entries.iter().cloned());
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
