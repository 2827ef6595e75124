// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-call view handed to invocation builders.
//!
//! A [`JobContext`] borrows everything one build call needs and decides, per
//! argument category, whether members go inline or into a list file.

use std::collections::HashSet;

use drv_core::{
    ActionId, ArgList, CommandOutput, FileType, FrontendMode, InputAction, Job, JobActionKind,
    JobId, ListFileCategory, ListFileRequest, OutputInfo, OutputMode,
};

use crate::compilation::Compilation;
use crate::invocation::InvocationInfo;
use crate::toolchain::{can_compile_input_argument_be_primary, ToolChain};

/// Supplementary output types and the frontend flag that names each.
pub const SUPPLEMENTARY_OUTPUT_FLAGS: &[(FileType, &str)] = &[
    (FileType::SwiftModule, "-emit-module-path"),
    (FileType::SwiftDoc, "-emit-module-doc-path"),
    (FileType::SwiftSourceInfo, "-emit-module-source-info-path"),
    (FileType::SwiftInterface, "-emit-module-interface-path"),
    (FileType::SerializedDiagnostics, "-serialize-diagnostics-path"),
    (FileType::ObjcHeader, "-emit-objc-header-path"),
    (FileType::Dependencies, "-emit-dependencies-path"),
    (FileType::SwiftDeps, "-emit-reference-dependencies-path"),
    (FileType::ModuleTrace, "-emit-loaded-module-trace-path"),
    (FileType::Tbd, "-emit-tbd-path"),
    (FileType::OptRecord, "-save-optimization-record-path"),
];

pub struct JobContext<'a> {
    pub compilation: &'a Compilation,
    pub toolchain: &'a dyn ToolChain,
    pub kind: &'a JobActionKind,
    /// Upstream jobs, in action input order.
    pub inputs: Vec<&'a Job>,
    /// User inputs consumed directly, in action input order.
    pub input_actions: Vec<&'a InputAction>,
    pub output: &'a CommandOutput,
    pub output_info: &'a OutputInfo,
}

impl<'a> JobContext<'a> {
    /// Look up `inputs` and `input_actions` in `compilation`; ids that do not
    /// resolve are skipped.
    pub fn resolve(
        compilation: &'a Compilation,
        toolchain: &'a dyn ToolChain,
        kind: &'a JobActionKind,
        inputs: &[JobId],
        input_actions: &[ActionId],
        output: &'a CommandOutput,
        output_info: &'a OutputInfo,
    ) -> Self {
        Self {
            compilation,
            toolchain,
            kind,
            inputs: inputs.iter().filter_map(|id| compilation.job(*id)).collect(),
            input_actions: input_actions
                .iter()
                .filter_map(|id| compilation.graph().input(*id))
                .collect(),
            output,
            output_info,
        }
    }

    pub fn args(&self) -> &'a ArgList {
        self.compilation.args()
    }

    pub fn top_level_input_files(&self) -> impl Iterator<Item = (FileType, &'a str)> {
        self.compilation.top_level_input_files()
    }

    pub fn all_sources_path(&self) -> &'a str {
        self.compilation.all_sources_path()
    }

    pub fn temp_path(&self, name: &str, suffix: &str) -> String {
        self.compilation.new_temp_path(name, suffix)
    }

    fn needs_filelist(&self, count: usize) -> bool {
        self.compilation.forces_filelists() || self.compilation.exceeds_threshold(count)
    }

    pub fn should_use_input_file_list(&self) -> bool {
        self.needs_filelist(self.top_level_input_files().count())
    }

    pub fn should_use_primary_input_file_list(&self) -> bool {
        self.output_info.might_have_explicit_primary_inputs(self.output)
            && self.needs_filelist(self.primary_inputs().len())
    }

    /// True unless the whole module is compiled at once; whole-module jobs
    /// pass every top-level input through.
    pub fn should_filter_inputs_by_type(&self) -> bool {
        self.output_info.compiler_mode != OutputMode::SingleCompile
    }

    pub fn should_use_merge_module_input_file_list(&self) -> bool {
        self.needs_filelist(self.inputs_of_type(FileType::SwiftModule).len())
    }

    pub fn should_use_link_input_file_list(&self) -> bool {
        self.needs_filelist(self.link_inputs().len())
    }

    pub fn should_use_main_output_file_list(&self) -> bool {
        self.needs_filelist(self.output.primary_output_filenames().len())
    }

    /// Only batch jobs write their supplementary outputs through a map file.
    pub fn should_use_supplementary_output_file_list(&self) -> bool {
        self.output_info.compiler_mode == OutputMode::BatchModeCompile
            && self.needs_filelist(self.output.supplementary_output_count())
    }

    /// Paths of `ty` provided by direct inputs, then by upstream jobs.
    pub fn inputs_of_type(&self, ty: FileType) -> Vec<&'a str> {
        let direct = self.input_actions.iter().filter(|a| a.file_type == ty).map(|a| a.path.as_str());
        let upstream = self.inputs.iter().flat_map(|job| job.output.outputs_for_type(ty));
        direct.chain(upstream).collect()
    }

    /// Object-like inputs of a link: direct inputs, then each upstream job's
    /// primary outputs, skipping module and autolink artifacts.
    pub fn link_inputs(&self) -> Vec<&'a str> {
        let linkable = |ty: FileType| {
            !matches!(
                ty,
                FileType::SwiftModule
                    | FileType::SwiftDoc
                    | FileType::AutolinkFile
                    | FileType::Dsym
                    | FileType::Nothing
            )
        };
        let direct = self
            .input_actions
            .iter()
            .filter(|a| linkable(a.file_type))
            .map(|a| a.path.as_str());
        let upstream = self
            .inputs
            .iter()
            .filter(|job| linkable(job.output.primary_output_type()))
            .flat_map(|job| job.output.primary_output_filenames());
        direct.chain(upstream).collect()
    }

    /// Direct inputs this job produces output for.
    pub fn primary_inputs(&self) -> Vec<&'a str> {
        let mut primaries: Vec<&'a str> = self
            .input_actions
            .iter()
            .map(|a| a.path.as_str())
            .filter(|path| can_compile_input_argument_be_primary(self.output, path))
            .collect();
        if let Some(index) = self.output.index_file_path() {
            if !primaries.contains(&index) {
                primaries.push(index);
            }
        }
        primaries
    }

    /// Granularity label for `-frontend-mode`.
    pub fn compute_frontend_mode_for_compile(&self) -> FrontendMode {
        match self.output_info.compiler_mode {
            OutputMode::BatchModeCompile => FrontendMode::Batch,
            OutputMode::SingleCompile | OutputMode::Immediate | OutputMode::Repl => {
                FrontendMode::WholeModule
            }
            OutputMode::StandardCompile => match self.primary_inputs().len() {
                0 => FrontendMode::WholeModule,
                1 => FrontendMode::SingleFile,
                _ => FrontendMode::Batch,
            },
        }
    }

    /// The frontend action selected by what the job primarily produces.
    pub fn frontend_action_flag(&self) -> &'static str {
        match self.output.primary_output_type() {
            FileType::Object => "-c",
            FileType::Pch => "-emit-pch",
            FileType::AstDump => "-dump-ast",
            FileType::RawSil => "-emit-silgen",
            FileType::Sil => "-emit-sil",
            FileType::RawSib => "-emit-sibgen",
            FileType::Sib => "-emit-sib",
            FileType::LlvmIr => "-emit-ir",
            FileType::LlvmBc => "-emit-bc",
            FileType::Assembly => "-S",
            FileType::SwiftModule => "-emit-module",
            FileType::ImportedModules => "-emit-imported-modules",
            FileType::Remapping => "-update-code",
            _ => "-typecheck",
        }
    }

    /// Append source inputs, supplementary outputs and main outputs, inline or
    /// through list files depending on their counts.
    pub fn add_frontend_input_and_output_arguments(&self, inv: &mut InvocationInfo) {
        let may_have_primaries = self.output_info.might_have_explicit_primary_inputs(self.output);
        let use_file_list = self.should_use_input_file_list();
        let use_primary_file_list = may_have_primaries && self.should_use_primary_input_file_list();

        if use_file_list {
            let path = self.all_sources_path();
            inv.arg("-filelist").arg(path);
            inv.filelist(ListFileRequest::new(path, FileType::Swift, ListFileCategory::TopLevelInputs));
        }
        if use_primary_file_list {
            let path = self.temp_path("primaryInputs", "");
            inv.arg("-primary-filelist").arg(path.clone());
            inv.filelist(ListFileRequest::new(path, FileType::Swift, ListFileCategory::PrimaryInputs));
        }
        if !use_file_list || !use_primary_file_list {
            self.add_frontend_input_arguments(may_have_primaries, use_file_list, use_primary_file_list, inv);
        }

        if self.should_use_supplementary_output_file_list() {
            let path = self.temp_path("supplementaryOutputs", "");
            inv.arg("-supplementary-output-file-map").arg(path.clone());
            inv.filelist(ListFileRequest::new(
                path,
                FileType::Invalid,
                ListFileCategory::SupplementaryOutputs,
            ));
        } else {
            self.add_frontend_supplementary_output_arguments(inv);
        }

        self.add_main_output_arguments(inv);
    }

    fn add_frontend_input_arguments(
        &self,
        may_have_primaries: bool,
        use_file_list: bool,
        use_primary_file_list: bool,
        inv: &mut InvocationInfo,
    ) {
        let primaries: HashSet<&str> =
            if may_have_primaries { self.primary_inputs().into_iter().collect() } else { HashSet::new() };
        let filter = self.should_filter_inputs_by_type();

        for (ty, path) in self.top_level_input_files() {
            if filter && !ty.is_part_of_swift_compilation() {
                continue;
            }
            let is_primary = primaries.contains(path);
            if is_primary && !use_primary_file_list {
                inv.arg("-primary-file").arg(path);
            }
            if (!is_primary || use_primary_file_list) && !use_file_list {
                inv.arg(path);
            }
        }
    }

    fn add_frontend_supplementary_output_arguments(&self, inv: &mut InvocationInfo) {
        for (ty, flag) in SUPPLEMENTARY_OUTPUT_FLAGS {
            inv.flag_each(flag, self.output.additional_outputs_for_type(*ty));
        }
    }

    fn add_main_output_arguments(&self, inv: &mut InvocationInfo) {
        let ty = self.output.primary_output_type();
        if ty == FileType::Nothing {
            return;
        }
        if self.should_use_main_output_file_list() {
            let path = self.temp_path("outputs", "");
            inv.arg("-output-filelist").arg(path.clone());
            inv.filelist(ListFileRequest::new(path, ty, ListFileCategory::Outputs));
        } else {
            inv.flag_each("-o", self.output.primary_output_filenames());
        }
    }
}

#[cfg(test)]
#[path = "job_context_tests.rs"]
mod tests;
