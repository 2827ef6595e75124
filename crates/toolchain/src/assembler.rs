// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job assembly: context, dispatch, executable resolution, wrapping.

use std::collections::HashMap;

use drv_core::{Action, ActionId, CommandOutput, Job, JobActionKind, JobId, JobSource, OutputInfo};
use indexmap::IndexMap;

use crate::compilation::{Compilation, CompilationError};
use crate::job_context::JobContext;
use crate::toolchain::{construct_invocation, resolve_executable, ToolChain};

/// Everything needed to build one job besides the toolchain and session.
#[derive(Debug, Clone)]
pub struct JobPlan {
    pub kind: JobActionKind,
    pub source: JobSource,
    pub inputs: Vec<JobId>,
    pub input_actions: Vec<ActionId>,
    pub output: CommandOutput,
}

/// Build one job. Input ids that do not resolve in `compilation` are skipped.
pub fn construct_job(
    tc: &dyn ToolChain,
    compilation: &Compilation,
    plan: JobPlan,
    output_info: &OutputInfo,
) -> Job {
    let invocation = {
        let ctx = JobContext::resolve(
            compilation,
            tc,
            &plan.kind,
            &plan.inputs,
            &plan.input_actions,
            &plan.output,
            output_info,
        );
        construct_invocation(tc, &ctx)
    };
    let executable = resolve_executable(tc, &invocation.executable_name);
    tracing::debug!(
        kind = %plan.kind,
        executable = %executable,
        args = invocation.arguments.len(),
        filelists = invocation.filelists.len(),
        "constructed job"
    );
    Job {
        kind: plan.kind,
        source: plan.source,
        inputs: plan.inputs,
        input_actions: plan.input_actions,
        output: plan.output,
        executable,
        arguments: invocation.arguments,
        extra_environment: invocation.extra_environment,
        filelists: invocation.filelists,
    }
}

/// Build and register one job per job action, in graph order.
///
/// Job-action inputs become dependency edges; input-action inputs become the
/// job's input actions. Actions without an entry in `outputs` write nothing
/// of their output type. Returns the job built for each job action.
pub fn build_jobs(
    tc: &dyn ToolChain,
    compilation: &mut Compilation,
    outputs: &HashMap<ActionId, CommandOutput>,
) -> Result<IndexMap<ActionId, JobId>, CompilationError> {
    let job_actions: Vec<_> = compilation
        .graph()
        .iter()
        .filter_map(|(id, action)| action.as_job().map(|job| (id, job.clone())))
        .collect();

    let mut built: IndexMap<ActionId, JobId> = IndexMap::with_capacity(job_actions.len());
    for (id, action) in job_actions {
        let mut inputs = Vec::new();
        let mut input_actions = Vec::new();
        for input in &action.inputs {
            match compilation.graph().get(*input) {
                Some(Action::Input(_)) => input_actions.push(*input),
                Some(Action::Job(_)) => inputs.extend(built.get(input).copied()),
                None => {}
            }
        }
        let output = outputs
            .get(&id)
            .cloned()
            .unwrap_or_else(|| CommandOutput::new(action.output_type));
        let plan = JobPlan {
            kind: action.kind,
            source: JobSource::Action { action: id },
            inputs,
            input_actions,
            output,
        };
        let output_info = compilation.output_info().clone();
        let job = construct_job(tc, compilation, plan, &output_info);
        built.insert(id, compilation.add_job(job)?);
    }
    Ok(built)
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;
