// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch mode: merge compatible single-file compile jobs into one frontend
//! invocation per equivalence class.

use std::collections::{BTreeSet, HashMap};

use drv_core::{CommandOutput, FileType, Job, JobActionKind, JobId, JobSource, OutputMode};
use indexmap::{IndexMap, IndexSet};

use crate::assembler::{construct_job, JobPlan};
use crate::compilation::{Compilation, CompilationError};
use crate::toolchain::ToolChain;

/// A single-file compile of one Swift source in a standard-mode compilation.
pub fn job_is_batchable(compilation: &Compilation, job: &Job) -> bool {
    if compilation.output_info().compiler_mode != OutputMode::StandardCompile
        || !job.kind.is_compile()
        || job.is_batch()
        || !job.inputs.is_empty()
    {
        return false;
    }
    match job.input_actions.as_slice() {
        [only] => compilation.graph().input(*only).is_some_and(|i| i.file_type == FileType::Swift),
        _ => false,
    }
}

/// Everything two jobs must share to be merged. Equal keys is the
/// equivalence relation, so partitioning by key yields its classes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct BatchKey {
    executable: String,
    primary_output_type: FileType,
    additional_output_types: BTreeSet<FileType>,
    environment: BTreeSet<(String, String)>,
}

impl BatchKey {
    fn of(job: &Job) -> Self {
        Self {
            executable: job.executable.clone(),
            primary_output_type: job.output.primary_output_type(),
            additional_output_types: job.output.additional_output_types(),
            environment: job.extra_environment.iter().cloned().collect(),
        }
    }
}

/// Both jobs are batchable and identical apart from their inputs.
pub fn jobs_are_batch_combinable(compilation: &Compilation, a: &Job, b: &Job) -> bool {
    job_is_batchable(compilation, a)
        && job_is_batchable(compilation, b)
        && BatchKey::of(a) == BatchKey::of(b)
}

/// Position of a batchable job's source among the top-level inputs.
fn source_position(compilation: &Compilation, job: &Job) -> usize {
    job.input_actions
        .first()
        .and_then(|id| compilation.input_position(*id))
        .unwrap_or(usize::MAX)
}

/// Group the batchable jobs among `jobs` into equivalence classes.
///
/// Members are ordered by source position and classes by their first member,
/// so the result does not depend on the order of `jobs`. Unknown and
/// non-batchable ids are left out.
pub fn partition_batchable(compilation: &Compilation, jobs: &[JobId]) -> Vec<Vec<JobId>> {
    let mut classes: IndexMap<BatchKey, Vec<(usize, JobId)>> = IndexMap::new();
    for id in jobs.iter().copied().collect::<BTreeSet<_>>() {
        let Some(job) = compilation.job(id) else { continue };
        if !job_is_batchable(compilation, job) {
            continue;
        }
        classes.entry(BatchKey::of(job)).or_default().push((source_position(compilation, job), id));
    }
    let mut classes: Vec<Vec<(usize, JobId)>> = classes.into_values().collect();
    for class in &mut classes {
        class.sort();
    }
    classes.sort_by_key(|class| class.first().copied());
    classes.into_iter().map(|class| class.into_iter().map(|(_, id)| id).collect()).collect()
}

/// Merge one equivalence class into a single batch job.
///
/// Primary inputs and outputs are concatenated in source order; executable and
/// environment come from the first member. List-file decisions are made again
/// for the merged counts. Returns `None` for an empty class.
pub fn construct_batch_job(
    tc: &dyn ToolChain,
    members: &[JobId],
    compilation: &Compilation,
) -> Option<Job> {
    let mut jobs: Vec<(JobId, &Job)> =
        members.iter().filter_map(|id| compilation.job(*id).map(|job| (*id, job))).collect();
    jobs.sort_by_key(|(id, job)| (source_position(compilation, job), *id));
    let (_, representative) = *jobs.first()?;
    debug_assert!(
        jobs.iter().all(|(_, job)| jobs_are_batch_combinable(compilation, representative, job)),
        "batch members must be pairwise combinable"
    );

    let mut inputs = IndexSet::new();
    let mut input_actions = IndexSet::new();
    let mut output = CommandOutput::new(representative.output.primary_output_type());
    for (_, job) in &jobs {
        inputs.extend(job.inputs.iter().copied());
        input_actions.extend(job.input_actions.iter().copied());
        output.add_outputs(&job.output);
    }

    let plan = JobPlan {
        kind: JobActionKind::Compile,
        source: JobSource::Batch { constituents: jobs.iter().map(|(id, _)| *id).collect() },
        inputs: inputs.into_iter().collect(),
        input_actions: input_actions.into_iter().collect(),
        output,
    };
    let output_info = compilation.output_info().with_mode(OutputMode::BatchModeCompile);
    let mut batch = construct_job(tc, compilation, plan, &output_info);
    batch.executable = representative.executable.clone();
    batch.extra_environment = representative.extra_environment.clone();
    Some(batch)
}

/// Jobs to schedule after batching, and which batch absorbed each job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchPlan {
    pub scheduled: Vec<JobId>,
    pub batch_of: IndexMap<JobId, JobId>,
}

impl BatchPlan {
    pub fn batches(&self) -> impl Iterator<Item = JobId> + '_ {
        self.batch_of.values().copied().collect::<IndexSet<_>>().into_iter()
    }
}

/// Partition `jobs`, split classes by the session's batch size limit, and
/// register one batch job per chunk of two or more.
///
/// The scheduled list follows the order of `jobs`: each batch takes the place
/// of its first member, and non-batchable jobs and singleton chunks stay as
/// they are.
pub fn form_batches(
    tc: &dyn ToolChain,
    compilation: &mut Compilation,
    jobs: &[JobId],
) -> Result<BatchPlan, CompilationError> {
    let classes = partition_batchable(compilation, jobs);
    let limit = compilation.batch_size_limit().unwrap_or(usize::MAX).max(1);
    let chunks: Vec<Vec<JobId>> =
        classes.iter().flat_map(|class| class.chunks(limit).map(<[JobId]>::to_vec)).collect();
    let chunk_of: HashMap<JobId, usize> = chunks
        .iter()
        .enumerate()
        .flat_map(|(i, chunk)| chunk.iter().map(move |id| (*id, i)))
        .collect();

    let mut plan = BatchPlan::default();
    let mut seen = BTreeSet::new();
    let mut placed = vec![false; chunks.len()];
    for id in jobs {
        if !seen.insert(*id) {
            continue;
        }
        let Some(&i) = chunk_of.get(id) else {
            plan.scheduled.push(*id);
            continue;
        };
        if std::mem::replace(&mut placed[i], true) {
            continue;
        }
        let chunk = &chunks[i];
        if let [single] = chunk.as_slice() {
            plan.scheduled.push(*single);
            continue;
        }
        let Some(job) = construct_batch_job(tc, chunk, compilation) else { continue };
        let batch = compilation.add_job(job)?;
        for member in chunk {
            plan.batch_of.insert(*member, batch);
        }
        plan.scheduled.push(batch);
    }

    tracing::info!(
        jobs = jobs.len(),
        classes = classes.len(),
        batches = plan.batches().count(),
        scheduled = plan.scheduled.len(),
        "formed batches"
    );
    Ok(plan)
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
