// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drv jobs`: build the jobs a plan describes and print them.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use drv_core::{ActionId, Job, JobId, JobSource};
use drv_toolchain::{build_jobs, for_triple, form_batches, job_filelists, Compilation, DriverConfig};
use indexmap::IndexMap;

use crate::exit_error::ExitError;
use crate::output::{print_jobs, FileListReport, JobReport, OutputFormat};
use crate::plan::Plan;

#[derive(Args)]
pub struct JobsArgs {
    /// Plan file (`.json` or `.toml`)
    pub plan: PathBuf,
    /// Merge compatible single-file compiles into batch jobs
    #[arg(long)]
    pub batch: bool,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
    /// Driver configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory for temporary list files
    #[arg(long)]
    pub temp_dir: Option<PathBuf>,
    /// Print what each list file will contain
    #[arg(long)]
    pub show_filelists: bool,
}

pub fn handle(args: JobsArgs) -> Result<()> {
    let mut config = DriverConfig::resolve(args.config.as_deref()).map_err(ExitError::input)?;
    if let Some(dir) = args.temp_dir {
        config = config.temp_dir(dir);
    }
    let plan = Plan::load(&args.plan).and_then(Plan::build).map_err(ExitError::input)?;

    let tc = for_triple(&plan.driver, plan.triple);
    let mut compilation =
        Compilation::new(plan.args, plan.output_info, plan.graph).with_config(&config);
    let built = build_jobs(tc.as_ref(), &mut compilation, &plan.outputs)?;

    let mut scheduled: Vec<JobId> = built.values().copied().collect();
    let mut batch_of = IndexMap::new();
    if args.batch {
        let batches = form_batches(tc.as_ref(), &mut compilation, &scheduled)?;
        scheduled = batches.scheduled;
        batch_of = batches.batch_of;
    }

    let reports: Vec<JobReport> = scheduled
        .iter()
        .filter_map(|id| compilation.job(*id).map(|job| (*id, job)))
        .map(|(id, job)| {
            let filelists = job_filelists(tc.as_ref(), &compilation, job)
                .into_iter()
                .map(|(request, entries)| FileListReport {
                    path: request.path,
                    category: request.category,
                    file_type: request.file_type,
                    entries,
                })
                .collect();
            JobReport::new(id, job_name(&compilation, job, &plan.steps), job, &batch_of, filelists)
        })
        .collect();
    print_jobs(&reports, args.format, args.show_filelists)
}

/// The step name, or `batch[a,b]` over the constituents' step names.
fn job_name(
    compilation: &Compilation,
    job: &Job,
    steps: &IndexMap<ActionId, String>,
) -> String {
    let step = |action: ActionId| steps.get(&action).cloned().unwrap_or_else(|| job.kind.to_string());
    match &job.source {
        JobSource::Action { action } => step(*action),
        JobSource::Batch { constituents } => {
            let names: Vec<String> = constituents
                .iter()
                .filter_map(|id| compilation.job(*id).and_then(Job::action))
                .map(step)
                .collect();
            format!("batch[{}]", names.join(","))
        }
    }
}
