// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering of constructed jobs.

use std::fmt::Write as _;

use clap::ValueEnum;
use drv_core::{FileType, Job, JobId, ListFileCategory};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileListReport {
    pub path: String,
    pub category: ListFileCategory,
    pub file_type: FileType,
    pub entries: Vec<String>,
}

/// One scheduled job as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    pub id: JobId,
    pub name: String,
    pub kind: String,
    /// Scheduled jobs that must finish first.
    pub after: Vec<JobId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constituents: Vec<JobId>,
    pub command: String,
    pub executable: String,
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filelists: Vec<FileListReport>,
}

impl JobReport {
    /// `batch_of` redirects dependencies on absorbed jobs to their batch.
    pub fn new(
        id: JobId,
        name: String,
        job: &Job,
        batch_of: &IndexMap<JobId, JobId>,
        filelists: Vec<FileListReport>,
    ) -> Self {
        let after: IndexSet<JobId> =
            job.inputs.iter().map(|input| batch_of.get(input).copied().unwrap_or(*input)).collect();
        Self {
            id,
            name,
            kind: job.kind.to_string(),
            after: after.into_iter().collect(),
            constituents: job.constituents().to_vec(),
            command: job.to_string(),
            executable: job.executable.clone(),
            arguments: job.arguments.clone(),
            environment: job.extra_environment.clone(),
            filelists,
        }
    }
}

/// Header line, indented command line, then list files when asked for.
pub fn render_text(reports: &[JobReport], show_filelists: bool) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = write!(out, "{} {}", report.id, report.name);
        if report.name != report.kind {
            let _ = write!(out, " ({})", report.kind);
        }
        if !report.after.is_empty() {
            let after: Vec<String> = report.after.iter().map(JobId::to_string).collect();
            let _ = write!(out, " after {}", after.join(", "));
        }
        out.push('\n');
        let _ = writeln!(out, "  {}", report.command);
        if show_filelists {
            for list in &report.filelists {
                let _ = writeln!(out, "  {} {}:", list.category, list.path);
                for entry in &list.entries {
                    let _ = writeln!(out, "    {entry}");
                }
            }
        }
    }
    out
}

pub fn print_jobs(reports: &[JobReport], format: OutputFormat, show_filelists: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(reports, show_filelists)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
    }
    Ok(())
}
