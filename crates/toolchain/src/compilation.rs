// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The compilation session: owns the action graph, the job arena and every
//! temporary path handed out while building jobs.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use drv_core::{ActionGraph, ActionId, ArgList, FileType, Job, JobId, OutputInfo};
use parking_lot::Mutex;
use thiserror::Error;

use crate::config::{DriverConfig, TOO_MANY_FILES};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    #[error("job arena is full")]
    Full,
}

#[derive(Debug, Default)]
struct TempFiles {
    next: usize,
    paths: Vec<String>,
}

#[derive(Debug)]
pub struct Compilation {
    args: ArgList,
    output_info: OutputInfo,
    graph: ActionGraph,
    /// User inputs in presentation order, with their position in the graph.
    top_level_inputs: Vec<(ActionId, FileType, String)>,
    jobs: Vec<Job>,
    temp_dir: PathBuf,
    filelist_threshold: usize,
    force_filelists: bool,
    batch_size_limit: Option<usize>,
    temp_files: Mutex<TempFiles>,
    all_sources_path: OnceLock<String>,
}

impl Compilation {
    pub fn new(args: ArgList, output_info: OutputInfo, graph: ActionGraph) -> Self {
        let top_level_inputs = graph
            .inputs()
            .map(|(id, input)| (id, input.file_type, input.path.clone()))
            .collect();
        let temp_dir = std::env::temp_dir().join(format!("drv-{}", nanoid::nanoid!(10)));
        Self {
            args,
            output_info,
            graph,
            top_level_inputs,
            jobs: Vec::new(),
            temp_dir,
            filelist_threshold: TOO_MANY_FILES,
            force_filelists: false,
            batch_size_limit: None,
            temp_files: Mutex::new(TempFiles::default()),
            all_sources_path: OnceLock::new(),
        }
    }

    /// Apply threshold, forcing, temp directory and batch limit from `config`.
    pub fn with_config(mut self, config: &DriverConfig) -> Self {
        self.filelist_threshold = config.filelist_threshold.max(1);
        self.force_filelists = config.force_filelists;
        self.batch_size_limit = config.batch_size_limit;
        if let Some(dir) = &config.temp_dir {
            self.temp_dir = dir.clone();
        }
        self
    }

    pub fn args(&self) -> &ArgList {
        &self.args
    }

    pub fn output_info(&self) -> &OutputInfo {
        &self.output_info
    }

    pub fn graph(&self) -> &ActionGraph {
        &self.graph
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub fn filelist_threshold(&self) -> usize {
        self.filelist_threshold
    }

    pub fn batch_size_limit(&self) -> Option<usize> {
        self.batch_size_limit
    }

    /// List files for every category, from `-driver-use-filelists` or config.
    pub fn forces_filelists(&self) -> bool {
        self.force_filelists || self.args.driver_use_filelists
    }

    /// Whether `count` members need a list file rather than inline arguments.
    pub fn exceeds_threshold(&self, count: usize) -> bool {
        count > self.filelist_threshold
    }

    /// Every user-supplied `(type, path)` pair, in presentation order.
    pub fn top_level_input_files(&self) -> impl Iterator<Item = (FileType, &str)> {
        self.top_level_inputs.iter().map(|(_, ty, path)| (*ty, path.as_str()))
    }

    /// Position of input action `id` among the top-level inputs.
    pub fn input_position(&self, id: ActionId) -> Option<usize> {
        self.top_level_inputs.iter().position(|(input, _, _)| *input == id)
    }

    /// Allocate a fresh temporary path `<temp_dir>/<name>-<n>[.<suffix>]`.
    ///
    /// Names are unique within the session; the file itself is not created.
    pub fn new_temp_path(&self, name: &str, suffix: &str) -> String {
        let mut temps = self.temp_files.lock();
        let n = temps.next;
        temps.next += 1;
        let file = if suffix.is_empty() {
            format!("{name}-{n}")
        } else {
            format!("{name}-{n}.{suffix}")
        };
        let path = self.temp_dir.join(file).to_string_lossy().into_owned();
        temps.paths.push(path.clone());
        path
    }

    /// Every temporary path allocated so far, in allocation order.
    pub fn temp_files(&self) -> Vec<String> {
        self.temp_files.lock().paths.clone()
    }

    /// Session-wide list of all top-level sources, allocated on first use.
    pub fn all_sources_path(&self) -> &str {
        self.all_sources_path.get_or_init(|| self.new_temp_path("sources", ""))
    }

    /// Whether the all-sources list has been allocated.
    pub fn has_all_sources_path(&self) -> bool {
        self.all_sources_path.get().is_some()
    }

    pub fn add_job(&mut self, job: Job) -> Result<JobId, CompilationError> {
        let id = u32::try_from(self.jobs.len()).map_err(|_| CompilationError::Full)?;
        self.jobs.push(job);
        Ok(JobId::new(id))
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id.index())
    }

    pub fn jobs(&self) -> impl Iterator<Item = (JobId, &Job)> {
        (0u32..).zip(&self.jobs).map(|(i, job)| (JobId::new(i), job))
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

#[cfg(test)]
#[path = "compilation_tests.rs"]
mod tests;
