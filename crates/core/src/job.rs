// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete, ready-to-execute invocations and their list-file requests.

use serde::{Deserialize, Serialize};

use crate::action::{ActionId, JobActionKind};
use crate::file_type::FileType;
use crate::output::CommandOutput;

/// Index of a job in its session's job arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(u32);

impl JobId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

/// What a job was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "kebab-case")]
pub enum JobSource {
    /// A single job action in the action graph.
    Action { action: ActionId },
    /// A merge of several single-file compile jobs.
    Batch { constituents: Vec<JobId> },
}

crate::string_enum! {
    /// Argument category a list file stands in for.
    pub enum ListFileCategory("list-file category") {
        TopLevelInputs => "top-level-inputs",
        PrimaryInputs => "primary-inputs",
        Outputs => "outputs",
        MergeModuleInputs => "merge-module-inputs",
        LinkInputs => "link-inputs",
        SupplementaryOutputs => "supplementary-outputs",
    }
}

/// A deferred on-disk list file replacing inline arguments.
///
/// Exactly one argument of the owning job refers to `path`; writing the file
/// is left to whoever executes the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFileRequest {
    pub path: String,
    /// Type of the files the list enumerates.
    pub file_type: FileType,
    pub category: ListFileCategory,
}

impl ListFileRequest {
    pub fn new(path: impl Into<String>, file_type: FileType, category: ListFileCategory) -> Self {
        Self { path: path.into(), file_type, category }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub kind: JobActionKind,
    pub source: JobSource,
    /// Upstream jobs this one depends on, mirroring the action's job inputs.
    pub inputs: Vec<JobId>,
    /// User-supplied inputs consumed directly.
    pub input_actions: Vec<ActionId>,
    pub output: CommandOutput,
    pub executable: String,
    pub arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_environment: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filelists: Vec<ListFileRequest>,
}

impl Job {
    pub fn is_batch(&self) -> bool {
        matches!(self.source, JobSource::Batch { .. })
    }

    /// Jobs merged into this one; empty unless this is a batch job.
    pub fn constituents(&self) -> &[JobId] {
        match &self.source {
            JobSource::Batch { constituents } => constituents,
            JobSource::Action { .. } => &[],
        }
    }

    /// The action this job was built from, unless it is a batch.
    pub fn action(&self) -> Option<ActionId> {
        match self.source {
            JobSource::Action { action } => Some(action),
            JobSource::Batch { .. } => None,
        }
    }

    pub fn filelist(&self, category: ListFileCategory) -> Option<&ListFileRequest> {
        self.filelists.iter().find(|f| f.category == category)
    }

    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.extra_environment.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

/// Renders as a copy-pasteable command line: `NAME=value exe arg...`.
impl std::fmt::Display for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        let mut word = |f: &mut std::fmt::Formatter<'_>, s: &str| {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            f.write_str(&shell_quote(s))
        };
        for (name, value) in &self.extra_environment {
            word(f, &format!("{name}={value}"))?;
        }
        word(f, &self.executable)?;
        for arg in &self.arguments {
            word(f, arg)?;
        }
        Ok(())
    }
}

/// Quote `s` for a POSIX shell if it contains anything outside a safe set.
pub fn shell_quote(s: &str) -> std::borrow::Cow<'_, str> {
    let safe = |c: char| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c);
    if !s.is_empty() && s.chars().all(safe) {
        std::borrow::Cow::Borrowed(s)
    } else {
        std::borrow::Cow::Owned(format!("'{}'", s.replace('\'', r"'\''")))
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
