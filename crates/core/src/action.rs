// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The compilation plan: a DAG of typed actions stored in an arena.
//!
//! Inputs must be added before the actions that consume them, so arena order
//! is always a valid topological order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::file_type::FileType;

/// Index of an action in its [`ActionGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(u32);

impl ActionId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "action#{}", self.0)
    }
}

crate::string_enum! {
    /// How a REPL action wants to be run.
    #[derive(Default)]
    pub enum ReplMode("REPL mode") {
        /// Always use the frontend's built-in REPL.
        Integrated => "integrated",
        /// Use LLDB when it can be found next to the driver.
        #[default]
        PreferLldb => "prefer-lldb",
        /// Always use LLDB.
        RequireLldb => "require-lldb",
    }
}

crate::string_enum! {
    /// What a link action produces.
    #[derive(Default)]
    pub enum LinkKind("link kind") {
        #[default]
        Executable => "executable",
        DynamicLibrary => "dynamic-library",
        StaticLibrary => "static-library",
    }
}

/// A user-supplied file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAction {
    pub path: String,
    pub file_type: FileType,
}

/// The closed set of job action kinds. Every kind has exactly one
/// invocation builder on a toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum JobActionKind {
    Compile,
    Interpret,
    Backend,
    MergeModule,
    ModuleWrap,
    Repl {
        #[serde(default)]
        mode: ReplMode,
    },
    GenerateDsym,
    VerifyDebugInfo,
    GeneratePch {
        /// Output directory for a persistent PCH; `None` writes a single
        /// PCH file to the action's primary output.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        persistent_dir: Option<String>,
    },
    AutolinkExtract,
    Link {
        #[serde(default)]
        link: LinkKind,
    },
}

impl JobActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            JobActionKind::Compile => "compile",
            JobActionKind::Interpret => "interpret",
            JobActionKind::Backend => "backend",
            JobActionKind::MergeModule => "merge-module",
            JobActionKind::ModuleWrap => "module-wrap",
            JobActionKind::Repl { .. } => "repl",
            JobActionKind::GenerateDsym => "generate-dsym",
            JobActionKind::VerifyDebugInfo => "verify-debug-info",
            JobActionKind::GeneratePch { .. } => "generate-pch",
            JobActionKind::AutolinkExtract => "autolink-extract",
            JobActionKind::Link { .. } => "link",
        }
    }

    pub fn is_compile(&self) -> bool {
        matches!(self, JobActionKind::Compile)
    }
}

impl std::fmt::Display for JobActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A step that turns its inputs into a new artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAction {
    pub kind: JobActionKind,
    pub inputs: Vec<ActionId>,
    pub output_type: FileType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Input(InputAction),
    Job(JobAction),
}

impl Action {
    /// Type of the file this action provides to its consumers.
    pub fn file_type(&self) -> FileType {
        match self {
            Action::Input(input) => input.file_type,
            Action::Job(job) => job.output_type,
        }
    }

    pub fn as_input(&self) -> Option<&InputAction> {
        match self {
            Action::Input(input) => Some(input),
            Action::Job(_) => None,
        }
    }

    pub fn as_job(&self) -> Option<&JobAction> {
        match self {
            Action::Job(job) => Some(job),
            Action::Input(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("{action} refers to unknown input {input}")]
    UnknownInput { action: String, input: ActionId },
    #[error("action graph is full")]
    Full,
}

/// Arena of immutable actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGraph {
    actions: Vec<Action>,
}

impl ActionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(
        &mut self,
        path: impl Into<String>,
        file_type: FileType,
    ) -> Result<ActionId, GraphError> {
        self.push(Action::Input(InputAction { path: path.into(), file_type }))
    }

    /// Add a job action. Every input must already be in the graph.
    pub fn add_job(
        &mut self,
        kind: JobActionKind,
        inputs: Vec<ActionId>,
        output_type: FileType,
    ) -> Result<ActionId, GraphError> {
        if let Some(missing) = inputs.iter().find(|id| id.index() >= self.actions.len()) {
            return Err(GraphError::UnknownInput { action: kind.to_string(), input: *missing });
        }
        self.push(Action::Job(JobAction { kind, inputs, output_type }))
    }

    fn push(&mut self, action: Action) -> Result<ActionId, GraphError> {
        let id = u32::try_from(self.actions.len()).map_err(|_| GraphError::Full)?;
        self.actions.push(action);
        Ok(ActionId(id))
    }

    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(id.index())
    }

    pub fn input(&self, id: ActionId) -> Option<&InputAction> {
        self.get(id).and_then(Action::as_input)
    }

    pub fn job(&self, id: ActionId) -> Option<&JobAction> {
        self.get(id).and_then(Action::as_job)
    }

    /// All actions with their ids, in arena (topological) order.
    pub fn iter(&self) -> impl Iterator<Item = (ActionId, &Action)> {
        (0u32..).zip(&self.actions).map(|(i, a)| (ActionId(i), a))
    }

    /// User-supplied inputs in the order they were added.
    pub fn inputs(&self) -> impl Iterator<Item = (ActionId, &InputAction)> {
        self.iter().filter_map(|(id, a)| a.as_input().map(|input| (id, input)))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
