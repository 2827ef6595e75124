// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plan files: an action graph plus the outputs each step writes.
//!
//! ```toml
//! target = "x86_64-unknown-linux-gnu"
//! driver = "/opt/swift/bin/swift-frontend"
//! inputs = ["main.swift", { path = "libutil.a", type = "object" }]
//!
//! [[steps]]
//! name = "compile-main"
//! kind = "compile"
//! inputs = ["main.swift"]
//! output_type = "object"
//! outputs = [{ input = "main.swift", primary = "main.o" }]
//! ```
//!
//! Steps name their inputs by input path or by an earlier step's name, so
//! plans are topologically ordered by construction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use drv_core::{
    ActionGraph, ActionId, ArgList, CommandOutput, FileType, GraphError, JobActionKind,
    OutputEntry, OutputInfo, OutputMode, Triple,
};
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("failed to read plan {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid plan {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid plan {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("step '{step}' refers to unknown input '{name}'")]
    UnknownReference { step: String, name: String },
    #[error("'{0}' is defined more than once")]
    DuplicateName(String),
    #[error("cannot infer a file type for '{0}'; give it an explicit type")]
    UnknownType(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

fn default_driver() -> PathBuf {
    PathBuf::from("swift-frontend")
}

fn default_module_name() -> String {
    "main".to_string()
}

fn default_output_type() -> FileType {
    FileType::Object
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    pub target: Triple,
    /// The frontend binary; other tools are looked for beside it.
    #[serde(default = "default_driver")]
    pub driver: PathBuf,
    #[serde(default = "default_module_name")]
    pub module_name: String,
    #[serde(default)]
    pub mode: OutputMode,
    #[serde(default = "default_output_type")]
    pub output_type: FileType,
    #[serde(default)]
    pub args: ArgList,
    #[serde(default)]
    pub inputs: Vec<PlanInput>,
    #[serde(default)]
    pub steps: Vec<PlanStep>,
}

/// A user input: a bare path typed by extension, or a path with its type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlanInput {
    Path(String),
    Typed {
        path: String,
        #[serde(rename = "type")]
        file_type: FileType,
    },
}

impl PlanInput {
    pub fn path(&self) -> &str {
        match self {
            PlanInput::Path(path) | PlanInput::Typed { path, .. } => path,
        }
    }

    pub fn file_type(&self) -> FileType {
        match self {
            PlanInput::Path(path) => FileType::for_path(path),
            PlanInput::Typed { file_type, .. } => *file_type,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanStep {
    pub name: String,
    #[serde(flatten)]
    pub kind: JobActionKind,
    #[serde(default)]
    pub inputs: Vec<String>,
    pub output_type: FileType,
    #[serde(default)]
    pub outputs: Vec<OutputEntry>,
    #[serde(default)]
    pub index_file_path: Option<String>,
}

/// A plan lowered onto an action graph.
#[derive(Debug)]
pub struct BuiltPlan {
    pub triple: Triple,
    pub driver: PathBuf,
    pub args: ArgList,
    pub output_info: OutputInfo,
    pub graph: ActionGraph,
    pub outputs: HashMap<ActionId, CommandOutput>,
    /// Step names by job action, in plan order.
    pub steps: IndexMap<ActionId, String>,
}

impl Plan {
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| PlanError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text, path)
    }

    /// Parse as TOML for `.toml` paths, JSON otherwise.
    pub fn parse(text: &str, path: &Path) -> Result<Self, PlanError> {
        let path_buf = || path.to_path_buf();
        if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(text).map_err(|source| PlanError::Toml { path: path_buf(), source })
        } else {
            serde_json::from_str(text).map_err(|source| PlanError::Json { path: path_buf(), source })
        }
    }

    pub fn build(self) -> Result<BuiltPlan, PlanError> {
        let mut graph = ActionGraph::new();
        let mut names: HashMap<String, ActionId> = HashMap::new();

        for input in &self.inputs {
            let file_type = input.file_type();
            if file_type == FileType::Invalid {
                return Err(PlanError::UnknownType(input.path().to_string()));
            }
            if names.contains_key(input.path()) {
                return Err(PlanError::DuplicateName(input.path().to_string()));
            }
            let id = graph.add_input(input.path(), file_type)?;
            names.insert(input.path().to_string(), id);
        }

        let mut outputs = HashMap::new();
        let mut steps = IndexMap::new();
        for step in self.steps {
            if names.contains_key(&step.name) {
                return Err(PlanError::DuplicateName(step.name));
            }
            let inputs = step
                .inputs
                .iter()
                .map(|name| {
                    names.get(name).copied().ok_or_else(|| PlanError::UnknownReference {
                        step: step.name.clone(),
                        name: name.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let id = graph.add_job(step.kind, inputs, step.output_type)?;

            let mut output = CommandOutput::new(step.output_type);
            for entry in step.outputs {
                output.push_entry(entry);
            }
            if let Some(index) = step.index_file_path {
                output = output.with_index_file_path(index);
            }
            outputs.insert(id, output);
            names.insert(step.name.clone(), id);
            steps.insert(id, step.name);
        }

        tracing::debug!(actions = graph.len(), steps = steps.len(), "loaded plan");
        Ok(BuiltPlan {
            triple: self.target,
            driver: self.driver,
            args: self.args,
            output_info: OutputInfo::new(self.mode, self.output_type, self.module_name),
            graph,
            outputs,
            steps,
        })
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
