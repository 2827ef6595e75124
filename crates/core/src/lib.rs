// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drv-core: data model for the driver's job-construction layer

pub mod macros;

pub mod action;
pub mod args;
pub mod file_type;
pub mod job;
pub mod output;
pub mod triple;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use action::{
    Action, ActionGraph, ActionId, GraphError, InputAction, JobAction, JobActionKind, LinkKind,
    ReplMode,
};
pub use args::ArgList;
pub use file_type::FileType;
pub use job::{shell_quote, Job, JobId, JobSource, ListFileCategory, ListFileRequest};
pub use macros::UnknownName;
pub use output::{CommandOutput, FrontendMode, OutputEntry, OutputInfo, OutputMode};
pub use triple::{Triple, TripleError};
