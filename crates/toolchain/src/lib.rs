// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drv-toolchain: turns an action graph into concrete jobs.
//!
//! Construction is synchronous and side-effect free apart from temp-path
//! allocation in the [`Compilation`]; list files are described, not written.

pub mod assembler;
pub mod batch;
pub mod compilation;
pub mod config;
pub mod env;
pub mod filelist;
pub mod frontend;
pub mod invocation;
pub mod job_context;
pub mod paths;
pub mod program_cache;
pub mod toolchain;
pub mod toolchains;

#[cfg(test)]
mod test_helpers;

pub use assembler::{build_jobs, construct_job, JobPlan};
pub use batch::{
    construct_batch_job, form_batches, job_is_batchable, jobs_are_batch_combinable,
    partition_batchable, BatchPlan,
};
pub use compilation::{Compilation, CompilationError};
pub use config::{ConfigError, DriverConfig, TOO_MANY_FILES};
pub use filelist::{filelist_entries, job_filelists};
pub use invocation::InvocationInfo;
pub use job_context::JobContext;
pub use program_cache::{ProgramCache, ProgramLookup};
pub use toolchain::{
    can_compile_input_argument_be_primary, construct_invocation, resolve_executable, ToolChain,
    ToolChainBase, SWIFT_EXECUTABLE_NAME,
};
pub use toolchains::{for_triple, Darwin, GenericUnix};
