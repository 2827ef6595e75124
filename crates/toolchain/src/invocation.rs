// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! What an invocation builder hands back to the job assembler.

use drv_core::ListFileRequest;

/// Executable, arguments, environment and list files for one job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationInfo {
    /// A program name; the assembler resolves it to a path.
    pub executable_name: String,
    pub arguments: Vec<String>,
    pub extra_environment: Vec<(String, String)>,
    pub filelists: Vec<ListFileRequest>,
}

impl InvocationInfo {
    pub fn new(executable_name: impl Into<String>) -> Self {
        Self { executable_name: executable_name.into(), ..Self::default() }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.arguments.push(arg.into());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    /// Push `flag value` for each value.
    pub fn flag_each<I, S>(&mut self, flag: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.arguments.push(flag.to_string());
            self.arguments.push(value.into());
        }
        self
    }

    pub fn env(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.extra_environment.push((name.into(), value.into()));
        self
    }

    pub fn filelist(&mut self, request: ListFileRequest) -> &mut Self {
        self.filelists.push(request);
        self
    }
}
