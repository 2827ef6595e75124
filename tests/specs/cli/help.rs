// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("jobs").stdout_has("type");
}

#[test]
fn jobs_help_lists_options() {
    cli()
        .args(&["jobs", "--help"])
        .passes()
        .stdout_has("--batch")
        .stdout_has("--format")
        .stdout_has("--config")
        .stdout_has("--temp-dir");
}

#[test]
fn version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn no_args_is_a_usage_error() {
    let out = cli().fails_with(2);
    assert!(out.stderr.contains("Usage:"));
}
