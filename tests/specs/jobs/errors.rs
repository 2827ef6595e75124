// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bad plans and configs exit with status 2.

use crate::prelude::*;

#[test]
fn missing_plan() {
    let project = Project::empty();
    jobs(&project, &project.path().join("nope.json"))
        .fails_with(2)
        .stderr_has("failed to read plan");
}

#[test]
fn unknown_reference() {
    let project = Project::empty();
    let plan = project.file(
        "bad.json",
        r#"{"target": "x86_64-unknown-linux-gnu",
            "steps": [{"name": "c", "kind": "compile", "inputs": ["x.swift"], "output_type": "object"}]}"#,
    );
    jobs(&project, &plan).fails_with(2).stderr_has("step 'c' refers to unknown input 'x.swift'");
}

#[test]
fn unknown_step_kind() {
    let project = Project::empty();
    let plan = project.file(
        "bad.json",
        r#"{"target": "x86_64-unknown-linux-gnu",
            "steps": [{"name": "c", "kind": "teleport", "output_type": "object"}]}"#,
    );
    jobs(&project, &plan).fails_with(2).stderr_has("invalid plan");
}

#[test]
fn bad_config() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    let config = project.file("drv.toml", "filelist_threshold = 0\n");
    jobs(&project, &plan)
        .arg("--config")
        .arg(&config)
        .fails_with(2)
        .stderr_has("filelist_threshold must be at least 1");
}
