// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! List files replace inline arguments when forced or over the threshold.

use crate::prelude::*;

#[test]
fn forced_list_files() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    jobs(&project, &plan)
        .env("DRV_FORCE_FILELISTS", "1")
        .arg("--show-filelists")
        .passes()
        .stdout_has(
            "-frontend-mode single-file -filelist /tmp/drv-jobs/sources-0 -primary-filelist /tmp/drv-jobs/primaryInputs-1 -emit-reference-dependencies-path a.swiftdeps -output-filelist /tmp/drv-jobs/outputs-2 ",
        )
        .stdout_has("  top-level-inputs /tmp/drv-jobs/sources-0:\n    a.swift\n    b.swift\n")
        .stdout_has("  primary-inputs /tmp/drv-jobs/primaryInputs-1:\n    a.swift\n")
        .stdout_has("  outputs /tmp/drv-jobs/outputs-2:\n    a.o\n")
        .stdout_has("@/tmp/drv-jobs/inputs-5.LinkFileList")
        .stdout_has("  link-inputs /tmp/drv-jobs/inputs-5.LinkFileList:\n    a.o\n    b.o\n");
}

#[test]
fn all_sources_list_is_shared() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    let out = jobs(&project, &plan).env("DRV_FORCE_FILELISTS", "1").passes();
    assert_eq!(out.stdout.matches("-filelist /tmp/drv-jobs/sources-0").count(), 2);
}

#[test]
fn threshold_is_strict() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    // two sources against a threshold of two stay inline
    jobs(&project, &plan)
        .env("DRV_FILELIST_THRESHOLD", "2")
        .passes()
        .stdout_lacks("-filelist");
    // one primary against a threshold of one stays inline too
    jobs(&project, &plan)
        .env("DRV_FILELIST_THRESHOLD", "1")
        .passes()
        .stdout_has("-filelist /tmp/drv-jobs/sources-0 -primary-file a.swift -emit-reference")
        .stdout_lacks("-primary-filelist");
}

#[test]
fn batch_supplementary_map() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    jobs(&project, &plan)
        .env("DRV_FORCE_FILELISTS", "1")
        .args(&["--batch", "--show-filelists"])
        .passes()
        .stdout_has("-supplementary-output-file-map")
        .stdout_has(
            "    \"a.swift\":\n      swift-dependencies: \"a.swiftdeps\"\n    \"b.swift\":\n      swift-dependencies: \"b.swiftdeps\"\n",
        );
}
