// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Toolchain selection by target.

use crate::prelude::*;

fn macos_plan(link: &str) -> String {
    LINUX_APP
        .replace("x86_64-unknown-linux-gnu", "arm64-apple-macosx13.0")
        .replace(r#""kind": "link","#, &format!(r#""kind": "link", "link": "{link}","#))
}

#[test]
fn darwin_links_with_ld() {
    let project = Project::empty();
    let plan = project.file("app.json", &macos_plan("executable"));
    jobs(&project, &plan).passes().stdout_has(
        "  ld a.o b.o -lobjc -lSystem -arch arm64 -L /opt/swift/lib/swift/macosx -rpath /opt/swift/lib/swift/macosx -macosx_version_min 13.0.0 -no_objc_category_merging -o app\n",
    );
}

#[test]
fn darwin_static_library_uses_libtool() {
    let project = Project::empty();
    let plan = project.file("app.json", &macos_plan("static-library"));
    jobs(&project, &plan).passes().stdout_has("  libtool -static a.o b.o -o app\n");
}

#[test]
fn tools_beside_the_driver_are_used() {
    let project = Project::empty();
    let bin = project.path().join("toolchain/bin");
    project.file("toolchain/bin/swift-frontend", "");
    project.file("toolchain/bin/clang++", "");
    let driver = bin.join("swift-frontend").to_string_lossy().into_owned();
    let plan = project.file("app.json", &LINUX_APP.replace(DRIVER, &driver));
    let clang = bin.join("clang++").to_string_lossy().into_owned();
    jobs(&project, &plan).passes().stdout_has(&format!("  {clang} -fuse-ld=gold"));
}
