// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-file compiles and links without batching.

use crate::prelude::*;

#[test]
fn per_file_compile_and_link() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    jobs(&project, &plan).passes().stdout_eq(
        "job#0 compile-a (compile)
  /opt/swift/bin/swift-frontend -frontend -c -frontend-mode single-file -primary-file a.swift b.swift -emit-reference-dependencies-path a.swiftdeps -o a.o -target x86_64-unknown-linux-gnu -module-name App
job#1 compile-b (compile)
  /opt/swift/bin/swift-frontend -frontend -c -frontend-mode single-file a.swift -primary-file b.swift -emit-reference-dependencies-path b.swiftdeps -o b.o -target x86_64-unknown-linux-gnu -module-name App
job#2 link after job#0, job#1
  clang++ -fuse-ld=gold -pie -Xlinker -rpath -Xlinker /opt/swift/lib/swift/linux /opt/swift/lib/swift/linux/x86_64/swiftrt.o a.o b.o -L /opt/swift/lib/swift/linux -lswiftCore --target=x86_64-unknown-linux-gnu -o app
",
    );
}

#[test]
fn missing_tools_are_logged() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    jobs(&project, &plan).passes().stderr_has("tool not found, using bare name");
}

#[test]
fn whole_module_compile_from_toml() {
    let project = Project::empty();
    let plan = project.file(
        "wmo.toml",
        r#"
target = "x86_64-unknown-linux-gnu"
driver = "/opt/swift/bin/swift-frontend"
module_name = "Lib"
mode = "whole-module"
inputs = ["a.swift", "b.swift"]

[args]
opt_level = "-O"

[[steps]]
name = "compile"
kind = "compile"
inputs = ["a.swift", "b.swift"]
output_type = "object"
outputs = [{ primary = "Lib.o" }]
"#,
    );
    jobs(&project, &plan).passes().stdout_has(
        "  /opt/swift/bin/swift-frontend -frontend -c -frontend-mode whole-module a.swift b.swift -o Lib.o -target x86_64-unknown-linux-gnu -O -module-name Lib\n",
    );
}

#[test]
fn json_format() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    let out = jobs(&project, &plan).args(&["--format", "json"]).passes();
    let value = out.json();
    let jobs = value.as_array().unwrap();
    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[0]["name"], "compile-a");
    assert_eq!(jobs[0]["executable"], DRIVER);
    assert_eq!(jobs[2]["kind"], "link");
    assert_eq!(jobs[2]["after"], serde_json::json!([0, 1]));
}
