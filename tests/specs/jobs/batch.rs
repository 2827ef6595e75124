// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `--batch` merges compatible per-file compiles.

use crate::prelude::*;

#[test]
fn compiles_merge_into_one_batch() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    jobs(&project, &plan).arg("--batch").passes().stdout_eq(
        "job#3 batch[compile-a,compile-b] (compile)
  /opt/swift/bin/swift-frontend -frontend -c -frontend-mode batch -primary-file a.swift -primary-file b.swift -emit-reference-dependencies-path a.swiftdeps -emit-reference-dependencies-path b.swiftdeps -o a.o -o b.o -target x86_64-unknown-linux-gnu -module-name App
job#2 link after job#3
  clang++ -fuse-ld=gold -pie -Xlinker -rpath -Xlinker /opt/swift/lib/swift/linux /opt/swift/lib/swift/linux/x86_64/swiftrt.o a.o b.o -L /opt/swift/lib/swift/linux -lswiftCore --target=x86_64-unknown-linux-gnu -o app
",
    );
}

#[test]
fn differing_outputs_stay_apart() {
    let project = Project::empty();
    let plan = project.file(
        "app.json",
        &LINUX_APP.replace(
            r#"{ "input": "b.swift", "primary": "b.o",
                    "supplementary": { "swift-dependencies": "b.swiftdeps" } }"#,
            r#"{ "input": "b.swift", "primary": "b.o" }"#,
        ),
    );
    jobs(&project, &plan)
        .arg("--batch")
        .passes()
        .stdout_has("job#0 compile-a (compile)")
        .stdout_has("job#1 compile-b (compile)")
        .stdout_lacks("batch[");
}

#[test]
fn size_limit_from_config() {
    let project = Project::empty();
    let plan = project.file(
        "app.json",
        r#"{
  "target": "x86_64-unknown-linux-gnu",
  "driver": "/opt/swift/bin/swift-frontend",
  "inputs": ["a.swift", "b.swift", "c.swift"],
  "steps": [
    { "name": "a", "kind": "compile", "inputs": ["a.swift"], "output_type": "object",
      "outputs": [{ "input": "a.swift", "primary": "a.o" }] },
    { "name": "b", "kind": "compile", "inputs": ["b.swift"], "output_type": "object",
      "outputs": [{ "input": "b.swift", "primary": "b.o" }] },
    { "name": "c", "kind": "compile", "inputs": ["c.swift"], "output_type": "object",
      "outputs": [{ "input": "c.swift", "primary": "c.o" }] }
  ]
}"#,
    );
    let config = project.file("drv.toml", "batch_size_limit = 2\n");
    jobs(&project, &plan)
        .arg("--batch")
        .arg("--config")
        .arg(&config)
        .passes()
        .stdout_has("job#3 batch[a,b] (compile)")
        .stdout_has("job#2 c (compile)");
}

#[test]
fn batch_json_lists_constituents() {
    let project = Project::empty();
    let plan = project.file("app.json", LINUX_APP);
    let out = jobs(&project, &plan).args(&["--batch", "--format", "json"]).passes();
    let value = out.json();
    assert_eq!(value[0]["constituents"], serde_json::json!([0, 1]));
    assert_eq!(value[1]["after"], serde_json::json!([3]));
}
