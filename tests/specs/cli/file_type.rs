// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drv type` specs

use crate::prelude::*;

#[test]
fn known_extensions() {
    cli().args(&["type", "swift"]).passes().stdout_eq("swift\n");
    cli().args(&["type", ".o"]).passes().stdout_eq("object\n");
    cli().args(&["type", "swiftdeps"]).passes().stdout_eq("swift-dependencies\n");
}

#[test]
fn json_reports_source_files() {
    let out = cli().args(&["type", "sil", "--format", "json"]).passes();
    let value = out.json();
    assert_eq!(value["type"], "sil");
    assert_eq!(value["source"], true);
}

#[test]
fn unknown_extension_fails() {
    cli().args(&["type", "xyz"]).fails_with(3).stderr_has("unknown extension 'xyz'");
}
