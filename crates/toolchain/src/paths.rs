// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime and resource directory lookups shared by the toolchains.

use std::path::{Path, PathBuf};

use drv_core::ArgList;

use crate::toolchain::ToolChain;

/// The target's Swift resource directory, including the platform component.
///
/// An explicit `-resource-dir` wins. Otherwise non-Darwin targets built
/// against an SDK use the SDK's copy, and everything else uses the copy
/// installed beside the driver (`<bin>/../lib/swift`). `shared = false`
/// selects the static runtime (`swift_static`).
pub fn resource_dir<T: ToolChain + ?Sized>(tc: &T, args: &ArgList, shared: bool) -> PathBuf {
    let runtime = if shared { "swift" } else { "swift_static" };
    let base = if let Some(dir) = &args.resource_dir {
        PathBuf::from(dir)
    } else if let Some(sdk) = args.sdk.as_deref().filter(|_| !tc.triple().is_darwin()) {
        Path::new(sdk).join("usr").join("lib").join(runtime)
    } else {
        let install = tc.driver_path().parent().and_then(Path::parent).unwrap_or(Path::new(""));
        install.join("lib").join(runtime)
    };
    base.join(tc.triple().platform_name())
}

/// Directories holding the runtime, in search order.
pub fn runtime_library_paths<T: ToolChain + ?Sized>(
    tc: &T,
    args: &ArgList,
    shared: bool,
) -> Vec<String> {
    let mut paths = vec![display(&resource_dir(tc, args, shared))];
    if let Some(sdk) = &args.sdk {
        paths.push(display(&Path::new(sdk).join("usr").join("lib").join("swift")));
    }
    paths
}

/// Where clang keeps its runtimes (sanitizers, profiling) for this target.
pub fn clang_library_path<T: ToolChain + ?Sized>(tc: &T, args: &ArgList) -> PathBuf {
    let resource = resource_dir(tc, args, true);
    let lib = resource.parent().unwrap_or(&resource).join("clang").join("lib");
    let triple = tc.triple();
    lib.join(if triple.is_darwin() { "darwin" } else { triple.platform_name() })
}

/// Path text as it should appear on a command line.
pub fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
