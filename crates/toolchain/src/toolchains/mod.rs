// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete toolchains and selection by target.

mod darwin;
mod unix;

use std::path::PathBuf;

use drv_core::Triple;

pub use darwin::Darwin;
pub use unix::GenericUnix;

use crate::toolchain::{ToolChain, ToolChainBase};

/// Short runtime name clang uses for a `-sanitize=` value.
pub fn sanitizer_runtime_name(sanitizer: &str) -> &str {
    match sanitizer {
        "address" => "asan",
        "thread" => "tsan",
        "undefined" => "ubsan",
        other => other,
    }
}

/// The toolchain for `triple`, with the frontend at `driver_path`.
pub fn for_triple(driver_path: impl Into<PathBuf>, triple: Triple) -> Box<dyn ToolChain> {
    let darwin = triple.is_darwin();
    let base = ToolChainBase::new(driver_path, triple);
    if darwin {
        Box::new(Darwin::new(base))
    } else {
        Box::new(GenericUnix::new(base))
    }
}
