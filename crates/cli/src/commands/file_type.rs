// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drv type`: look up the file type for an extension.

use anyhow::Result;
use clap::Args;
use drv_core::FileType;

use crate::exit_error::{ExitError, EXIT_NOT_FOUND};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct TypeArgs {
    /// Extension, with or without the leading dot
    pub extension: String,
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

pub fn handle(args: TypeArgs) -> Result<()> {
    let ext = args.extension.trim_start_matches('.');
    let ty = FileType::from_extension(ext);
    if ty == FileType::Invalid {
        return Err(ExitError::new(EXIT_NOT_FOUND, format!("unknown extension '{ext}'")).into());
    }
    match args.format {
        OutputFormat::Text => println!("{ty}"),
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "extension": ext,
                "type": ty,
                "source": ty.is_part_of_swift_compilation(),
            });
            println!("{}", serde_json::to_string_pretty(&obj)?);
        }
    }
    Ok(())
}
