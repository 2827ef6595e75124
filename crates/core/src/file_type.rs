// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File types known to the driver and the extension lookup table.

crate::string_enum! {
    /// Language or artifact kind of a file flowing through the driver.
    ///
    /// The string form is the type's name, not its extension; several types
    /// share an extension (`raw-sil` and `sil`) or have none (`index-data`).
    pub enum FileType("file type") {
        Swift => "swift",
        Sil => "sil",
        Sib => "sib",
        RawSil => "raw-sil",
        RawSib => "raw-sib",
        Object => "object",
        Assembly => "assembly",
        LlvmIr => "llvm-ir",
        LlvmBc => "llvm-bc",
        AstDump => "ast-dump",
        Image => "image",
        SwiftModule => "swiftmodule",
        SwiftDoc => "swiftdoc",
        SwiftSourceInfo => "swiftsourceinfo",
        SwiftInterface => "swiftinterface",
        SwiftDeps => "swift-dependencies",
        Dependencies => "dependencies",
        SerializedDiagnostics => "diagnostics",
        ObjcHeader => "objc-header",
        Pch => "pch",
        Tbd => "tbd",
        ModuleTrace => "module-trace",
        OptRecord => "opt-record",
        ImportedModules => "imported-modules",
        IndexData => "index-data",
        Remapping => "remap",
        AutolinkFile => "autolink",
        Dsym => "dSYM",
        /// No output is produced.
        Nothing => "nothing",
        /// Unrecognized or missing extension.
        Invalid => "invalid",
    }
}

impl FileType {
    /// The extension files of this type are written with, without the dot.
    ///
    /// Types that never name a file on disk return an empty string.
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Swift => "swift",
            FileType::Sil | FileType::RawSil => "sil",
            FileType::Sib | FileType::RawSib => "sib",
            FileType::Object => "o",
            FileType::Assembly => "s",
            FileType::LlvmIr => "ll",
            FileType::LlvmBc => "bc",
            FileType::AstDump => "ast",
            FileType::Image => "out",
            FileType::SwiftModule => "swiftmodule",
            FileType::SwiftDoc => "swiftdoc",
            FileType::SwiftSourceInfo => "swiftsourceinfo",
            FileType::SwiftInterface => "swiftinterface",
            FileType::SwiftDeps => "swiftdeps",
            FileType::Dependencies => "d",
            FileType::SerializedDiagnostics => "dia",
            FileType::ObjcHeader => "h",
            FileType::Pch => "pch",
            FileType::Tbd => "tbd",
            FileType::ModuleTrace => "trace.json",
            FileType::OptRecord => "opt.yaml",
            FileType::ImportedModules => "importedmodules",
            FileType::Remapping => "remap",
            FileType::AutolinkFile => "autolink",
            FileType::Dsym => "dSYM",
            FileType::IndexData | FileType::Nothing | FileType::Invalid => "",
        }
    }

    /// Default type for a file extension (no leading dot).
    ///
    /// Empty or unrecognized extensions map to [`FileType::Invalid`]. Raw SIL
    /// and SIB are never inferred from an extension.
    pub fn from_extension(ext: &str) -> FileType {
        match ext {
            "swift" => FileType::Swift,
            "sil" => FileType::Sil,
            "sib" => FileType::Sib,
            "o" => FileType::Object,
            "s" => FileType::Assembly,
            "ll" => FileType::LlvmIr,
            "bc" => FileType::LlvmBc,
            "ast" => FileType::AstDump,
            "out" => FileType::Image,
            "swiftmodule" => FileType::SwiftModule,
            "swiftdoc" => FileType::SwiftDoc,
            "swiftsourceinfo" => FileType::SwiftSourceInfo,
            "swiftinterface" => FileType::SwiftInterface,
            "swiftdeps" => FileType::SwiftDeps,
            "d" => FileType::Dependencies,
            "dia" => FileType::SerializedDiagnostics,
            "h" => FileType::ObjcHeader,
            "pch" => FileType::Pch,
            "tbd" => FileType::Tbd,
            "importedmodules" => FileType::ImportedModules,
            "remap" => FileType::Remapping,
            "autolink" => FileType::AutolinkFile,
            "dSYM" => FileType::Dsym,
            _ => FileType::Invalid,
        }
    }

    /// Type of a path, judged by its final extension.
    pub fn for_path(path: &str) -> FileType {
        std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(FileType::Invalid, FileType::from_extension)
    }

    /// True for inputs the frontend consumes as source: Swift, SIL and SIB.
    pub fn is_part_of_swift_compilation(self) -> bool {
        matches!(
            self,
            FileType::Swift | FileType::Sil | FileType::Sib | FileType::RawSil | FileType::RawSib
        )
    }

    pub fn is_valid(self) -> bool {
        self != FileType::Invalid
    }
}

#[cfg(test)]
#[path = "file_type_tests.rs"]
mod tests;
