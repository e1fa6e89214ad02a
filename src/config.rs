// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

/// Locations and output options for one patch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchConfig {
    /// Compiler debug dump to recover enums from.
    pub dump_path: PathBuf,
    /// Module description document to patch.
    pub document_path: PathBuf,
    /// Where to write the patched document. `None` writes back over
    /// `document_path`.
    pub output_path: Option<PathBuf>,
    /// Compute and report, but do not write anything.
    pub dry_run: bool,
    /// Spaces per indentation level in the written document.
    pub indent: usize,
}

impl Default for PatchConfig {
    fn default() -> Self {
        PatchConfig {
            dump_path: PathBuf::from("dsyminitial.log"),
            document_path: PathBuf::from("bluespec.json"),
            output_path: None,
            dry_run: false,
            indent: 4,
        }
    }
}

impl PatchConfig {
    /// The path the patched document is written to.
    pub fn destination(&self) -> &Path {
        self.output_path.as_deref().unwrap_or(&self.document_path)
    }
}
