// SPDX-License-Identifier: Apache-2.0

//! Recovers enum definitions from a Bluespec compiler debug dump and stitches
//! them into a module description document.
//!
//! The dump is scanned twice: once for `TIdata (enum)` declarations, which
//! confirm that a type is an enum, and once for `ConInfo` tag records, which
//! give each member's tag. The resulting [`EnumCatalog`] is then merged into
//! every module whose types or ports reference one of its enums, and
//! self-referential placeholder fields are rewritten to `Bit#(N)`.

use log::info;

mod catalog;
pub use catalog::{EnumCatalog, EnumMember};

mod config;
pub use config::PatchConfig;

pub mod document;

mod enum_type;
pub use enum_type::{EnumTypeSet, identify_enum_types, scan_enum_declarations};

mod error;
pub use error::{Error, Result};

pub mod io;

mod merge;
pub use merge::{MergeReport, ModuleMerge, merge_enum_catalog, merge_into_module};

pub mod names;

mod pipeline;
pub use pipeline::{PatchReport, build_enum_catalog, patch_document};

mod placeholder;
pub use placeholder::{NormalizeReport, RewrittenField, bit_vector_type, normalize_placeholders};

mod tags;
pub use tags::{TagRecord, extract_enum_catalog, scan_tag_records};

mod usage;
pub use usage::{FIELD_MARKER, is_struct_body, used_types_in_module};

/// Reads the dump and the document named by `config`, patches the document
/// and writes it to [`PatchConfig::destination`] unless `dry_run` is set.
///
/// Both inputs are read and the whole patch is computed before anything is
/// written, so an error never leaves a partially updated document.
pub fn run(config: &PatchConfig) -> Result<PatchReport> {
    let dump = io::read_debug_dump(&config.dump_path)?;
    let mut document = io::read_document(&config.document_path)?;

    let report = patch_document(&dump, &mut document)?;

    if config.dry_run {
        info!("Dry run; not writing {}", config.destination().display());
    } else {
        io::write_document(config.destination(), &document, config.indent)?;
        info!("Changes saved to {}", config.destination().display());
    }

    Ok(report)
}
