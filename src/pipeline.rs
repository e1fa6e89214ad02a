// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use log::{info, warn};
use serde_json::Value;

use crate::catalog::EnumCatalog;
use crate::enum_type::{EnumTypeSet, scan_enum_declarations};
use crate::error::Result;
use crate::merge::{MergeReport, merge_enum_catalog};
use crate::placeholder::{NormalizeReport, normalize_placeholders};
use crate::tags::extract_enum_catalog;

/// Summary of one in-memory patch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Number of types declared as enums in the dump.
    pub enum_types: usize,
    pub catalog: EnumCatalog,
    pub merge: MergeReport,
    pub normalize: NormalizeReport,
}

impl PatchReport {
    /// Whether the document was modified.
    pub fn changed(&self) -> bool {
        self.merge.total_changed() > 0 || self.normalize.total_rewritten() > 0
    }
}

/// Builds the enum catalog from a debug dump: the declaration pass confirms
/// which types are enums, the tag pass recovers their members.
pub fn build_enum_catalog(dump: &str) -> Result<EnumCatalog> {
    recover_enums(dump).map(|(_, catalog)| catalog)
}

/// Runs both passes and returns the number of declared enum types along with
/// the catalog.
fn recover_enums(dump: &str) -> Result<(usize, EnumCatalog)> {
    let declarations = scan_enum_declarations(dump);
    info!("Found {} enum type declaration(s)", declarations.len());
    if declarations.is_empty() {
        warn!("No enum types found in the debug dump");
    }

    let enum_types: EnumTypeSet = declarations.keys().cloned().collect();
    let catalog = extract_enum_catalog(dump, &enum_types)?;
    check_declared_members(&declarations, &catalog);
    Ok((declarations.len(), catalog))
}

/// Reports disagreements between the members a declaration lists and the
/// members that actually received a tag.
fn check_declared_members(declarations: &IndexMap<String, Vec<String>>, catalog: &EnumCatalog) {
    for (enum_name, declared) in declarations {
        let Some(tagged) = catalog.get(enum_name) else {
            if !declared.is_empty() {
                warn!("Enum '{enum_name}' is declared but has no tag records");
            }
            continue;
        };
        for name in declared {
            if !tagged.iter().any(|m| &m.name == name) {
                warn!("Enum '{enum_name}': declared member '{name}' has no tag record");
            }
        }
        for member in tagged {
            if !declared.is_empty() && !declared.contains(&member.name) {
                warn!(
                    "Enum '{enum_name}': tagged member '{}' is not in the declaration",
                    member.name
                );
            }
        }
    }
}

/// Recovers the enums in `dump` and applies them to `document`: merges every
/// referenced enum into each module, then rewrites self-referential
/// placeholder fields. Nothing is modified if the dump contains a malformed
/// tag record.
pub fn patch_document(dump: &str, document: &mut Value) -> Result<PatchReport> {
    let (enum_types, catalog) = recover_enums(dump)?;

    let merge = merge_enum_catalog(document, &catalog);
    let normalize = normalize_placeholders(document);

    Ok(PatchReport {
        enum_types,
        catalog,
        merge,
        normalize,
    })
}
