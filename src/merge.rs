// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use log::{info, warn};
use serde_json::Value;

use crate::catalog::{EnumCatalog, members_to_value};
use crate::document::{ModuleRecord, modules_mut, typedefs_mut};
use crate::usage::used_types_in_module;

/// What the merge did to one module's `typedefs`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleMerge {
    /// Enums that were absent and have been added.
    pub inserted: Vec<String>,
    /// Enums whose previous body differed and has been overwritten.
    pub replaced: Vec<String>,
    /// Enums that were rewritten with an identical body.
    pub unchanged: Vec<String>,
}

impl ModuleMerge {
    /// Number of enum bodies whose content changed.
    pub fn changed(&self) -> usize {
        self.inserted.len() + self.replaced.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Per-module results, for every module that references at least one
    /// cataloged enum.
    pub modules: IndexMap<String, ModuleMerge>,
}

impl MergeReport {
    pub fn total_inserted(&self) -> usize {
        self.modules.values().map(|m| m.inserted.len()).sum()
    }

    pub fn total_replaced(&self) -> usize {
        self.modules.values().map(|m| m.replaced.len()).sum()
    }

    pub fn total_changed(&self) -> usize {
        self.modules.values().map(ModuleMerge::changed).sum()
    }
}

/// Writes every cataloged enum that `module` references into its `typedefs`,
/// replacing whatever body was there before. Returns `None` if the module's
/// `typedefs` is not an object.
pub fn merge_into_module(module: &mut ModuleRecord, catalog: &EnumCatalog) -> Option<ModuleMerge> {
    let used = used_types_in_module(module);
    let typedefs = typedefs_mut(module)?;
    let mut result = ModuleMerge::default();

    for (enum_name, members) in catalog.iter() {
        if !used.contains(enum_name) {
            continue;
        }
        let body = members_to_value(members);
        match typedefs.insert(enum_name.to_string(), body) {
            None => result.inserted.push(enum_name.to_string()),
            Some(previous) if previous == typedefs[enum_name] => {
                result.unchanged.push(enum_name.to_string())
            }
            Some(_) => result.replaced.push(enum_name.to_string()),
        }
    }

    Some(result)
}

/// Merges the catalog into every module record of the document.
///
/// An entry already present under an enum's name is always overwritten with
/// the cataloged member list, so rerunning the merge corrects stale or
/// placeholder bodies. Running it twice with the same catalog is the same as
/// running it once.
pub fn merge_enum_catalog(document: &mut Value, catalog: &EnumCatalog) -> MergeReport {
    let mut report = MergeReport::default();

    for (module_name, module) in modules_mut(document) {
        let Some(result) = merge_into_module(module, catalog) else {
            warn!("Module '{module_name}' has a non-object typedefs entry; skipping");
            continue;
        };
        for enum_name in &result.inserted {
            info!("Inserted '{enum_name}' into '{module_name}'");
        }
        for enum_name in &result.replaced {
            info!("Replaced '{enum_name}' in '{module_name}'");
        }
        if !result.inserted.is_empty() || !result.replaced.is_empty() || !result.unchanged.is_empty()
        {
            report.modules.insert(module_name.to_string(), result);
        }
    }

    if report.total_changed() == 0 {
        warn!(
            "No enum definitions were inserted or replaced; every cataloged enum was either already up to date or not referenced by any module"
        );
    }

    report
}
