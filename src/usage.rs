// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexSet;
use serde_json::Value;

use crate::document::{BLOCKS, ModuleRecord, non_empty_str, typedefs};

/// Field-name key that marks an entry as a struct field rather than an enum
/// member.
pub const FIELD_MARKER: &str = "var";

/// Decides whether a `typedefs` value is a struct body (a list of field
/// descriptors) as opposed to an enum member list or an opaque entry.
///
/// The document does not tag the two shapes, so the decision is structural:
/// a non-empty list of objects whose first element carries a `var` key.
pub fn is_struct_body(definition: &Value) -> bool {
    match definition.as_array() {
        Some(entries) => {
            entries.iter().all(Value::is_object)
                && entries
                    .first()
                    .is_some_and(|first| first.get(FIELD_MARKER).is_some())
        }
        None => false,
    }
}

/// Collects every type name a module references: its own typedef names, the
/// field types of its struct typedefs, and the types of the ports of its
/// blocks.
///
/// Including the typedef names means an enum that is already defined locally
/// always counts as used.
pub fn used_types_in_module(module: &ModuleRecord) -> IndexSet<String> {
    let mut used = IndexSet::new();

    if let Some(typedefs) = typedefs(module) {
        for (type_name, definition) in typedefs {
            if is_struct_body(definition) {
                for field in definition.as_array().into_iter().flatten() {
                    if let Some(ty) = non_empty_str(field, "type") {
                        used.insert(ty.to_string());
                    }
                }
            }
            used.insert(type_name.clone());
        }
    }

    let ports = module
        .get(BLOCKS)
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|blocks| blocks.values())
        .filter_map(|block| block.get("ports").and_then(Value::as_array))
        .flatten();
    for port in ports {
        if let Some(ty) = non_empty_str(port, "type") {
            used.insert(ty.to_string());
        }
    }

    used
}
