// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use log::{info, warn};
use serde_json::{Map, Value};

use crate::document::{modules_mut, typedefs_mut};

/// Returns the sized bit-vector type expression for `width` bits.
pub fn bit_vector_type(width: u64) -> String {
    format!("Bit#({width})")
}

/// Width of a field descriptor: its `width` attribute, or failing that the
/// span of its `max`/`min` bit positions.
fn field_width(field: &Map<String, Value>) -> Option<u64> {
    if let Some(width) = field.get("width").and_then(Value::as_u64) {
        return Some(width);
    }
    let max = field.get("max").and_then(Value::as_i64)?;
    let min = field.get("min").and_then(Value::as_i64)?;
    max.abs_diff(min).checked_add(1)
}

/// A placeholder field that was rewritten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewrittenField {
    pub typedef: String,
    pub field: Option<String>,
    pub new_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub modules: IndexMap<String, Vec<RewrittenField>>,
    /// Placeholders left as they were because no width could be determined.
    pub unresolved: usize,
}

impl NormalizeReport {
    pub fn total_rewritten(&self) -> usize {
        self.modules.values().map(Vec::len).sum()
    }
}

/// Rewrites self-referential placeholder fields: a field inside
/// `typedefs[T]` whose `type` is `T` gets `Bit#(width)` instead. Fields of
/// any other type are not touched.
pub fn normalize_placeholders(document: &mut Value) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for (module_name, module) in modules_mut(document) {
        let Some(typedefs) = typedefs_mut(module) else {
            continue;
        };
        let mut rewritten = Vec::new();

        for (type_name, definition) in typedefs.iter_mut() {
            let Some(fields) = definition.as_array_mut() else {
                continue;
            };
            for field in fields.iter_mut().filter_map(Value::as_object_mut) {
                if field.get("type").and_then(Value::as_str) != Some(type_name.as_str()) {
                    continue;
                }
                let var = field.get("var").and_then(Value::as_str).map(str::to_string);
                let Some(width) = field_width(field) else {
                    warn!(
                        "Placeholder field {} of '{type_name}' in '{module_name}' has no width; leaving it unchanged",
                        var.as_deref().unwrap_or("<unnamed>")
                    );
                    report.unresolved += 1;
                    continue;
                };
                let new_type = bit_vector_type(width);
                field.insert("type".to_string(), Value::from(new_type.clone()));
                rewritten.push(RewrittenField {
                    typedef: type_name.clone(),
                    field: var,
                    new_type,
                });
            }
        }

        if !rewritten.is_empty() {
            info!(
                "Rewrote {} placeholder field(s) in '{module_name}'",
                rewritten.len()
            );
            report.modules.insert(module_name.to_string(), rewritten);
        }
    }

    report
}
