// SPDX-License-Identifier: Apache-2.0

use serde_json::{Map, Value};

/// Key of a module's type definition table.
pub const TYPEDEFS: &str = "typedefs";

/// Key of a module's block table.
pub const BLOCKS: &str = "blocks";

/// A module record: one top-level entry of the document that carries a
/// `typedefs` key.
pub type ModuleRecord = Map<String, Value>;

fn is_module(value: &Value) -> bool {
    value.as_object().is_some_and(|m| m.contains_key(TYPEDEFS))
}

/// Names of the module records in the document, in document order. Other
/// top-level entries (such as `"top": "mkTop"`) are not modules.
pub fn module_names(document: &Value) -> Vec<String> {
    modules(document).map(|(name, _)| name.to_string()).collect()
}

pub fn modules(document: &Value) -> impl Iterator<Item = (&str, &ModuleRecord)> {
    document
        .as_object()
        .into_iter()
        .flat_map(|top| top.iter())
        .filter(|(_, v)| is_module(v))
        .filter_map(|(k, v)| v.as_object().map(|m| (k.as_str(), m)))
}

pub fn modules_mut(document: &mut Value) -> impl Iterator<Item = (&str, &mut ModuleRecord)> {
    document
        .as_object_mut()
        .into_iter()
        .flat_map(|top| top.iter_mut())
        .filter(|(_, v)| is_module(v))
        .filter_map(|(k, v)| v.as_object_mut().map(|m| (k.as_str(), m)))
}

/// The module's `typedefs` table, if it is a JSON object.
pub fn typedefs(module: &ModuleRecord) -> Option<&Map<String, Value>> {
    module.get(TYPEDEFS).and_then(Value::as_object)
}

pub fn typedefs_mut(module: &mut ModuleRecord) -> Option<&mut Map<String, Value>> {
    module.get_mut(TYPEDEFS).and_then(Value::as_object_mut)
}

/// Returns the value of `key` when it is a non-empty string.
pub(crate) fn non_empty_str<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
