// SPDX-License-Identifier: Apache-2.0

use std::sync::LazyLock;

use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::names::normalize_qualified_name;

/// Qualified names (in `pkg::Type` form) of every type the debug dump
/// declares as an enum.
pub type EnumTypeSet = IndexSet<String>;

/// Start of a type declaration: `(pkg.Type, TypeInfo ...`.
static DECLARATION_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([\w.]+),\s*TypeInfo\b").unwrap());

/// Kind of a type declaration, with the optional bracketed constructor list:
/// `(TIdata (enum) [Red, Green, Blue]`.
static TIDATA_KIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(TIdata\s+\((\w+)\)\s*(?:\[([^\]]*)\])?").unwrap());

/// Scans the dump for `TIdata (enum)` declarations and returns each enum's
/// normalized name together with the member names listed in the declaration.
///
/// A declaration is only recognized within a single line. Everything between
/// `TypeInfo` and the first `(TIdata` that follows it (the kind signature and
/// calling-convention arrows the dump prints there) is skipped. The `TIdata`
/// clause must belong to the same declaration: the search for it stops at the
/// next `(name, TypeInfo` head, so a struct declaration followed by an enum
/// declaration on the same line never attributes the enum kind to the struct.
pub fn scan_enum_declarations(text: &str) -> IndexMap<String, Vec<String>> {
    let mut declarations = IndexMap::new();

    for line in text.lines() {
        let heads: Vec<_> = DECLARATION_HEAD.captures_iter(line).collect();
        for (i, head) in heads.iter().enumerate() {
            let whole = head.get(0).unwrap();
            let end = heads
                .get(i + 1)
                .map(|next| next.get(0).unwrap().start())
                .unwrap_or(line.len());
            let body = &line[whole.end()..end];

            let Some(kind) = TIDATA_KIND.captures(body) else {
                continue;
            };
            if &kind[1] != "enum" {
                continue;
            }

            let members = kind
                .get(2)
                .map(|list| {
                    list.as_str()
                        .split(',')
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            declarations.insert(normalize_qualified_name(&head[1]), members);
        }
    }

    declarations
}

/// Returns the set of types confirmed as enums by a `TIdata (enum)`
/// declaration. An empty set is not an error.
pub fn identify_enum_types(text: &str) -> EnumTypeSet {
    scan_enum_declarations(text).into_keys().collect()
}
