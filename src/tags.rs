// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;
use std::sync::LazyLock;

use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, info, warn};
use regex::{Captures, Regex};

use crate::catalog::{EnumCatalog, EnumMember};
use crate::enum_type::EnumTypeSet;
use crate::error::{Error, Result};
use crate::names::{local_name, normalize_qualified_name};

const RECORD_KEYWORD: &str = "ConInfo";

/// A constructor record with its tag assignment:
///
/// `[ConInfo pkg.Type (visible) (pkg.Member :>: (...) -> pkg.Type) (k of n, tag = t :: Bit w)]`
///
/// Matched against one record at a time (see [`records`]), so the spans
/// between the anchors may cross lines and contain brackets. The integer
/// slots capture any word-like token so that garbage there is reported rather
/// than skipped.
static TAG_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)^ConInfo\s+([\w.:]+)\s+\(visible\)\s*",
        r"\(\s*([\w.:]+)\s*:>:?.*?",
        r"\(\s*([-\w]+)\s+of\s+([-\w]+)\s*,\s*tag\s*=\s*([-\w]+)\s*::\s*Bit\s*([-\w]+)\s*\)",
    ))
    .unwrap()
});

/// Splits the dump at every `ConInfo` keyword and yields the tag records
/// among the pieces. A match never extends into the following record.
fn records(text: &str) -> impl Iterator<Item = Captures<'_>> {
    let mut bounds: Vec<usize> = text.match_indices(RECORD_KEYWORD).map(|(i, _)| i).collect();
    bounds.push(text.len());
    bounds
        .into_iter()
        .tuple_windows()
        .filter_map(move |(start, end)| TAG_RECORD.captures(&text[start..end]))
}

/// One tag assignment recovered from the dump.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagRecord {
    /// Enclosing enum, normalized to `pkg::Type`.
    pub enum_name: String,
    /// Member name without its package prefix.
    pub member: String,
    /// `k` in `k of n`.
    pub position: u64,
    /// `n` in `k of n`.
    pub arity: u64,
    pub tag: u64,
    /// Width of the tag in bits.
    pub width: u32,
}

fn parse_field<T: FromStr>(caps: &Captures, index: usize, field: &'static str) -> Result<T> {
    let value = &caps[index];
    value.parse::<T>().map_err(|_| Error::MalformedTagRecord {
        record: caps[0].split_whitespace().join(" "),
        field,
        value: value.to_string(),
    })
}

fn parse_record(caps: &Captures) -> Result<TagRecord> {
    Ok(TagRecord {
        enum_name: normalize_qualified_name(&caps[1]),
        member: local_name(&caps[2]).to_string(),
        position: parse_field(caps, 3, "position")?,
        arity: parse_field(caps, 4, "arity")?,
        tag: parse_field(caps, 5, "tag")?,
        width: parse_field(caps, 6, "width")?,
    })
}

/// Returns every tag record in the dump, regardless of whether its parent
/// type is an enum.
pub fn scan_tag_records(text: &str) -> Result<Vec<TagRecord>> {
    records(text).map(|caps| parse_record(&caps))
        .collect()
}

/// Builds the enum catalog from the tag records whose parent type is in
/// `enum_types`. Records for other types (tagged unions share the same
/// shape) are dropped before their integer fields are examined.
///
/// Within one enum a repeated member name keeps its last tag. Each member
/// list is sorted by ascending tag.
pub fn extract_enum_catalog(text: &str, enum_types: &EnumTypeSet) -> Result<EnumCatalog> {
    let mut raw_enums: IndexMap<String, IndexMap<String, u64>> = IndexMap::new();
    let mut skipped = 0usize;

    for caps in records(text) {
        let enum_name = normalize_qualified_name(&caps[1]);
        if !enum_types.contains(&enum_name) {
            debug!("Skipping tag record for non-enum type {enum_name}");
            skipped += 1;
            continue;
        }
        let record = parse_record(&caps)?;
        raw_enums
            .entry(record.enum_name)
            .or_default()
            .insert(record.member, record.tag);
    }

    let mut catalog = EnumCatalog::new();
    for (enum_name, members) in raw_enums {
        let mut by_tag: IndexMap<u64, Vec<&str>> = IndexMap::new();
        for (name, tag) in &members {
            by_tag.entry(*tag).or_default().push(name);
        }
        for (tag, names) in by_tag.iter().filter(|(_, names)| names.len() > 1) {
            warn!("{enum_name}: members {} share tag {tag}", names.iter().join(", "));
        }
        catalog.insert(
            &enum_name,
            members
                .into_iter()
                .map(|(name, value)| EnumMember { name, value })
                .collect(),
        );
    }

    info!(
        "Extracted {} member(s) for {} enum type(s); skipped {skipped} non-enum tag record(s)",
        catalog.member_count(),
        catalog.len()
    );

    Ok(catalog)
}
