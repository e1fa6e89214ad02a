// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One member of an enum: its local name and its integer tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: u64,
}

impl EnumMember {
    pub fn new(name: impl AsRef<str>, value: u64) -> Self {
        EnumMember {
            name: name.as_ref().to_string(),
            value,
        }
    }
}

/// Canonical enum definitions recovered from a debug dump, keyed by
/// normalized qualified name (`pkg::Type`). Every member list is sorted by
/// ascending tag value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnumCatalog {
    enums: IndexMap<String, Vec<EnumMember>>,
}

impl EnumCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an enum. The members are sorted by tag; members that
    /// share a tag keep their relative order.
    pub fn insert(&mut self, name: impl AsRef<str>, mut members: Vec<EnumMember>) {
        members.sort_by_key(|m| m.value);
        self.enums.insert(name.as_ref().to_string(), members);
    }

    pub fn get(&self, name: &str) -> Option<&[EnumMember]> {
        self.enums.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }

    /// Total number of members across all enums.
    pub fn member_count(&self) -> usize {
        self.enums.values().map(Vec::len).sum()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.enums.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[EnumMember])> {
        self.enums.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns the member list of `name` as it appears in a module's
    /// `typedefs` table: `[{"name": ..., "value": ...}, ...]`.
    pub fn typedef_value(&self, name: &str) -> Option<Value> {
        self.enums.get(name).map(|members| members_to_value(members))
    }
}

pub(crate) fn members_to_value(members: &[EnumMember]) -> Value {
    json!(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sorts_by_tag() {
        let mut catalog = EnumCatalog::new();
        catalog.insert(
            "m::Color_e",
            vec![
                EnumMember::new("Red", 0),
                EnumMember::new("Green", 2),
                EnumMember::new("Blue", 1),
            ],
        );
        let names: Vec<_> = catalog
            .get("m::Color_e")
            .unwrap()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Red", "Blue", "Green"]);
        assert_eq!(catalog.member_count(), 3);
    }

    #[test]
    fn test_typedef_value() {
        let mut catalog = EnumCatalog::new();
        catalog.insert("m::Bool_e", vec![EnumMember::new("F", 0), EnumMember::new("T", 1)]);
        assert_eq!(
            catalog.typedef_value("m::Bool_e").unwrap(),
            json!([{"name": "F", "value": 0}, {"name": "T", "value": 1}])
        );
        assert_eq!(catalog.typedef_value("m::Missing_e"), None);
    }

    #[test]
    fn test_member_serde_shape() {
        let member: EnumMember = serde_json::from_value(json!({"name": "Idle", "value": 3})).unwrap();
        assert_eq!(member, EnumMember::new("Idle", 3));
        assert_eq!(
            serde_json::to_value(&member).unwrap(),
            json!({"name": "Idle", "value": 3})
        );
    }
}
