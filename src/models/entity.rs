use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A span returned by the annotation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntityMention {
    /// Surface text of the span
    pub text: String,
    /// Category assigned by the model (PER, ORG, LOC, MISC, ...)
    pub label: String,
    /// Character offset of the span start
    #[serde(default)]
    pub start: usize,
    /// Character offset of the span end
    #[serde(default)]
    pub end: usize,
}

impl RawEntityMention {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start: 0,
            end: 0,
        }
    }
}

/// An `(entity_text, type)` pair ready for reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypedMention {
    pub text: String,
    pub entity_type: String,
}

impl TypedMention {
    pub fn new(text: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity_type: entity_type.into(),
        }
    }
}

/// Corpus-wide map of entity name to every type observed for it.
///
/// Ordered maps keep the export stable across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityAccumulator {
    records: BTreeMap<String, BTreeSet<String>>,
}

impl EntityAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type set for a name, creating an empty one if the name is new
    pub fn entry(&mut self, name: &str) -> &mut BTreeSet<String> {
        self.records.entry(name.to_string()).or_default()
    }

    pub fn types(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending (case-sensitive) name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn rows(&self) -> Vec<EntityRow> {
        self.iter()
            .map(|(name, types)| EntityRow {
                entity: name.to_string(),
                types: types.iter().map(String::as_str).collect::<Vec<_>>().join(";"),
            })
            .collect()
    }
}

/// One row of the entity export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRow {
    pub entity: String,
    #[serde(rename = "type", default)]
    pub types: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_sorted_case_sensitive() {
        let mut acc = EntityAccumulator::new();
        acc.entry("bern").insert("LOC".to_string());
        acc.entry("Zürich").insert("LOC".to_string());
        acc.entry("Basel").insert("ORG".to_string());
        acc.entry("Basel").insert("LOC".to_string());

        let rows = acc.rows();
        let names: Vec<_> = rows.iter().map(|r| r.entity.as_str()).collect();

        assert_eq!(names, vec!["Basel", "Zürich", "bern"]);
        assert_eq!(rows[0].types, "LOC;ORG");
    }

    #[test]
    fn test_entry_creates_empty_set() {
        let mut acc = EntityAccumulator::new();
        assert!(acc.entry("Theater Basel").is_empty());
        assert!(acc.contains("Theater Basel"));
        assert_eq!(acc.len(), 1);
    }
}
