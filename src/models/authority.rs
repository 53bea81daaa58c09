use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Curated mapping of alias strings to one canonical name and fixed type
#[derive(Debug, Clone, PartialEq)]
pub struct CuratedAlias {
    pub canonical_name: String,
    pub variation_names: Vec<String>,
    pub entity_type: String,
}

/// Row of the curated `additional` table
#[derive(Debug, Clone, Deserialize)]
pub struct AdditionalRow {
    pub name: String,
    #[serde(default)]
    pub variations: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: String,
}

impl From<AdditionalRow> for CuratedAlias {
    fn from(row: AdditionalRow) -> Self {
        Self {
            canonical_name: row.name,
            variation_names: row.variations.as_deref().map(split_list).unwrap_or_default(),
            entity_type: row.entity_type,
        }
    }
}

/// Row of the curated `ignore` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IgnoreEntry {
    pub name: String,
}

/// Canonical name and authoritative type an alias resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
    pub canonical_name: String,
    pub entity_type: String,
}

/// Case-insensitive lookup over the `additional` and `ignore` tables
#[derive(Debug, Clone, Default)]
pub struct CuratedTables {
    aliases: HashMap<String, AliasTarget>,
    ignore: HashSet<String>,
}

impl CuratedTables {
    pub fn new(aliases: &[CuratedAlias], ignore: &[IgnoreEntry]) -> Self {
        let mut lookup = HashMap::new();
        for alias in aliases {
            let target = AliasTarget {
                canonical_name: alias.canonical_name.clone(),
                entity_type: alias.entity_type.clone(),
            };
            // Later rows replace earlier ones for the same key
            lookup.insert(alias.canonical_name.to_lowercase(), target.clone());
            for variation in &alias.variation_names {
                lookup.insert(variation.to_lowercase(), target.clone());
            }
        }

        Self {
            aliases: lookup,
            ignore: ignore.iter().map(|e| e.name.to_lowercase()).collect(),
        }
    }

    /// Alias target for a name, compared case-insensitively
    pub fn alias(&self, name: &str) -> Option<&AliasTarget> {
        self.aliases.get(&name.to_lowercase())
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.contains(&name.to_lowercase())
    }

    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    pub fn ignore_count(&self) -> usize {
        self.ignore.len()
    }
}

/// One row of the long-lived master authority table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorityRecord {
    #[serde(alias = "name")]
    pub entity: String,
    #[serde(default)]
    pub variations: Option<String>,
    #[serde(default)]
    pub wikidata: Option<String>,
    /// Performing-arts archive URI
    #[serde(default)]
    pub sapa: Option<String>,
    #[serde(rename = "type", default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl AuthorityRecord {
    pub fn variation_list(&self) -> Vec<String> {
        self.variations.as_deref().map(split_list).unwrap_or_default()
    }
}

/// Split a semicolon-separated cell, trimming entries and dropping empty ones
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}
