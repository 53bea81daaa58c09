use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{info, warn};

use crate::knowledge::{
    check_identifier, enrich, Enrichment, IdentifierKind, KnowledgeBase, SuspectIdentifier,
};
use crate::models::{split_list, AuthorityRecord, SegmentRow};

/// Resolves entity names and variations to canonical authority names
#[derive(Debug, Default)]
pub struct AuthorityIndex {
    names: HashMap<String, String>,
    duplicate_entities: BTreeSet<String>,
    duplicate_variations: BTreeSet<String>,
}

impl AuthorityIndex {
    /// Build the index; the first mapping of a name or variation wins
    pub fn build(records: &[AuthorityRecord]) -> Self {
        let mut index = Self::default();

        for record in records {
            let name = record.entity.trim();
            if index.names.contains_key(name) {
                index.duplicate_entities.insert(name.to_string());
            } else {
                index.names.insert(name.to_string(), name.to_string());
            }

            for variation in record.variation_list() {
                if index.names.contains_key(&variation) {
                    index.duplicate_variations.insert(variation);
                } else {
                    index.names.insert(variation, name.to_string());
                }
            }
        }

        index
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }
}

/// Entity object of the JSON export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityObject {
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikidata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theaterlexikon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sapa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dod: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl EntityObject {
    fn new(record: &AuthorityRecord, enrichment: Enrichment) -> Self {
        Self {
            name: record.entity.trim().to_string(),
            entity_type: record.entity_type.clone(),
            variations: record.variation_list(),
            wikidata: trimmed(record.wikidata.as_deref()),
            theaterlexikon: enrichment.theaterlexikon,
            sapa: trimmed(record.sapa.as_deref()),
            dob: enrichment.dob,
            dod: enrichment.dod,
            image: trimmed(record.image.as_deref()),
        }
    }
}

/// Segment object of the JSON export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentObject {
    pub video: u32,
    pub start: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Canonical names in first-occurrence order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<String>,
}

/// Data-quality findings; none of them stop the export
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    pub missing_entities: Vec<String>,
    pub duplicate_entities: Vec<String>,
    pub duplicate_variations: Vec<String>,
    pub suspect_identifiers: Vec<SuspectIdentifier>,
}

/// Consolidated JSON export
#[derive(Debug, Clone, Serialize)]
pub struct CorpusExport {
    pub segments: Vec<SegmentObject>,
    pub entities: Vec<EntityObject>,
    pub diagnostics: Diagnostics,
}

/// Execute Stage 3: join exported segments to the authority table.
///
/// With a knowledge base, every entry with a Wikidata URI is enriched with
/// birth/death dates and a theater-lexicon link. Lookup failures only leave
/// those fields empty.
pub async fn execute_render(
    authority: &[AuthorityRecord],
    segments: &[SegmentRow],
    knowledge_base: Option<&dyn KnowledgeBase>,
) -> CorpusExport {
    let index = AuthorityIndex::build(authority);
    let mut suspect_identifiers = Vec::new();
    let mut entities = Vec::with_capacity(authority.len());

    for record in authority {
        let name = record.entity.trim();
        for (kind, value) in [
            (IdentifierKind::Sapa, record.sapa.as_deref()),
            (IdentifierKind::Wikidata, record.wikidata.as_deref()),
        ] {
            if let Some(suspect) = check_identifier(name, kind, value) {
                warn!("Invalid {} identifier for {}: {}", kind, name, suspect.value);
                suspect_identifiers.push(suspect);
            }
        }

        let enrichment = match (knowledge_base, record.wikidata.as_deref()) {
            (Some(kb), Some(uri)) if !uri.trim().is_empty() => enrich(kb, uri).await,
            _ => Enrichment::default(),
        };
        entities.push(EntityObject::new(record, enrichment));
    }

    let mut missing = BTreeSet::new();
    let segments: Vec<SegmentObject> = segments
        .iter()
        .map(|row| {
            let mut resolved: Vec<String> = Vec::new();
            for name in split_list(&row.entities) {
                match index.resolve(&name) {
                    Some(canonical) => {
                        if !resolved.iter().any(|r| r == canonical) {
                            resolved.push(canonical.to_string());
                        }
                    }
                    None => {
                        missing.insert(name);
                    }
                }
            }
            SegmentObject {
                video: row.video,
                start: row.start,
                text: Some(row.text.clone()).filter(|t| !t.is_empty()),
                entities: resolved,
            }
        })
        .collect();

    let diagnostics = Diagnostics {
        missing_entities: sorted_case_insensitive(missing),
        duplicate_entities: sorted_case_insensitive(index.duplicate_entities),
        duplicate_variations: sorted_case_insensitive(index.duplicate_variations),
        suspect_identifiers,
    };

    info!(
        "Rendered {} segments, {} entities ({} missing, {} duplicate entities, {} duplicate variations)",
        segments.len(),
        entities.len(),
        diagnostics.missing_entities.len(),
        diagnostics.duplicate_entities.len(),
        diagnostics.duplicate_variations.len()
    );

    CorpusExport {
        segments,
        entities,
        diagnostics,
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

fn sorted_case_insensitive(names: BTreeSet<String>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    names
}
