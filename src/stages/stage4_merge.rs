use tracing::{info, warn};

use crate::knowledge::{check_identifier, IdentifierKind, SuspectIdentifier};
use crate::models::{AuthorityRecord, EntityRow};

/// Which table wins when both hold a row for the same entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePrecedence {
    /// Curated metadata survives over freshly extracted rows
    #[default]
    CuratedFirst,
    ExtractedFirst,
}

/// Configuration for the authority merge
#[derive(Debug, Clone, Default)]
pub struct MergeConfig {
    pub precedence: MergePrecedence,
}

/// Counts reported by the authority merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Rows of both tables before deduplication
    pub total_rows: usize,
    /// Rows dropped because an earlier row had the same entity name
    pub duplicates_removed: usize,
    /// Identifiers failing their structural check (not removed)
    pub suspect_identifiers: Vec<SuspectIdentifier>,
}

/// Result of the authority merge
#[derive(Debug, Clone)]
pub struct MergeResult {
    /// Merged table sorted by entity name
    pub records: Vec<AuthorityRecord>,
    pub report: MergeReport,
}

/// Execute Stage 4: merge freshly extracted entities into the master authority table.
///
/// Both tables are concatenated in precedence order, stably sorted by entity name
/// (case-sensitive) and reduced to the first row per name.
pub fn execute_merge(
    extracted: &[EntityRow],
    curated: &[AuthorityRecord],
    config: &MergeConfig,
) -> MergeResult {
    let extracted = extracted.iter().map(|row| AuthorityRecord {
        entity: row.entity.clone(),
        entity_type: Some(row.types.clone()).filter(|t| !t.is_empty()),
        ..Default::default()
    });

    let mut records: Vec<AuthorityRecord> = match config.precedence {
        MergePrecedence::CuratedFirst => curated.iter().cloned().chain(extracted).collect(),
        MergePrecedence::ExtractedFirst => extracted.chain(curated.iter().cloned()).collect(),
    };
    let total_rows = records.len();

    records.sort_by(|a, b| a.entity.cmp(&b.entity));
    records.dedup_by(|later, earlier| later.entity == earlier.entity);
    let duplicates_removed = total_rows - records.len();

    let mut suspect_identifiers = Vec::new();
    for record in &records {
        for (kind, value) in [
            (IdentifierKind::Wikidata, record.wikidata.as_deref()),
            (IdentifierKind::Sapa, record.sapa.as_deref()),
        ] {
            if let Some(suspect) = check_identifier(&record.entity, kind, value) {
                warn!("Suspect {} identifier for {}: {}", kind, record.entity, suspect.value);
                suspect_identifiers.push(suspect);
            }
        }
    }

    info!(
        "Merged {} rows into {} ({} duplicates removed)",
        total_rows,
        records.len(),
        duplicates_removed
    );

    MergeResult {
        records,
        report: MergeReport {
            total_rows,
            duplicates_removed,
            suspect_identifiers,
        },
    }
}
