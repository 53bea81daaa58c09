use std::collections::BTreeSet;

use crate::models::{CuratedTables, EntityAccumulator, TypedMention};

/// Result of reconciling one segment's mentions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileResult {
    /// Names to record on the segment
    pub entity_names: BTreeSet<String>,
    /// Mentions whose type was forced by a curated alias
    pub curated_overrides: usize,
    /// Mentions dropped because the name is on the ignore list
    pub suppressed: usize,
}

/// Execute Stage 2: merge one segment's mentions into the corpus-wide accumulator.
///
/// For each mention in order:
/// 1. Ignored names are dropped
/// 2. The name gets a record if it has none
/// 3. A curated alias replaces the type set with the curated type
/// 4. Otherwise the observed type is added to the set
///
/// Names are recorded as recognized; resolving them to canonical authority
/// entries happens at render time.
pub fn reconcile_mentions(
    accumulator: &mut EntityAccumulator,
    mentions: &[TypedMention],
    tables: &CuratedTables,
) -> ReconcileResult {
    let mut result = ReconcileResult::default();

    for mention in mentions {
        if tables.is_ignored(&mention.text) {
            result.suppressed += 1;
            continue;
        }

        let types = accumulator.entry(&mention.text);
        match tables.alias(&mention.text) {
            Some(alias) => {
                types.clear();
                types.insert(alias.entity_type.clone());
                result.curated_overrides += 1;
            }
            None => {
                types.insert(mention.entity_type.clone());
            }
        }

        result.entity_names.insert(mention.text.clone());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CuratedAlias, IgnoreEntry};

    fn tables() -> CuratedTables {
        CuratedTables::new(
            &[CuratedAlias {
                canonical_name: "Bar".to_string(),
                variation_names: vec!["Foo".to_string()],
                entity_type: "person".to_string(),
            }],
            &[IgnoreEntry {
                name: "Gott".to_string(),
            }],
        )
    }

    #[test]
    fn test_curated_type_wins_over_model() {
        let tables = tables();
        let mut acc = EntityAccumulator::new();

        reconcile_mentions(&mut acc, &[TypedMention::new("Foo", "organization")], &tables);
        reconcile_mentions(&mut acc, &[TypedMention::new("Bar", "person")], &tables);
        reconcile_mentions(&mut acc, &[TypedMention::new("Bar", "organization")], &tables);

        let person: BTreeSet<String> = ["person".to_string()].into();
        assert_eq!(acc.types("Bar"), Some(&person));
        assert_eq!(acc.types("Foo"), Some(&person));
    }

    #[test]
    fn test_curated_type_replaces_earlier_observation() {
        let tables = tables();
        let mut acc = EntityAccumulator::new();
        acc.entry("FOO").insert("LOC".to_string());

        let result =
            reconcile_mentions(&mut acc, &[TypedMention::new("FOO", "ORG")], &tables);

        assert_eq!(result.curated_overrides, 1);
        assert_eq!(acc.types("FOO").unwrap().len(), 1);
        assert!(acc.types("FOO").unwrap().contains("person"));
    }

    #[test]
    fn test_uncurated_types_accumulate() {
        let tables = tables();
        let mut acc = EntityAccumulator::new();

        reconcile_mentions(&mut acc, &[TypedMention::new("Basel", "LOC")], &tables);
        reconcile_mentions(&mut acc, &[TypedMention::new("Basel", "ORG")], &tables);

        let types: Vec<_> = acc.types("Basel").unwrap().iter().cloned().collect();
        assert_eq!(types, vec!["LOC", "ORG"]);
    }

    #[test]
    fn test_ignored_names_never_recorded() {
        let tables = tables();
        let mut acc = EntityAccumulator::new();

        let result = reconcile_mentions(
            &mut acc,
            &[
                TypedMention::new("Gott", "PER"),
                TypedMention::new("GOTT", "MISC"),
                TypedMention::new("Bern", "LOC"),
            ],
            &tables,
        );

        assert_eq!(result.suppressed, 2);
        assert_eq!(result.entity_names, BTreeSet::from(["Bern".to_string()]));
        assert!(!acc.contains("Gott"));
        assert!(!acc.contains("GOTT"));
    }

    #[test]
    fn test_duplicate_mentions_collapse() {
        let tables = tables();
        let mut acc = EntityAccumulator::new();

        let result = reconcile_mentions(
            &mut acc,
            &[
                TypedMention::new("Bern", "LOC"),
                TypedMention::new("Bern", "LOC"),
            ],
            &tables,
        );

        assert_eq!(result.entity_names.len(), 1);
        assert_eq!(acc.len(), 1);
    }
}
