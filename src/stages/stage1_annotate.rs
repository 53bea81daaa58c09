use tracing::debug;

use crate::annotator::{filter_mentions, strip_speaker_labels, supplement_from_aliases, Annotator};
use crate::error::Result;
use crate::models::{CuratedTables, TypedMention};

/// Execute Stage 1: entity annotation for one normalized segment.
///
/// 1. Strip speaker labels
/// 2. Call the annotation service
/// 3. Drop multi-line, elided and ignored spans
/// 4. Add a mention for every token that is a curated alias
///
/// Duplicates are kept; they collapse during reconciliation.
pub async fn annotate_segment<A: Annotator + ?Sized>(
    annotator: &A,
    text: &str,
    tables: &CuratedTables,
) -> Result<Vec<TypedMention>> {
    let text = strip_speaker_labels(text);
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let raw = annotator.annotate(&text).await?;
    let mut mentions = filter_mentions(&raw, tables);
    let recognized = mentions.len();
    mentions.extend(supplement_from_aliases(&text, tables));

    debug!(
        "Annotated segment: {} spans, {} kept, {} from aliases",
        raw.len(),
        recognized,
        mentions.len() - recognized
    );

    Ok(mentions)
}
