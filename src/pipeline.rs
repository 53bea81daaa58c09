use anyhow::{Context, Result};
use tracing::info;

use crate::annotator::Annotator;
use crate::models::{CuratedTables, EntityAccumulator, Segment, Transcript};
use crate::stages::{annotate_segment, reconcile_mentions, segment_transcript};
use crate::text::NormalizerConfig;

/// Everything the extraction pass produces
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// All segments in transcript and offset order
    pub segments: Vec<Segment>,
    /// Entity names and their observed types across all transcripts
    pub entities: EntityAccumulator,
}

/// Run Stages 0-2 over the transcripts, strictly in order.
///
/// Segment offsets are cumulative and the entity accumulator is shared across the
/// whole corpus, so transcripts and segments are never processed concurrently.
pub async fn run_extraction<A: Annotator + ?Sized>(
    annotator: &A,
    transcripts: &[Transcript],
    tables: &CuratedTables,
    normalizer: &NormalizerConfig,
) -> Result<Corpus> {
    let mut corpus = Corpus::default();

    for transcript in transcripts {
        let mut segments = segment_transcript(transcript, normalizer)
            .with_context(|| format!("Failed to segment transcript {}", transcript.id))?;

        let mut overrides = 0;
        let mut suppressed = 0;
        for segment in &mut segments {
            let mentions = annotate_segment(annotator, &segment.text, tables)
                .await
                .with_context(|| {
                    format!(
                        "Failed to annotate transcript {} at {}s",
                        transcript.id, segment.start_offset_seconds
                    )
                })?;

            let result = reconcile_mentions(&mut corpus.entities, &mentions, tables);
            overrides += result.curated_overrides;
            suppressed += result.suppressed;
            segment.entity_names = result.entity_names;
        }

        info!(
            "Transcript {}: {} segments, {} curated overrides, {} suppressed",
            transcript.id,
            segments.len(),
            overrides,
            suppressed
        );
        corpus.segments.extend(segments);
    }

    info!(
        "Extracted {} segments, {} distinct entities",
        corpus.segments.len(),
        corpus.entities.len()
    );

    Ok(corpus)
}
