use std::collections::BTreeSet;

use crate::error::Result;
use crate::models::{Segment, Transcript};
use crate::text::{normalize_text, split_transcript, NormalizerConfig};

/// Perform Stage 0: split a transcript at its timecodes and normalize each span.
///
/// Fails without producing any segment if a timecode cannot be parsed.
pub fn segment_transcript(transcript: &Transcript, config: &NormalizerConfig) -> Result<Vec<Segment>> {
    let split = split_transcript(&transcript.text)?;

    Ok(split
        .iter()
        .map(|(start, text)| Segment {
            video_id: transcript.id,
            start_offset_seconds: start,
            text: normalize_text(text, config),
            entity_names: BTreeSet::new(),
        })
        .collect())
}
