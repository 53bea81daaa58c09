use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Raw text of one recording session
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Integer id, also used as the video id of every segment
    pub id: u32,
    /// Unmodified file content including timecode markers
    pub text: String,
}

impl Transcript {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// Output of the segmenter: index-aligned offsets and text spans
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitTranscript {
    /// Start offsets in seconds, the first is always 0
    pub starts: Vec<u64>,
    /// Text spans between timecodes, not yet normalized
    pub segments: Vec<String>,
}

impl SplitTranscript {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u64, &str)> {
        self.starts
            .iter()
            .copied()
            .zip(self.segments.iter().map(String::as_str))
    }
}

/// A timecoded span of one transcript with the entities recognized in it
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub video_id: u32,
    pub start_offset_seconds: u64,
    /// Normalized text
    pub text: String,
    /// Entity names as recognized (not yet resolved to canonical names)
    pub entity_names: BTreeSet<String>,
}

/// One row of the segment export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRow {
    pub video: u32,
    pub start: u64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub entities: String,
}

impl From<&Segment> for SegmentRow {
    fn from(segment: &Segment) -> Self {
        Self {
            video: segment.video_id,
            start: segment.start_offset_seconds,
            text: segment.text.clone(),
            entities: segment
                .entity_names
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(";"),
        }
    }
}
