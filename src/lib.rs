pub mod annotator;
pub mod config;
pub mod error;
pub mod io;
pub mod knowledge;
pub mod models;
pub mod pipeline;
pub mod stages;
pub mod text;

pub use annotator::{Annotator, AnnotatorConfig, HttpAnnotator};
pub use config::ChronikConfig;
pub use error::{ChronikError, Result};
pub use io::{
    discover_transcripts, load_curated_tables, read_csv, write_csv, write_entities_csv,
    write_json, write_segments_csv,
};
pub use knowledge::{KnowledgeBase, WikidataClient, WikidataConfig};
pub use models::{
    AuthorityRecord, CuratedAlias, CuratedTables, EntityAccumulator, EntityRow, IgnoreEntry,
    RawEntityMention, Segment, SegmentRow, Transcript, TypedMention,
};
pub use pipeline::{run_extraction, Corpus};
pub use stages::{
    annotate_segment, execute_merge, execute_render, reconcile_mentions, segment_transcript,
    MergeConfig, MergePrecedence,
};
pub use text::{normalize_text, split_transcript, NormalizerConfig};
