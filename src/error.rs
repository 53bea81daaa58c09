use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChronikError {
    #[error("Malformed timecode {marker}: component {component:?} is not a number")]
    InvalidTimecode { marker: String, component: String },

    #[error("Timecode {marker} ({seconds}s) goes back before the previous offset {previous}s")]
    TimecodeOutOfOrder {
        marker: String,
        seconds: u64,
        previous: u64,
    },

    #[error("Annotation service failed: {reason}")]
    AnnotatorFailed { reason: String },

    #[error("Knowledge base lookup failed for {entity_id}: {reason}")]
    LookupFailed { entity_id: String, reason: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ChronikError>;
