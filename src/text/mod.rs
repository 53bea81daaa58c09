pub mod normalize;
pub mod timecode;
pub mod tokenize;

pub use normalize::*;
pub use timecode::*;
pub use tokenize::*;

/// Placeholder left in the text where the transcriber could not verify a passage
pub const UNVERIFIED_MARKER: &str = "(?)";

/// Ellipsis character used after normalization
pub const ELLIPSIS: char = '…';
