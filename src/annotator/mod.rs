pub mod client;
pub mod filter;

pub use client::*;
pub use filter::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RawEntityMention;

/// Named-entity recognition service: text in, labelled spans out (in text order)
#[async_trait]
pub trait Annotator: Send + Sync {
    async fn annotate(&self, text: &str) -> Result<Vec<RawEntityMention>>;
}
