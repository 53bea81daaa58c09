pub mod claims;
pub mod identifiers;
pub mod wikidata;

pub use claims::*;
pub use identifiers::*;
pub use wikidata::*;

use async_trait::async_trait;

use crate::error::Result;

/// Knowledge base keyed by entity id, returning claim values by property code
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn claims(&self, entity_id: &str) -> Result<Claims>;
}
