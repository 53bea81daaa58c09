use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{Claims, KnowledgeBase};
use crate::error::{ChronikError, Result};

const DEFAULT_API_URL: &str = "https://www.wikidata.org/w/api.php";

/// Configuration for Wikidata lookups
#[derive(Debug, Clone)]
pub struct WikidataConfig {
    /// MediaWiki API endpoint (from WIKIDATA_API_URL)
    pub api_url: String,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl WikidataConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("WIKIDATA_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        }
    }
}

/// Wikidata client
pub struct WikidataClient {
    client: Client,
    config: WikidataConfig,
}

impl WikidataClient {
    pub fn new(config: WikidataConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl KnowledgeBase for WikidataClient {
    async fn claims(&self, entity_id: &str) -> Result<Claims> {
        debug!("Fetching claims for {}", entity_id);

        let response = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("action", "wbgetclaims"),
                ("entity", entity_id),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ChronikError::LookupFailed {
                entity_id: entity_id.to_string(),
                reason: response.status().to_string(),
            });
        }

        let json: serde_json::Value = response.json().await?;
        if json.get("claims").is_none() {
            return Err(ChronikError::LookupFailed {
                entity_id: entity_id.to_string(),
                reason: "response has no claims".to_string(),
            });
        }

        Ok(Claims::new(json))
    }
}
