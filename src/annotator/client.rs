use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Annotator;
use crate::error::{ChronikError, Result};
use crate::models::RawEntityMention;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/ner";
const DEFAULT_MODEL: &str = "de_core_news_lg";

/// Configuration for the HTTP annotation service
#[derive(Debug, Clone)]
pub struct AnnotatorConfig {
    /// Endpoint accepting `{model, text}` (from ANNOTATOR_URL)
    pub endpoint: String,
    /// Model name passed to the service (from ANNOTATOR_MODEL)
    pub model: String,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AnnotatorConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: std::env::var("ANNOTATOR_URL").unwrap_or(defaults.endpoint),
            model: std::env::var("ANNOTATOR_MODEL").unwrap_or(defaults.model),
        }
    }
}

/// Client for a spaCy-style NER service
pub struct HttpAnnotator {
    client: Client,
    config: AnnotatorConfig,
}

impl HttpAnnotator {
    pub fn new(config: AnnotatorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    async fn annotate(&self, text: &str) -> Result<Vec<RawEntityMention>> {
        let request = AnnotateRequest {
            model: &self.config.model,
            text,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChronikError::AnnotatorFailed {
                reason: format!("{} - {}", status, body),
            });
        }

        let response: AnnotateResponse = response.json().await?;
        debug!("Annotator returned {} spans", response.ents.len());

        Ok(response.ents)
    }
}

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    model: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    ents: Vec<RawEntityMention>,
}
