use std::path::PathBuf;

use crate::annotator::AnnotatorConfig;
use crate::knowledge::WikidataConfig;
use crate::text::NormalizerConfig;

/// Locations and service settings for one run
#[derive(Debug, Clone)]
pub struct ChronikConfig {
    /// Transcripts and export files (CHRONIK_DATA_DIR, default `data`)
    pub data_dir: PathBuf,
    /// Curated tables (CHRONIK_AUTHORITY_DIR, default `<data_dir>/authority`)
    pub authority_dir: PathBuf,
    pub annotator: AnnotatorConfig,
    pub wikidata: WikidataConfig,
    pub normalizer: NormalizerConfig,
}

impl ChronikConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let data_dir = PathBuf::from(
            std::env::var("CHRONIK_DATA_DIR").unwrap_or_else(|_| "data".to_string()),
        );
        let authority_dir = std::env::var("CHRONIK_AUTHORITY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("authority"));

        Self {
            data_dir,
            authority_dir,
            annotator: AnnotatorConfig::from_env(),
            wikidata: WikidataConfig::from_env(),
            normalizer: NormalizerConfig::default(),
        }
    }

    /// Config rooted at a data directory, with default services
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            authority_dir: data_dir.join("authority"),
            data_dir,
            annotator: AnnotatorConfig::default(),
            wikidata: WikidataConfig::default(),
            normalizer: NormalizerConfig::default(),
        }
    }

    pub fn additional_table(&self) -> PathBuf {
        self.authority_dir.join("additional.csv")
    }

    pub fn ignore_table(&self) -> PathBuf {
        self.authority_dir.join("ignore.csv")
    }

    pub fn authority_table(&self) -> PathBuf {
        self.authority_dir.join("entities.csv")
    }

    pub fn entities_export(&self) -> PathBuf {
        self.data_dir.join("entities.csv")
    }

    pub fn segments_export(&self) -> PathBuf {
        self.data_dir.join("segments.csv")
    }

    pub fn corpus_export(&self) -> PathBuf {
        self.data_dir.join("corpus.json")
    }

    pub fn merged_authority(&self) -> PathBuf {
        self.data_dir.join("authority-merged.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_data_dir() {
        let config = ChronikConfig::with_data_dir("/tmp/interviews");

        assert_eq!(
            config.additional_table(),
            PathBuf::from("/tmp/interviews/authority/additional.csv")
        );
        assert_eq!(config.segments_export(), PathBuf::from("/tmp/interviews/segments.csv"));
    }
}
