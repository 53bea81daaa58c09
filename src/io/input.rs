use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::models::{AdditionalRow, CuratedAlias, CuratedTables, IgnoreEntry, Transcript};

static TRANSCRIPT_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^transcript-(\d+)\.txt$").unwrap());

/// Read one transcript file
pub fn read_transcript(path: &Path, id: u32) -> Result<Transcript> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript: {:?}", path))?;
    Ok(Transcript::new(id, text))
}

/// Read every `transcript-<id>.txt` in a directory, ordered by id
pub fn discover_transcripts(dir: &Path) -> Result<Vec<Transcript>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to list directory: {:?}", dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(caps) = TRANSCRIPT_FILE_RE.captures(file_name) {
            let id: u32 = caps[1]
                .parse()
                .with_context(|| format!("Transcript id out of range: {}", file_name))?;
            files.push((id, path));
        }
    }
    files.sort_by_key(|(id, _)| *id);

    files
        .iter()
        .map(|(id, path)| read_transcript(path, *id))
        .collect()
}

/// Parse CSV content with a header row into records
pub fn parse_csv<T: DeserializeOwned>(content: &str) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .context("Failed to parse CSV")
}

/// Read a CSV file with a header row into records
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_csv(&content).with_context(|| format!("Invalid table: {:?}", path))
}

/// Load the curated `additional` and `ignore` tables
pub fn load_curated_tables(additional: &Path, ignore: &Path) -> Result<CuratedTables> {
    let aliases: Vec<CuratedAlias> = read_csv::<AdditionalRow>(additional)?
        .into_iter()
        .map(CuratedAlias::from)
        .collect();
    let ignore: Vec<IgnoreEntry> = read_csv(ignore)?;
    Ok(CuratedTables::new(&aliases, &ignore))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorityRecord, SegmentRow};

    #[test]
    fn test_parse_authority_table() {
        let csv = "name,variations,type,wikidata,sapa,image\n\
                   Max Frisch,Frisch; M. Frisch,PER,http://www.wikidata.org/entity/Q44403,,frisch.jpg\n\
                   Zürich,,LOC,,,\n";

        let records: Vec<AuthorityRecord> = parse_csv(csv).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].entity, "Max Frisch");
        assert_eq!(records[0].variation_list(), vec!["Frisch", "M. Frisch"]);
        assert_eq!(records[0].sapa, None);
        assert_eq!(records[1].entity_type.as_deref(), Some("LOC"));
        assert_eq!(records[1].variations, None);
    }

    #[test]
    fn test_parse_segment_rows() {
        let csv = "video,start,text,entities\n1,0,,\n1,83,\"Ja, in Bern.\",Bern\n";

        let rows: Vec<SegmentRow> = parse_csv(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text, "");
        assert_eq!(rows[1].start, 83);
        assert_eq!(rows[1].text, "Ja, in Bern.");
    }

    #[test]
    fn test_discover_transcripts_orders_by_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("transcript-10.txt"), "zehn").unwrap();
        std::fs::write(dir.path().join("transcript-2.txt"), "zwei").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "nein").unwrap();

        let transcripts = discover_transcripts(dir.path()).unwrap();

        let ids: Vec<u32> = transcripts.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 10]);
        assert_eq!(transcripts[0].text, "zwei");
    }

    #[test]
    fn test_load_curated_tables() {
        let dir = tempfile::tempdir().unwrap();
        let additional = dir.path().join("additional.csv");
        let ignore = dir.path().join("ignore.csv");
        std::fs::write(&additional, "name,variations,type\nMax Frisch,Frisch,PER\n").unwrap();
        std::fs::write(&ignore, "name\nHerr\n").unwrap();

        let tables = load_curated_tables(&additional, &ignore).unwrap();

        assert_eq!(tables.alias("frisch").unwrap().canonical_name, "Max Frisch");
        assert!(tables.is_ignored("herr"));
    }
}
