use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{EntityAccumulator, Segment, SegmentRow};

/// Serialize records as CSV with a header row
pub fn write_csv_to<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to a CSV file
pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    write_csv_to(file, rows)
}

/// Entity table: one row per name, ascending, with `;`-joined sorted types
pub fn write_entities_csv(path: &Path, entities: &EntityAccumulator) -> Result<()> {
    write_csv(path, &entities.rows())
}

/// Segment table in transcript/offset order
pub fn write_segments_csv(path: &Path, segments: &[Segment]) -> Result<()> {
    let rows: Vec<SegmentRow> = segments.iter().map(SegmentRow::from).collect();
    write_csv(path, &rows)
}

/// Write to a JSON file
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}
