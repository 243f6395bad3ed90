//! CSV output and dataset validation.

use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use crate::record::{ProspectRecord, COLUMNS};

/// Columns a downstream model run reads. Checked against produced files by
/// `require_columns` before any training data leaves this pipeline.
#[rustfmt::skip]
pub const MODEL_FEATURE_COLUMNS: &[&str] = &[
    "Pick Number", "Age", "Height", "Weight", "Seasons Played (College)",
    "G", "GS%", "MPG", "PTS", "TRB", "AST", "STL", "BLK", "TOV",
    "FG%", "3P%", "FT%",
    "PER", "TS%", "3PAr", "FTr", "USG%", "WS/40", "OBPM", "DBPM", "BPM",
    "PTS/40", "TRB/40", "AST/40",
    "ORtg", "DRtg",
    "NBA Win%", "NBA SRS", "CT_Win%", "CT_SRS", "CT_SOS",
    "Height/Weight", "BMI", "AST/TOV", "PTS/USG", "3PA/FGA", "3PAr_TS",
    "ShotTouchBlend", "Team Dev Score", "College Strength",
];

/// Incremental CSV writer for assembled records. Writes the fixed header on
/// creation and flushes after every record, so a batch interrupted mid-year
/// still leaves every completed row on disk.
pub struct DatasetWriter {
    writer: csv::Writer<File>,
    rows: u64,
}

impl DatasetWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating dataset file {}", path.display()))?;
        writer.write_record(COLUMNS)?;
        writer.flush()?;
        info!("writing dataset to {}", path.display());
        Ok(Self { writer, rows: 0 })
    }

    pub fn append(&mut self, record: &ProspectRecord) -> Result<()> {
        self.writer
            .write_record(record.values())
            .with_context(|| format!("writing record for {}", record.name))?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows
    }
}

/// Verify that a produced CSV carries every column in `required`. Fails with
/// the full list of missing names rather than the first one.
pub fn require_columns(path: &Path, required: &[&str]) -> Result<()> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening dataset file {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let present: Vec<&str> = headers.iter().collect();

    let missing: Vec<&str> = required
        .iter()
        .filter(|col| !present.contains(*col))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!(
            "{} is missing {} required column(s): {}",
            path.display(),
            missing.len(),
            missing.join(", ")
        );
    }
    Ok(())
}
