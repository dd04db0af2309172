//! Flat CSV persistence for the rate history.

use crate::core::RateRecord;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// A `date,rate` CSV file holding one record per day in chronological order.
#[derive(Debug, Clone)]
pub struct RateLog {
    path: PathBuf,
}

impl RateLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads every record. A missing file is an empty log.
    pub fn load(&self) -> Result<Vec<RateRecord>> {
        if !self.exists() {
            debug!("Rate log {} does not exist yet", self.path.display());
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open rate log: {}", self.path.display()))?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let records = reader
            .deserialize()
            .collect::<Result<Vec<RateRecord>, _>>()
            .with_context(|| format!("Failed to parse rate log: {}", self.path.display()))?;
        debug!(
            "Loaded {} records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    /// Last two records as `(previous, current)`.
    pub fn latest_pair(&self) -> Result<Option<(RateRecord, RateRecord)>> {
        let records = self.load()?;
        Ok(match records.as_slice() {
            [.., previous, current] => Some((*previous, *current)),
            _ => None,
        })
    }

    /// Adds `record` to the log, replacing the rate of an existing record with the same date.
    /// A date older than the last record is inserted at its chronological position.
    pub fn upsert(&self, record: RateRecord) -> Result<Vec<RateRecord>> {
        let mut records = self.load()?;
        match records.iter().position(|r| r.date >= record.date) {
            Some(index) if records[index].date == record.date => {
                debug!("Replacing rate for {}", record.date);
                records[index].rate = record.rate;
            }
            Some(index) => {
                warn!(
                    "Inserting {} before later record {}; check the system clock",
                    record.date, records[index].date
                );
                records.insert(index, record);
            }
            None => records.push(record),
        }
        self.save(&records)?;
        Ok(records)
    }

    /// Rewrites the whole file through a temp file in the same directory.
    pub fn save(&self, records: &[RateRecord]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let tmp = NamedTempFile::new_in(&dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file());
            // An empty log still carries its header.
            if records.is_empty() {
                writer.write_record(["date", "rate"])?;
            }
            for record in records {
                writer.serialize(record)?;
            }
            writer
                .flush()
                .with_context(|| format!("Failed to write rate log: {}", self.path.display()))?;
        }
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to sync rate log: {}", self.path.display()))?;

        // The temp file is owner-only; keep whatever mode the existing log had.
        if let Ok(metadata) = fs::metadata(&self.path) {
            fs::set_permissions(tmp.path(), metadata.permissions()).with_context(|| {
                format!("Failed to copy permissions of {}", self.path.display())
            })?;
        }
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace rate log: {}", self.path.display()))?;

        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}
