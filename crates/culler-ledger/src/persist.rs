//! Plain-text persistence for the activity ledger
//!
//! Format: one record per entry, `<identity> <timestamp>`, whitespace
//! separated, newline terminated. The parser tolerates and skips malformed
//! lines so one corrupt record never costs the rest of the file.

use crate::ledger::ActivityLedger;
use culler_domain::MemberId;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during ledger persistence
#[derive(Error, Debug)]
pub enum LedgerError {
    /// I/O error reading or writing the persisted state file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ActivityLedger {
    /// Parse a ledger from persisted records
    ///
    /// Lines with the wrong field count or non-numeric fields are skipped
    /// silently; they do not abort loading the remaining records. When the
    /// same identity appears on multiple lines, the last record wins.
    pub fn load_from<R: io::Read>(reader: R) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        let reader = BufReader::new(reader);

        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();

            let (Some(id), Some(timestamp)) = (parts.next(), parts.next()) else {
                continue;
            };
            if parts.next().is_some() {
                tracing::debug!(line = %line, "Skipping malformed ledger record");
                continue;
            }

            let (Ok(id), Ok(timestamp)) = (id.parse::<MemberId>(), timestamp.parse::<u64>())
            else {
                tracing::debug!(line = %line, "Skipping malformed ledger record");
                continue;
            };

            ledger.touch_at(id, timestamp);
        }

        Ok(ledger)
    }

    /// Load a ledger from a file path
    ///
    /// A missing file means no prior run and yields an empty ledger, not an
    /// error.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let file = File::open(path)?;
        let ledger = Self::load_from(file)?;
        tracing::debug!(
            path = %path.display(),
            entries = ledger.len(),
            "Loaded activity ledger"
        );
        Ok(ledger)
    }

    /// Serialize all entries as persisted records
    pub fn save_to<W: io::Write>(&self, writer: W) -> Result<(), LedgerError> {
        let mut writer = BufWriter::new(writer);
        for (id, timestamp) in self.entries() {
            writeln!(writer, "{} {}", id, timestamp)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Save all entries to a file path, replacing any previous contents
    pub fn save_path<P: AsRef<Path>>(&self, path: P) -> Result<(), LedgerError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.save_to(file)?;
        tracing::debug!(
            path = %path.display(),
            entries = self.len(),
            "Saved activity ledger"
        );
        Ok(())
    }
}
