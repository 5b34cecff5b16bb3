//! Append-only history of processed commands.
//!
//! Recording must never fail a turn, so both sinks swallow their own storage
//! errors after logging them; `recent` reports errors because the caller is a
//! query, not the dispatch path.

use crate::StoreError;
use command_core::{ActionOutcome, HistorySink};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub command: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub success: bool,
    pub response: String,
}

impl HistoryEntry {
    fn for_turn(utterance: &str, outcome: &ActionOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            command: utterance.to_string(),
            timestamp: OffsetDateTime::now_utc(),
            success: outcome.success,
            response: outcome.message.clone(),
        }
    }
}

/// One serialized entry per line, appended and flushed per record.
pub struct JsonlHistory {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlHistory {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries ordered most recent first. Lines that fail to parse are
    /// skipped with a warning rather than poisoning the query.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, StoreError> {
        let file = File::open(&self.path)?;
        let mut entries = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(error = %e, "skipping unreadable history line"),
            }
        }
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }
}

impl HistorySink for JsonlHistory {
    fn record(&mut self, utterance: &str, outcome: &ActionOutcome) {
        let entry = HistoryEntry::for_turn(utterance, outcome);
        match serde_json::to_string(&entry) {
            Ok(line) => {
                if let Err(e) = writeln!(self.writer, "{line}").and_then(|_| self.writer.flush()) {
                    error!(error = %e, "failed to append history entry");
                }
            }
            Err(e) => error!(error = %e, "failed to encode history entry"),
        }
    }
}

/// Bounded in-memory sink for tests and `once` runs.
pub struct MemoryHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl MemoryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        self.entries.iter().rev().take(limit).cloned().collect()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(256)
    }
}

impl HistorySink for MemoryHistory {
    fn record(&mut self, utterance: &str, outcome: &ActionOutcome) {
        self.entries.push_back(HistoryEntry::for_turn(utterance, outcome));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}
