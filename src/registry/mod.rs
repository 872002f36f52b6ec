//! Persisted record registry
//!
//! The registry is a single JSON blob on disk holding the ordered record
//! list under one key. Every operation is a scoped read-modify-write:
//! open the file, mutate the full list, write it back, release. The
//! handle is never held across the process lifetime.

pub mod category;

use crate::error::{Result, ShiptrackError};
use crate::record::Record;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// On-disk registry structure
#[derive(Debug, Serialize, Deserialize)]
struct RegistryFile {
    /// Schema version; anything other than CURRENT_VERSION is unsupported
    version: u32,
    data_entries: Vec<Record>,
}

pub struct Registry {
    path: PathBuf,
}

impl Registry {
    const CURRENT_VERSION: u32 = 1;

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the full persisted list. A missing file is a first run and
    /// yields an empty list; a corrupt or foreign-schema file is an error.
    pub fn load(&self) -> Result<Vec<Record>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let parsed: RegistryFile = serde_json::from_reader(reader)?;

        if parsed.version != Self::CURRENT_VERSION {
            return Err(ShiptrackError::UnsupportedSchema(parsed.version));
        }

        Ok(parsed.data_entries)
    }

    /// Read the current full list, append, write back the full list.
    /// No uniqueness constraint on title; duplicates are not reconciled.
    pub fn append(&self, record: Record) -> Result<()> {
        let mut entries = self.load()?;
        entries.push(record);
        self.store(entries)
    }

    /// Archive the record at `index`. Removal means `alive = false`;
    /// there is no delete.
    pub fn mark_archived(&self, index: usize) -> Result<Record> {
        self.update(index, |record| record.alive = false)
    }

    /// Flag the record at `index` as having had its notification email
    /// generated.
    pub fn mark_email_generated(&self, index: usize, sent_at: NaiveDateTime) -> Result<Record> {
        self.update(index, |record| {
            record.email_generated = true;
            record.date_sent = Some(sent_at);
        })
    }

    fn update(&self, index: usize, apply: impl FnOnce(&mut Record)) -> Result<Record> {
        let mut entries = self.load()?;
        let record = entries
            .get_mut(index)
            .ok_or(ShiptrackError::RecordNotFound(index))?;
        apply(record);
        let updated = record.clone();
        self.store(entries)?;
        Ok(updated)
    }

    fn store(&self, entries: Vec<Record>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(
            writer,
            &RegistryFile {
                version: Self::CURRENT_VERSION,
                data_entries: entries,
            },
        )?;
        Ok(())
    }
}
