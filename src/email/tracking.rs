//! Tracking number index
//!
//! Scans a folder of stored notification emails (plain-text exports,
//! `.eml` or `.txt`) for carrier tracking numbers and keeps a local
//! index so a number can be traced back to the email that announced it.

use crate::error::{Result, ShiptrackError};
use indicatif::ProgressBar;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use walkdir::WalkDir;

const INDEX_FILE_NAME: &str = ".tracking-index.json";
const EMAIL_EXTENSIONS: &[&str] = &["eml", "txt"];

lazy_static::lazy_static! {
    // 12-digit carrier numbers plus the two in-house formats
    static ref TRACKING_RE: Regex =
        Regex::new(r"\b(?:\d{12}|KOL-NT\d{2}-\d{4}|IADD\d{6})").unwrap();
}

/// Tracking numbers found in one body, first-seen order, deduplicated
pub fn extract_tracking_numbers(body: &str) -> Vec<String> {
    let mut output: Vec<String> = Vec::new();
    for m in TRACKING_RE.find_iter(body) {
        let number = m.as_str().to_string();
        if !output.contains(&number) {
            output.push(number);
        }
    }
    output
}

/// Index file: email file name -> tracking numbers found in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingIndex {
    version: u32,
    entries: BTreeMap<String, Vec<String>>,
}

impl TrackingIndex {
    const CURRENT_VERSION: u32 = 1;

    /// Load the index from the emails folder. Missing, corrupt or
    /// foreign-version files just start a fresh index; the data is
    /// derivable by rescanning.
    pub fn load(folder: &Path) -> Self {
        let path = folder.join(INDEX_FILE_NAME);
        if !path.exists() {
            return Self::default();
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, TrackingIndex>(reader) {
            Ok(index) if index.version == Self::CURRENT_VERSION => index,
            _ => Self::default(),
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(folder.join(INDEX_FILE_NAME))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Index any email files not seen before. Returns how many new
    /// emails were added.
    pub fn scan_folder(&mut self, folder: &Path) -> Result<usize> {
        if !folder.exists() {
            return Err(ShiptrackError::FileNotFound(folder.display().to_string()));
        }

        let mut candidates = Vec::new();
        for entry in WalkDir::new(folder)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().map(|e| e.to_string_lossy().to_lowercase()) else {
                continue;
            };
            if !EMAIL_EXTENSIONS.iter().any(|&e| e == ext) {
                continue;
            }
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if !self.entries.contains_key(&file_name) {
                candidates.push((file_name, path.to_path_buf()));
            }
        }

        let bar = ProgressBar::new(candidates.len() as u64);
        let mut added = 0;
        for (file_name, path) in candidates {
            let bytes = std::fs::read(&path)?;
            let body = String::from_utf8_lossy(&bytes);
            self.entries.insert(file_name, extract_tracking_numbers(&body));
            added += 1;
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(added)
    }

    /// Email file that first announced the given tracking number
    pub fn find_email(&self, number: &str) -> Option<&str> {
        let wanted = number.trim();
        self.entries
            .iter()
            .find(|(_, numbers)| numbers.iter().any(|n| n == wanted))
            .map(|(file_name, _)| file_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TrackingIndex {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}
