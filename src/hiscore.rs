//! Persistent top-ten score table, stored as JSON next to the binary.

use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HISCORE_CAPACITY: usize = 10;
pub const HISCORE_NAME_MAX: usize = 12;

#[derive(Debug, Error)]
pub enum HiscoreError {
    #[error("hiscore file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("hiscore file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HiscoreEntry {
    pub name: String,
    pub score: u32,
    pub level: u16,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HiscoreTable {
    entries: Vec<HiscoreEntry>,
}

impl HiscoreTable {
    /// Loads the table, treating a missing file as an empty board. A
    /// malformed file is logged and discarded rather than crashing a
    /// game that is otherwise fine.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<HiscoreTable>(&text) {
                Ok(mut table) => {
                    table.entries.truncate(HISCORE_CAPACITY);
                    table
                }
                Err(err) => {
                    warn!("discarding hiscore table: {err}");
                    Self::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!("could not read hiscore table: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), HiscoreError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn entries(&self) -> &[HiscoreEntry] {
        &self.entries
    }

    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        self.entries.len() < HISCORE_CAPACITY
            || self.entries.iter().any(|entry| score > entry.score)
    }

    /// Inserts keeping descending score order; ties rank below existing
    /// entries. Returns the zero-based rank.
    pub fn insert(&mut self, name: &str, score: u32, level: u16) -> usize {
        let mut name: String = name.chars().take(HISCORE_NAME_MAX).collect();
        if name.is_empty() {
            name.push_str("???");
        }
        let rank = self
            .entries
            .iter()
            .position(|entry| score > entry.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, HiscoreEntry { name, score, level });
        self.entries.truncate(HISCORE_CAPACITY);
        rank
    }
}
