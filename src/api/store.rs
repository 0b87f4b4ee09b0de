//! In-memory employee store, optionally mirrored to a JSON file

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::info;

use crate::error::RosterResult;
use crate::types::EmployeeRecord;
use crate::writer::write_json_file;

pub struct EmployeeStore {
    records: RwLock<Vec<EmployeeRecord>>,
    mirror: Option<PathBuf>,
}

impl EmployeeStore {
    /// Empty store; every change is written to `mirror` when set
    pub fn new(mirror: Option<PathBuf>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            mirror,
        }
    }

    /// Store seeded from an existing mirror file, if there is one
    pub fn load(mirror: Option<PathBuf>) -> RosterResult<Self> {
        let records = match mirror.as_deref() {
            Some(path) if path.exists() => read_mirror(path)?,
            _ => Vec::new(),
        };

        if let Some(path) = &mirror {
            info!(path = %path.display(), count = records.len(), "loaded employee store");
        }

        Ok(Self {
            records: RwLock::new(records),
            mirror,
        })
    }

    /// Append records in order; returns the new total.
    ///
    /// The mirror file is rewritten before the in-memory list changes, so a
    /// failed write leaves the store untouched. Blocks on file IO when a
    /// mirror is set; async callers run it on `spawn_blocking`.
    pub fn append(&self, new_records: Vec<EmployeeRecord>) -> RosterResult<usize> {
        let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);

        let mut combined = guard.clone();
        combined.extend(new_records);

        if let Some(path) = &self.mirror {
            write_json_file(path, &combined)?;
        }

        *guard = combined;
        Ok(guard.len())
    }

    pub fn list(&self) -> Vec<EmployeeRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mirror_path(&self) -> Option<&Path> {
        self.mirror.as_deref()
    }
}

fn read_mirror(path: &Path) -> RosterResult<Vec<EmployeeRecord>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
