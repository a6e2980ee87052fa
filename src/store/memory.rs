use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

use super::{RecordStore, StoreError, StorePredicate};
use crate::models::AnalyzedString;

/// Process-local store keeping records in insertion order. When opened with
/// a data directory every mutation is written back to `strings.json`.
pub struct MemoryStore {
    records: RwLock<Vec<AnalyzedString>>,
    persist_path: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Store with no backing file.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            persist_path: None,
        }
    }

    /// Load `<data_dir>/strings.json` if present and persist to it afterwards.
    pub fn open_or_create(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
        let persist_path = data_dir.join("strings.json");

        let records = if persist_path.exists() {
            let data = std::fs::read_to_string(&persist_path)
                .context("Failed to read string store")?;
            serde_json::from_str(&data).context("Failed to parse string store")?
        } else {
            Vec::new()
        };

        Ok(Self {
            records: RwLock::new(records),
            persist_path: Some(persist_path),
        })
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Atomic write via temp file + rename.
    fn persist(&self, records: &[AnalyzedString]) -> Result<(), StoreError> {
        let Some(path) = &self.persist_path else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(records)?;
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, data)?;
        std::fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, record: &AnalyzedString) -> Result<AnalyzedString, StoreError> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::Conflict(record.id.clone()));
        }
        records.push(record.clone());
        if let Err(e) = self.persist(&records) {
            records.pop();
            return Err(e);
        }
        Ok(record.clone())
    }

    async fn get_by_value(&self, value: &str) -> Result<Option<AnalyzedString>, StoreError> {
        let records = self.records.read();
        Ok(records.iter().find(|r| r.value == value).cloned())
    }

    async fn list_where(
        &self,
        predicate: &StorePredicate,
    ) -> Result<Vec<AnalyzedString>, StoreError> {
        let records = self.records.read();
        Ok(records
            .iter()
            .filter(|r| predicate.matches(r))
            .cloned()
            .collect())
    }

    async fn delete_by_value(&self, value: &str) -> Result<bool, StoreError> {
        let mut records = self.records.write();
        let remaining: Vec<AnalyzedString> = records
            .iter()
            .filter(|r| r.value != value)
            .cloned()
            .collect();
        if remaining.len() == records.len() {
            return Ok(false);
        }
        // Memory only changes once the file does
        self.persist(&remaining)?;
        *records = remaining;
        Ok(true)
    }
}
