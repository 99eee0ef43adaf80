//! JSONL-backed processed store.
//!
//! One file per collection under the store root, one JSON record per line,
//! append-only. The whole file is scanned on lookup; these logs stay small
//! (one line per pushed entity) and the scan keeps the store free of any
//! index state to corrupt.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Collection, ProcessedRecord};
use crate::domain::ports::ProcessedStore;

/// Append-only JSONL store rooted at a directory.
#[derive(Debug, Clone)]
pub struct JsonlStore {
    root: PathBuf,
}

impl JsonlStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first append.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.jsonl", collection.as_str()))
    }
}

#[async_trait]
impl ProcessedStore for JsonlStore {
    async fn find(
        &self,
        collection: Collection,
        unique_key: &str,
    ) -> DomainResult<Option<ProcessedRecord>> {
        let path = self.path(collection);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(DomainError::Store(format!(
                    "failed to read {}: {err}",
                    path.display()
                )))
            }
        };

        // Last match wins: a key rewritten later supersedes earlier lines.
        let mut found = None;
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: ProcessedRecord = serde_json::from_str(line).map_err(|err| {
                DomainError::Store(format!("corrupt record in {}: {err}", path.display()))
            })?;
            if record.unique_key == unique_key {
                found = Some(record);
            }
        }
        Ok(found)
    }

    async fn append(&self, collection: Collection, record: &ProcessedRecord) -> DomainResult<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|err| {
            DomainError::Store(format!(
                "failed to create {}: {err}",
                self.root.display()
            ))
        })?;

        let path = self.path(collection);
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|err| {
                DomainError::Store(format!("failed to open {}: {err}", path.display()))
            })?;
        file.write_all(line.as_bytes()).await.map_err(|err| {
            DomainError::Store(format!("failed to append to {}: {err}", path.display()))
        })?;
        Ok(())
    }
}
