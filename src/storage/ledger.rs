// src/storage/ledger.rs

//! Append-only tab-separated output ledger.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::ProductRecord;

/// The run's `extract.tab`.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    file: File,
    lines: usize,
}

impl Ledger {
    /// Create the ledger, truncating whatever a previous run left behind.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let file = File::create(&path).await?;
        Ok(Self {
            path,
            file,
            lines: 0,
        })
    }

    /// Append one record as a single line and flush it.
    pub async fn append(&mut self, record: &ProductRecord) -> Result<()> {
        self.file.write_all(record.to_tab_line().as_bytes()).await?;
        self.file.flush().await?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written during this run.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            ..ProductRecord::default()
        }
    }

    #[tokio::test]
    async fn test_append_writes_one_line_per_record() {
        let tmp = TempDir::new().unwrap();
        let mut ledger = Ledger::create(tmp.path().join("extract.tab")).await.unwrap();

        ledger.append(&record("a")).await.unwrap();
        ledger.append(&record("b")).await.unwrap();

        let content = std::fs::read_to_string(ledger.path()).unwrap();
        assert_eq!(content, "a\t0\t\t\t0\nb\t0\t\t\t0\n");
        assert_eq!(ledger.lines(), 2);
    }

    #[tokio::test]
    async fn test_create_truncates_previous_run() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("extract.tab");

        let mut first = Ledger::create(&path).await.unwrap();
        for name in ["a", "b", "c"] {
            first.append(&record(name)).await.unwrap();
        }
        drop(first);

        let mut second = Ledger::create(&path).await.unwrap();
        second.append(&record("d")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.starts_with("d\t"));
    }
}
