use crate::domain::ports::TransactionRecorder;
use crate::domain::record::{TransactionRecord, CSV_HEADERS};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory transaction recorder.
///
/// Uses `Arc<RwLock<Vec<TransactionRecord>>>` for shared concurrent
/// access; clones share the underlying storage. Used by tests and handy
/// for ephemeral deployments where nothing should touch the disk.
#[derive(Default, Clone)]
pub struct InMemoryRecorder {
    records: Arc<RwLock<Vec<TransactionRecord>>>,
}

impl InMemoryRecorder {
    /// Creates a new, empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub async fn records(&self) -> Vec<TransactionRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl TransactionRecorder for InMemoryRecorder {
    async fn record(&self, record: &TransactionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }

    async fn export(&self) -> Result<Option<String>> {
        let records = self.records.read().await;
        if records.is_empty() {
            return Ok(None);
        }

        let mut buffer = Vec::new();
        {
            let mut writer = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Always)
                .has_headers(false)
                .from_writer(&mut buffer);
            writer.write_record(CSV_HEADERS)?;
            for record in records.iter() {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
    }
}
