use crate::domain::outcome::PaymentStatus;
use crate::domain::ports::TransactionRecorder;
use crate::domain::record::{TransactionRecord, CSV_HEADERS};
use crate::error::Result;
use async_trait::async_trait;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::info;

/// Append-only CSV transaction log.
///
/// Rows are written fully quoted so embedded commas and quotes in the JSON
/// columns stay inside their field. A file gets its header exactly once,
/// when it is first created; appends never rewrite it. All appends go
/// through one mutex so concurrent captures cannot interleave rows.
///
/// When a failed-log path is configured, unsuccessful captures are written
/// there in addition to the main log.
pub struct CsvTransactionLog {
    path: PathBuf,
    failed_path: Option<PathBuf>,
    lock: Mutex<()>,
}

impl CsvTransactionLog {
    pub fn new(path: PathBuf, failed_path: Option<PathBuf>) -> Self {
        Self {
            path,
            failed_path,
            lock: Mutex::new(()),
        }
    }

    fn append_row(path: &Path, record: &TransactionRecord) -> Result<()> {
        let needs_header = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(CSV_HEADERS)?;
            info!(path = %path.display(), "transaction log created");
        }
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl TransactionRecorder for CsvTransactionLog {
    async fn record(&self, record: &TransactionRecord) -> Result<()> {
        let _guard = self.lock.lock().await;
        Self::append_row(&self.path, record)?;
        if record.status != PaymentStatus::Completed {
            if let Some(failed_path) = &self.failed_path {
                Self::append_row(failed_path, record)?;
            }
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        let _guard = self.lock.lock().await;
        if !self.path.exists() {
            return Ok(0);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)?;
        Ok(reader.records().count())
    }

    async fn export(&self) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }
}
