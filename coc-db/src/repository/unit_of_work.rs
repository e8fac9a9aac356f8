use async_trait::async_trait;
use chrono::NaiveDate;
use coc_api::CocResult;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    BatchStatus, CertificateModel, CreditBatchModel, LedgerEntryModel, LogStatus,
};

/// Cross-collection commits that must be observable as a single write.
/// Backed by the adapter's atomic `batch_write`; write order inside a
/// commit is logs, then batch, then ledger, then certificate.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Certification commit: logs flip Active with a shared valid-until,
    /// one batch, one ledger Credit, one certificate.
    async fn commit_certification(
        &self,
        log_ids: &[i64],
        valid_until: NaiveDate,
        batch: CreditBatchModel,
        ledger_entry: LedgerEntryModel,
        certificate: CertificateModel,
    ) -> CocResult<()>;

    /// FIFO debit effects: batch hour counters, one ledger Debit per batch
    /// touched, and Used flips for logs of exhausted certificate batches.
    async fn commit_debit(
        &self,
        batch_updates: Vec<BatchHoursUpdate>,
        ledger_entries: Vec<LedgerEntryModel>,
        log_updates: Vec<LogStatusUpdate>,
    ) -> CocResult<()>;

    /// One batch expiring: status flip (remaining hours untouched on the
    /// record), the Expiration journal row, and Expired flips for covered
    /// logs.
    async fn commit_expiration(
        &self,
        batch_id: Uuid,
        ledger_entry: Option<LedgerEntryModel>,
        log_updates: Vec<LogStatusUpdate>,
    ) -> CocResult<()>;

    /// Historical import: the batch and its ledger Credit.
    async fn commit_historical_import(
        &self,
        batch: CreditBatchModel,
        ledger_entry: LedgerEntryModel,
    ) -> CocResult<()>;
}

#[derive(Debug, Clone)]
pub struct BatchHoursUpdate {
    pub batch_id: Uuid,
    pub remaining_hours: Decimal,
    pub used_hours: Decimal,
    pub status: BatchStatus,
}

#[derive(Debug, Clone)]
pub struct LogStatusUpdate {
    pub log_id: i64,
    pub status: LogStatus,
}
