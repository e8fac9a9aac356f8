use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use coc_api::CocResult;
use coc_db::models::{
    credit_batch, overtime_log, CertificateModel, CreditBatchModel, LedgerEntryModel, LogStatus,
};
use coc_db::repository::{BatchHoursUpdate, LogStatusUpdate, UnitOfWork};
use coc_db::store::collections::{CERTIFICATES, CREDIT_BATCHES, LEDGER, OVERTIME_LOGS};
use coc_db::store::{Document, DocumentStore, FieldValue, WriteOp};

/// Cross-collection commits over the adapter's atomic `batch_write`.
/// Operations are ordered logs, then batch, then ledger, then certificate
/// inside every commit, so stores that apply batches sequentially crash
/// into a recoverable state.
pub struct DocumentUnitOfWork {
    store: Arc<dyn DocumentStore>,
}

impl DocumentUnitOfWork {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn log_status_patch(update: &LogStatusUpdate) -> WriteOp {
        let mut patch = Document::new();
        patch.insert(
            overtime_log::fields::STATUS.to_string(),
            FieldValue::Str(update.status.as_str().to_string()),
        );
        WriteOp::Update {
            collection: OVERTIME_LOGS.to_string(),
            id: update.log_id.to_string(),
            patch,
        }
    }
}

#[async_trait]
impl UnitOfWork for DocumentUnitOfWork {
    async fn commit_certification(
        &self,
        log_ids: &[i64],
        valid_until: NaiveDate,
        batch: CreditBatchModel,
        ledger_entry: LedgerEntryModel,
        certificate: CertificateModel,
    ) -> CocResult<()> {
        let mut ops = Vec::with_capacity(log_ids.len() + 3);
        for log_id in log_ids {
            let mut patch = Document::new();
            patch.insert(
                overtime_log::fields::STATUS.to_string(),
                FieldValue::Str(LogStatus::Active.as_str().to_string()),
            );
            patch.insert(
                overtime_log::fields::VALID_UNTIL.to_string(),
                FieldValue::from_date(valid_until),
            );
            ops.push(WriteOp::Update {
                collection: OVERTIME_LOGS.to_string(),
                id: log_id.to_string(),
                patch,
            });
        }
        ops.push(WriteOp::Create {
            collection: CREDIT_BATCHES.to_string(),
            id: batch.document_id(),
            fields: batch.to_document(),
        });
        ops.push(WriteOp::Create {
            collection: LEDGER.to_string(),
            id: ledger_entry.document_id(),
            fields: ledger_entry.to_document(),
        });
        ops.push(WriteOp::Create {
            collection: CERTIFICATES.to_string(),
            id: certificate.document_id(),
            fields: certificate.to_document(),
        });
        self.store.batch_write(ops).await
    }

    async fn commit_debit(
        &self,
        batch_updates: Vec<BatchHoursUpdate>,
        ledger_entries: Vec<LedgerEntryModel>,
        log_updates: Vec<LogStatusUpdate>,
    ) -> CocResult<()> {
        let mut ops = Vec::with_capacity(batch_updates.len() + ledger_entries.len() + log_updates.len());
        for update in &log_updates {
            ops.push(Self::log_status_patch(update));
        }
        for update in &batch_updates {
            let mut patch = Document::new();
            patch.insert(
                credit_batch::fields::REMAINING_HOURS.to_string(),
                FieldValue::from_hours(update.remaining_hours),
            );
            patch.insert(
                credit_batch::fields::USED_HOURS.to_string(),
                FieldValue::from_hours(update.used_hours),
            );
            patch.insert(
                credit_batch::fields::STATUS.to_string(),
                FieldValue::Str(update.status.as_str().to_string()),
            );
            ops.push(WriteOp::Update {
                collection: CREDIT_BATCHES.to_string(),
                id: update.batch_id.to_string(),
                patch,
            });
        }
        for entry in &ledger_entries {
            ops.push(WriteOp::Create {
                collection: LEDGER.to_string(),
                id: entry.document_id(),
                fields: entry.to_document(),
            });
        }
        self.store.batch_write(ops).await
    }

    async fn commit_expiration(
        &self,
        batch_id: uuid::Uuid,
        ledger_entry: Option<LedgerEntryModel>,
        log_updates: Vec<LogStatusUpdate>,
    ) -> CocResult<()> {
        let mut ops = Vec::with_capacity(log_updates.len() + 2);
        for update in &log_updates {
            ops.push(Self::log_status_patch(update));
        }
        // status only; remaining hours stay on the record for audit
        let mut patch = Document::new();
        patch.insert(
            credit_batch::fields::STATUS.to_string(),
            FieldValue::Str(coc_db::models::BatchStatus::Expired.as_str().to_string()),
        );
        ops.push(WriteOp::Update {
            collection: CREDIT_BATCHES.to_string(),
            id: batch_id.to_string(),
            patch,
        });
        if let Some(entry) = &ledger_entry {
            ops.push(WriteOp::Create {
                collection: LEDGER.to_string(),
                id: entry.document_id(),
                fields: entry.to_document(),
            });
        }
        self.store.batch_write(ops).await
    }

    async fn commit_historical_import(
        &self,
        batch: CreditBatchModel,
        ledger_entry: LedgerEntryModel,
    ) -> CocResult<()> {
        self.store
            .batch_write(vec![
                WriteOp::Create {
                    collection: CREDIT_BATCHES.to_string(),
                    id: batch.document_id(),
                    fields: batch.to_document(),
                },
                WriteOp::Create {
                    collection: LEDGER.to_string(),
                    id: ledger_entry.document_id(),
                    fields: ledger_entry.to_document(),
                },
            ])
            .await
    }
}
