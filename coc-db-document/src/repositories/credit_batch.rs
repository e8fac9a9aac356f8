use std::sync::Arc;

use async_trait::async_trait;
use coc_api::{CocResult, Month};
use coc_db::models::credit_batch::fields;
use coc_db::models::{BatchSource, BatchStatus, CreditBatchModel};
use coc_db::repository::CreditBatchRepository;
use coc_db::store::collections::CREDIT_BATCHES;
use coc_db::store::{opt_str, Document, DocumentStore, FieldValue};
use uuid::Uuid;

pub struct DocumentCreditBatchRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentCreditBatchRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// FIFO order for debits: earliest expiry first, then earliest issuance.
    fn parse_all(docs: Vec<Document>) -> CocResult<Vec<CreditBatchModel>> {
        let mut models = Vec::with_capacity(docs.len());
        for doc in &docs {
            let id = opt_str(doc, fields::BATCH_ID).unwrap_or_default();
            models.push(CreditBatchModel::from_document(&id, doc)?);
        }
        models.sort_by_key(|m| (m.valid_until, m.date_of_issuance, m.batch_id));
        Ok(models)
    }
}

#[async_trait]
impl CreditBatchRepository for DocumentCreditBatchRepository {
    async fn create(&self, batch: CreditBatchModel) -> CocResult<()> {
        self.store
            .create(CREDIT_BATCHES, &batch.document_id(), batch.to_document())
            .await
    }

    async fn find_by_id(&self, batch_id: Uuid) -> CocResult<Option<CreditBatchModel>> {
        let id = batch_id.to_string();
        match self.store.get(CREDIT_BATCHES, &id).await? {
            Some(doc) => Ok(Some(CreditBatchModel::from_document(&id, &doc)?)),
            None => Ok(None),
        }
    }

    async fn find_by_employee(&self, employee_id: &str) -> CocResult<Vec<CreditBatchModel>> {
        let docs = self
            .store
            .find_matching(
                CREDIT_BATCHES,
                &[(fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string()))],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_employee_and_status(
        &self,
        employee_id: &str,
        status: BatchStatus,
    ) -> CocResult<Vec<CreditBatchModel>> {
        let docs = self
            .store
            .find_matching(
                CREDIT_BATCHES,
                &[
                    (fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string())),
                    (fields::STATUS, FieldValue::Str(status.as_str().to_string())),
                ],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_period_and_source(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
        source: BatchSource,
    ) -> CocResult<Vec<CreditBatchModel>> {
        let docs = self
            .store
            .find_matching(
                CREDIT_BATCHES,
                &[
                    (fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string())),
                    (fields::EARNED_MONTH, FieldValue::Str(month.name().to_string())),
                    (fields::EARNED_YEAR, FieldValue::Int(year as i64)),
                    (fields::SOURCE_TYPE, FieldValue::Str(source.as_str().to_string())),
                ],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_status(&self, status: BatchStatus) -> CocResult<Vec<CreditBatchModel>> {
        let docs = self
            .store
            .find_matching(
                CREDIT_BATCHES,
                &[(fields::STATUS, FieldValue::Str(status.as_str().to_string()))],
            )
            .await?;
        Self::parse_all(docs)
    }
}
