use std::sync::Arc;

use async_trait::async_trait;
use coc_api::CocResult;
use coc_db::models::ledger::fields;
use coc_db::models::LedgerEntryModel;
use coc_db::repository::LedgerRepository;
use coc_db::store::collections::LEDGER;
use coc_db::store::{Document, DocumentStore, FieldValue};
use uuid::Uuid;

pub struct DocumentLedgerRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentLedgerRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn parse_all(docs: Vec<Document>) -> CocResult<Vec<LedgerEntryModel>> {
        let mut models = Vec::with_capacity(docs.len());
        for doc in &docs {
            let id = match doc.get(fields::TRANSACTION_ID) {
                Some(FieldValue::Int(v)) => v.to_string(),
                _ => String::new(),
            };
            models.push(LedgerEntryModel::from_document(&id, doc)?);
        }
        // the per-employee total order
        models.sort_by_key(|m| (m.transaction_date, m.transaction_id));
        Ok(models)
    }
}

#[async_trait]
impl LedgerRepository for DocumentLedgerRepository {
    async fn reserve_transaction_ids(&self, count: usize) -> CocResult<i64> {
        crate::repositories::id_gen::reserve_ids(
            self.store.as_ref(),
            LEDGER,
            LEDGER,
            fields::TRANSACTION_ID,
            count,
        )
        .await
    }

    async fn append(&self, entry: LedgerEntryModel) -> CocResult<()> {
        self.store
            .create(LEDGER, &entry.document_id(), entry.to_document())
            .await
    }

    async fn find_by_employee(&self, employee_id: &str) -> CocResult<Vec<LedgerEntryModel>> {
        let docs = self
            .store
            .find_matching(
                LEDGER,
                &[(fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string()))],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_batch(&self, batch_id: Uuid) -> CocResult<Vec<LedgerEntryModel>> {
        let docs = self
            .store
            .find_matching(
                LEDGER,
                &[(fields::BATCH_ID, FieldValue::Str(batch_id.to_string()))],
            )
            .await?;
        Self::parse_all(docs)
    }
}
