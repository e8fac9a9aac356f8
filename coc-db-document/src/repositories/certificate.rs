use std::sync::Arc;

use async_trait::async_trait;
use coc_api::{CocResult, Month};
use coc_db::models::certificate::fields;
use coc_db::models::CertificateModel;
use coc_db::repository::CertificateRepository;
use coc_db::store::collections::CERTIFICATES;
use coc_db::store::{opt_str, Document, DocumentStore, FieldValue};
use uuid::Uuid;

pub struct DocumentCertificateRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentCertificateRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn parse_all(docs: Vec<Document>) -> CocResult<Vec<CertificateModel>> {
        let mut models = Vec::with_capacity(docs.len());
        for doc in &docs {
            let id = opt_str(doc, fields::CERTIFICATE_ID).unwrap_or_default();
            models.push(CertificateModel::from_document(&id, doc)?);
        }
        models.sort_by_key(|m| (m.year, m.month));
        Ok(models)
    }
}

#[async_trait]
impl CertificateRepository for DocumentCertificateRepository {
    async fn create(&self, certificate: CertificateModel) -> CocResult<()> {
        self.store
            .create(CERTIFICATES, &certificate.document_id(), certificate.to_document())
            .await
    }

    async fn find_by_id(&self, certificate_id: Uuid) -> CocResult<Option<CertificateModel>> {
        let id = certificate_id.to_string();
        match self.store.get(CERTIFICATES, &id).await? {
            Some(doc) => Ok(Some(CertificateModel::from_document(&id, &doc)?)),
            None => Ok(None),
        }
    }

    async fn find_by_period(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<Option<CertificateModel>> {
        let docs = self
            .store
            .find_matching(
                CERTIFICATES,
                &[
                    (fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string())),
                    (fields::MONTH, FieldValue::Str(month.name().to_string())),
                    (fields::YEAR, FieldValue::Int(year as i64)),
                ],
            )
            .await?;
        Ok(Self::parse_all(docs)?.into_iter().next())
    }

    async fn find_by_employee_and_year(
        &self,
        employee_id: &str,
        year: i32,
    ) -> CocResult<Vec<CertificateModel>> {
        let docs = self
            .store
            .find_matching(
                CERTIFICATES,
                &[
                    (fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string())),
                    (fields::YEAR, FieldValue::Int(year as i64)),
                ],
            )
            .await?;
        Self::parse_all(docs)
    }
}
