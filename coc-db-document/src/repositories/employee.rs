use std::sync::Arc;

use async_trait::async_trait;
use coc_api::CocResult;
use coc_db::models::employee::fields;
use coc_db::models::{EmployeeModel, EmployeeStatus};
use coc_db::repository::EmployeeRepository;
use coc_db::store::collections::EMPLOYEES;
use coc_db::store::{opt_str, Document, DocumentStore, FieldValue};

pub struct DocumentEmployeeRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentEmployeeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn parse_all(docs: Vec<Document>) -> CocResult<Vec<EmployeeModel>> {
        let mut models = Vec::with_capacity(docs.len());
        for doc in &docs {
            let id = opt_str(doc, fields::EMPLOYEE_ID).unwrap_or_default();
            models.push(EmployeeModel::from_document(&id, doc)?);
        }
        models.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(models)
    }
}

#[async_trait]
impl EmployeeRepository for DocumentEmployeeRepository {
    async fn create(&self, employee: EmployeeModel) -> CocResult<EmployeeModel> {
        self.store
            .create(EMPLOYEES, &employee.document_id(), employee.to_document())
            .await?;
        Ok(employee)
    }

    async fn update(&self, employee: EmployeeModel) -> CocResult<EmployeeModel> {
        self.store
            .update(EMPLOYEES, &employee.document_id(), employee.to_document())
            .await?;
        Ok(employee)
    }

    async fn find_by_id(&self, employee_id: &str) -> CocResult<Option<EmployeeModel>> {
        match self.store.get(EMPLOYEES, employee_id).await? {
            Some(doc) => Ok(Some(EmployeeModel::from_document(employee_id, &doc)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> CocResult<Option<EmployeeModel>> {
        let docs = self
            .store
            .find_matching(EMPLOYEES, &[(fields::EMAIL, FieldValue::Str(email.to_string()))])
            .await?;
        Ok(Self::parse_all(docs)?.into_iter().next())
    }

    async fn find_all(&self, limit: usize) -> CocResult<Vec<EmployeeModel>> {
        let pairs = self.store.get_many(EMPLOYEES, limit).await?;
        Self::parse_all(pairs.into_iter().map(|(_, doc)| doc).collect())
    }

    async fn find_by_status(&self, status: EmployeeStatus) -> CocResult<Vec<EmployeeModel>> {
        let docs = self
            .store
            .find_matching(
                EMPLOYEES,
                &[(fields::STATUS, FieldValue::Str(status.as_str().to_string()))],
            )
            .await?;
        Self::parse_all(docs)
    }
}
