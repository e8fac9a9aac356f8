use std::sync::Arc;

use async_trait::async_trait;
use coc_api::{CocError, CocResult, Month};
use coc_db::models::overtime_log::fields;
use coc_db::models::{LogStatus, OvertimeLogModel};
use coc_db::repository::{OvertimeLogRepository, PunchUpdate};
use coc_db::store::collections::OVERTIME_LOGS;
use coc_db::store::{Document, DocumentStore, FieldValue, WriteOp};
use uuid::Uuid;

use crate::repositories::id_gen;

pub struct DocumentOvertimeLogRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentOvertimeLogRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    fn parse_all(docs: Vec<Document>) -> CocResult<Vec<OvertimeLogModel>> {
        let mut models = Vec::with_capacity(docs.len());
        for doc in &docs {
            let id = match doc.get(fields::LOG_ID) {
                Some(FieldValue::Int(v)) => v.to_string(),
                _ => String::new(),
            };
            models.push(OvertimeLogModel::from_document(&id, doc)?);
        }
        models.sort_by_key(|m| (m.date_worked, m.log_id));
        Ok(models)
    }

    async fn verify_and_roll_forward(
        &self,
        logs: &[OvertimeLogModel],
        correlation_id: Uuid,
    ) -> CocResult<usize> {
        let persisted = self.find_by_correlation(correlation_id).await?;
        if persisted.len() == logs.len() {
            return Ok(persisted.len());
        }

        // partial landing: re-create whatever is missing, labeled with the
        // same correlation id, then verify once more
        tracing::warn!(
            "batch write for correlation {} verified {}/{} logs; rolling forward",
            correlation_id,
            persisted.len(),
            logs.len()
        );
        for log in logs {
            let result = self
                .store
                .create(OVERTIME_LOGS, &log.document_id(), log.to_document())
                .await;
            match result {
                Ok(()) | Err(CocError::AlreadyExists(_)) => {}
                Err(e) => return Err(e),
            }
        }
        let persisted = self.find_by_correlation(correlation_id).await?;
        if persisted.len() == logs.len() {
            Ok(persisted.len())
        } else {
            Err(CocError::StoreUnavailable {
                details: format!(
                    "batch write verification failed for correlation {correlation_id}: \
                     {} of {} entries persisted",
                    persisted.len(),
                    logs.len()
                ),
            })
        }
    }
}

#[async_trait]
impl OvertimeLogRepository for DocumentOvertimeLogRepository {
    async fn reserve_log_ids(&self, count: usize) -> CocResult<i64> {
        id_gen::reserve_ids(
            self.store.as_ref(),
            OVERTIME_LOGS,
            OVERTIME_LOGS,
            fields::LOG_ID,
            count,
        )
        .await
    }

    async fn create_many(&self, logs: Vec<OvertimeLogModel>) -> CocResult<usize> {
        if logs.is_empty() {
            return Ok(0);
        }
        let ops = logs
            .iter()
            .map(|log| WriteOp::Create {
                collection: OVERTIME_LOGS.to_string(),
                id: log.document_id(),
                fields: log.to_document(),
            })
            .collect();
        self.store.batch_write(ops).await?;

        match logs[0].correlation_id {
            Some(correlation_id) => self.verify_and_roll_forward(&logs, correlation_id).await,
            None => Ok(logs.len()),
        }
    }

    async fn find_by_id(&self, log_id: i64) -> CocResult<Option<OvertimeLogModel>> {
        let id = log_id.to_string();
        match self.store.get(OVERTIME_LOGS, &id).await? {
            Some(doc) => Ok(Some(OvertimeLogModel::from_document(&id, &doc)?)),
            None => Ok(None),
        }
    }

    async fn update_punch_result(&self, log_id: i64, update: PunchUpdate) -> CocResult<()> {
        let mut patch = Document::new();
        patch.insert(fields::AM_IN.into(), FieldValue::from_opt_str(update.am_in.as_deref()));
        patch.insert(fields::AM_OUT.into(), FieldValue::from_opt_str(update.am_out.as_deref()));
        patch.insert(fields::PM_IN.into(), FieldValue::from_opt_str(update.pm_in.as_deref()));
        patch.insert(fields::PM_OUT.into(), FieldValue::from_opt_str(update.pm_out.as_deref()));
        patch.insert(
            fields::DAY_TYPE.into(),
            FieldValue::Str(update.day_type.as_str().into()),
        );
        patch.insert(fields::COC_EARNED.into(), FieldValue::from_hours(update.coc_earned));
        self.store
            .update(OVERTIME_LOGS, &log_id.to_string(), patch)
            .await
    }

    async fn delete(&self, log_id: i64) -> CocResult<()> {
        self.store.delete(OVERTIME_LOGS, &log_id.to_string()).await
    }

    async fn find_by_employee(&self, employee_id: &str) -> CocResult<Vec<OvertimeLogModel>> {
        let docs = self
            .store
            .find_matching(
                OVERTIME_LOGS,
                &[(fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string()))],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_period(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<Vec<OvertimeLogModel>> {
        let docs = self
            .store
            .find_matching(
                OVERTIME_LOGS,
                &[
                    (fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string())),
                    (fields::MONTH, FieldValue::Str(month.name().to_string())),
                    (fields::YEAR, FieldValue::Int(year as i64)),
                ],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_period_and_status(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
        status: LogStatus,
    ) -> CocResult<Vec<OvertimeLogModel>> {
        let docs = self
            .store
            .find_matching(
                OVERTIME_LOGS,
                &[
                    (fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string())),
                    (fields::MONTH, FieldValue::Str(month.name().to_string())),
                    (fields::YEAR, FieldValue::Int(year as i64)),
                    (fields::STATUS, FieldValue::Str(status.as_str().to_string())),
                ],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_status(&self, status: LogStatus) -> CocResult<Vec<OvertimeLogModel>> {
        let docs = self
            .store
            .find_matching(
                OVERTIME_LOGS,
                &[(fields::STATUS, FieldValue::Str(status.as_str().to_string()))],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_employee_and_status(
        &self,
        employee_id: &str,
        status: LogStatus,
    ) -> CocResult<Vec<OvertimeLogModel>> {
        let docs = self
            .store
            .find_matching(
                OVERTIME_LOGS,
                &[
                    (fields::EMPLOYEE_ID, FieldValue::Str(employee_id.to_string())),
                    (fields::STATUS, FieldValue::Str(status.as_str().to_string())),
                ],
            )
            .await?;
        Self::parse_all(docs)
    }

    async fn find_by_correlation(&self, correlation_id: Uuid) -> CocResult<Vec<OvertimeLogModel>> {
        let docs = self
            .store
            .find_matching(
                OVERTIME_LOGS,
                &[(
                    fields::CORRELATION_ID,
                    FieldValue::Str(correlation_id.to_string()),
                )],
            )
            .await?;
        Self::parse_all(docs)
    }
}
