use async_trait::async_trait;
use coc_api::{CocResult, Month};
use uuid::Uuid;

use crate::models::{BatchSource, BatchStatus, CreditBatchModel};

#[async_trait]
pub trait CreditBatchRepository: Send + Sync {
    /// Create only; an existing batch id is never overwritten.
    async fn create(&self, batch: CreditBatchModel) -> CocResult<()>;

    async fn find_by_id(&self, batch_id: Uuid) -> CocResult<Option<CreditBatchModel>>;

    async fn find_by_employee(&self, employee_id: &str) -> CocResult<Vec<CreditBatchModel>>;

    async fn find_by_employee_and_status(
        &self,
        employee_id: &str,
        status: BatchStatus,
    ) -> CocResult<Vec<CreditBatchModel>>;

    /// Period-lock probe and historical-import uniqueness check.
    async fn find_by_period_and_source(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
        source: BatchSource,
    ) -> CocResult<Vec<CreditBatchModel>>;

    /// All batches in a status, every employee; feeds the expiry sweep.
    async fn find_by_status(&self, status: BatchStatus) -> CocResult<Vec<CreditBatchModel>>;
}
