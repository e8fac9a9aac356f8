use async_trait::async_trait;
use coc_api::CocResult;
use uuid::Uuid;

use crate::models::LedgerEntryModel;

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Reserve `count` consecutive transaction ids and return the first;
    /// ids order the per-employee journal together with transaction-date.
    async fn reserve_transaction_ids(&self, count: usize) -> CocResult<i64>;

    /// Append-only; an existing transaction id is a conflict.
    async fn append(&self, entry: LedgerEntryModel) -> CocResult<()>;

    /// Journal rows for one employee, transaction-date then id ascending.
    async fn find_by_employee(&self, employee_id: &str) -> CocResult<Vec<LedgerEntryModel>>;

    async fn find_by_batch(&self, batch_id: Uuid) -> CocResult<Vec<LedgerEntryModel>>;
}
