use async_trait::async_trait;

use crate::{
    domain::Month,
    error::CocResult,
    views::{CertifiedMonth, CreditProgress, EmployeeLedgerView, UncertifiedLogRow, UncertifiedStats},
};

/// Read-side composition over the log store and the batch ledger. Every
/// query pushes its equality predicates into the store; nothing here loads
/// a whole collection to filter in code.
#[async_trait]
pub trait LedgerQueryService: Send + Sync {
    /// Batches and logs merged into one date-descending sequence, executed
    /// with at most two store queries.
    async fn employee_detailed_ledger(&self, employee_id: &str) -> CocResult<EmployeeLedgerView>;

    async fn uncertified_stats(&self) -> CocResult<UncertifiedStats>;

    /// Uncertified logs with employee names joined in memory.
    async fn uncertified_logs_with_employees(&self) -> CocResult<Vec<UncertifiedLogRow>>;

    async fn certified_months(&self, employee_id: &str, year: i32) -> CocResult<Vec<CertifiedMonth>>;

    async fn credit_progress(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<CreditProgress>;
}
