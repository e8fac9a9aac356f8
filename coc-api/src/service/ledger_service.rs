use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CreditBatch, LedgerEntry, Month},
    error::CocResult,
    views::{BalanceSummary, DebitOutcome, ExpireSweepReport},
};

#[async_trait]
pub trait CreditLedgerService: Send + Sync {
    /// Import a pre-system balance as one historical batch; at most one per
    /// (employee, month, year), and the period becomes locked for new logs.
    async fn create_historical_batch(&self, request: HistoricalImportRequest)
        -> CocResult<CreditBatch>;

    /// Consume credits FIFO across active batches, earliest expiry first.
    /// Overdraw fails before any batch is touched.
    async fn debit(&self, request: DebitRequest) -> CocResult<DebitOutcome>;

    /// Expire every active batch whose validity lapsed before `as_of`,
    /// forfeiting its remaining hours into the ledger.
    async fn expire_sweep(&self, as_of: NaiveDate) -> CocResult<ExpireSweepReport>;

    async fn balance(&self, employee_id: &str, as_of: NaiveDate) -> CocResult<BalanceSummary>;

    async fn batches_for_employee(&self, employee_id: &str) -> CocResult<Vec<CreditBatch>>;

    /// The employee's journal, ordered by transaction date then id.
    async fn ledger_entries(&self, employee_id: &str) -> CocResult<Vec<LedgerEntry>>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalImportRequest {
    pub employee_id: String,
    pub month: Month,
    pub year: i32,
    pub hours: Decimal,
    pub date_of_issuance: NaiveDate,
    pub valid_until: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebitRequest {
    pub employee_id: String,
    pub hours: Decimal,
    pub reference_id: Option<String>,
    pub notes: Option<String>,
}
