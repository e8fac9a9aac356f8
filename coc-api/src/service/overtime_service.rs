use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{LogStatus, Month, OvertimeLog, PunchTimes},
    error::CocResult,
    views::BatchLogResult,
};

#[async_trait]
pub trait OvertimeLogService: Send + Sync {
    /// The batch write path: the full validation cascade, then an atomic
    /// persist of every accepted entry. Duplicates are skipped, not errors.
    async fn log_batch(&self, request: OvertimeBatchRequest) -> CocResult<BatchLogResult>;

    async fn get_log(&self, log_id: i64) -> CocResult<OvertimeLog>;

    /// Re-punch an uncertified log; earned credit and day type are
    /// recomputed and the monthly cap re-checked.
    async fn update_log(&self, log_id: i64, patch: OvertimeLogPatch) -> CocResult<OvertimeLog>;

    /// Only uncertified logs may be deleted.
    async fn delete_log(&self, log_id: i64) -> CocResult<()>;

    async fn logs_for_employee(&self, employee_id: &str) -> CocResult<Vec<OvertimeLog>>;

    async fn logs_for_period(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<Vec<OvertimeLog>>;

    async fn logs_by_status(&self, status: LogStatus) -> CocResult<Vec<OvertimeLog>>;

    /// Sum of earned hours over uncertified logs for the period.
    async fn uncertified_month_total(
        &self,
        employee_id: &str,
        month: Month,
        year: i32,
    ) -> CocResult<Decimal>;
}

/// A batch of raw day entries for one (employee, month, year). Dates and
/// punches arrive as strings so malformed input surfaces as BadDate /
/// BadTime rather than failing upstream of the cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeBatchRequest {
    pub employee_id: String,
    pub month: Month,
    pub year: i32,
    pub entries: Vec<OvertimeEntryInput>,
    /// Client-supplied idempotency key; generated when absent.
    pub correlation_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OvertimeEntryInput {
    /// ISO-8601 civil date, e.g. "2025-03-10".
    pub date_worked: String,
    pub am_in: Option<String>,
    pub am_out: Option<String>,
    pub pm_in: Option<String>,
    pub pm_out: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OvertimeLogPatch {
    pub punches: Option<PunchTimes>,
}
